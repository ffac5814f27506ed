//! Behavior module - actions performed by the system within a step.

#[allow(clippy::module_inception)]
mod behavior;
mod kind;

pub use behavior::{Behavior, BehaviorData, BehaviorProcess};
pub use kind::{BehaviorKind, BehaviorKindTag, ExecutionStages};
