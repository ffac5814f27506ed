//! Condition module - predicates that guard transitions.

#[allow(clippy::module_inception)]
mod condition;
mod kind;

pub use condition::{Condition, ConditionData, ConditionProcess};
pub use kind::{ConditionKind, ConditionKindTag};
