//! Lifecycle module - the activation protocol shared by every entity.
//!
//! # Overview
//!
//! - `LifeCycle` - stage machine with fast-forward marks and observers
//! - `StageProcess` - per-stage hooks an entity plugs into its lifecycle
//! - `Entity` - trait tying a lifecycle to its stage work
//!
//! Composites drive children through the crate-private `cascade` helpers.

pub(crate) mod cascade;
mod entity;
mod fast_forward;
mod life_cycle;
mod process;

pub use entity::Entity;
pub use fast_forward::StageMarks;
pub use life_cycle::LifeCycle;
pub use process::{Progress, StageProcess};
