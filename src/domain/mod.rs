//! Domain layer containing the course entity tree and its lifecycle.
//!
//! # Module Organization
//!
//! - `foundation` - Shared primitives (stages, ids, errors, events)
//! - `lifecycle` - The activation protocol every entity follows
//! - `mode` - Execution modes and the runtime context
//! - `behavior`, `condition`, `transition`, `step`, `chapter`, `course` - Entity kinds
//! - `snapshot` - Plain-data copies of a course for persistence
//! - `factory` - Entity creation
//! - `restriction` - Locking of scene interactions per step

pub mod behavior;
pub mod chapter;
pub mod condition;
pub mod course;
pub mod factory;
pub mod foundation;
pub mod lifecycle;
pub mod mode;
pub mod restriction;
pub mod snapshot;
pub mod step;
pub mod transition;
