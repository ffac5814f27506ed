//! Factory module - creation of entities.
//!
//! - `Factory` - one per entity kind, composed by injection
//! - `EntityBuilder` - host-owned builder with creation notifications

mod builder;
mod factories;

pub use builder::{EntityBuilder, EntityCreated};
pub use factories::{ChapterFactory, CourseFactory, Factory, StepFactory, TransitionFactory};
