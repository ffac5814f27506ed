//! Scene adapters.

mod in_memory;

pub use in_memory::{InMemorySceneObject, InMemorySceneRegistry};
