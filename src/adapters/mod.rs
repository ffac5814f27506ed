//! Adapters - Implementations of port interfaces.
//!
//! - `scene` - In-memory scene used by the demo driver and tests

pub mod scene;

pub use scene::{InMemorySceneObject, InMemorySceneRegistry};
