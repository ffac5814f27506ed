//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Scene Ports
//!
//! - `SceneRegistry` - Lookup of scene objects by unique name
//! - `SceneObject` - A live object the course interacts with

mod scene_registry;

pub use scene_registry::{SceneObject, SceneRegistry};
