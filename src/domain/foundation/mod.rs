//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, enums, events and error types
//! that form the vocabulary of the course runtime.

mod entity_kind;
mod errors;
mod events;
mod ids;
mod position;
mod scene_reference;
mod stage;
mod state_machine;

pub use entity_kind::{EntityKind, EntityLabel};
pub use errors::{DomainError, ErrorCode, InvalidStateError, LifeCycleOperation, ValidationError};
pub use events::{Observers, StageChanged, SubscriptionId};
pub use ids::StepId;
pub use position::Position;
pub use scene_reference::{PropertyKind, SceneObjectReference, ScenePropertyReference};
pub use stage::Stage;
pub use state_machine::StateMachine;
