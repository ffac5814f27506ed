//! SceneRegistry port - Lookup of scene objects by unique name.
//!
//! Behaviors and conditions refer to scene objects by name only. This port
//! is how the runtime turns those names into live handles without knowing
//! what engine or test double sits behind them.

use std::sync::Arc;

use tracing::warn;

use crate::domain::foundation::{PropertyKind, SceneObjectReference};

/// A live object in the training scene.
///
/// Implementations must be cheap to query; conditions poll
/// `is_triggered` on every tick while active.
pub trait SceneObject: Send + Sync {
    fn unique_name(&self) -> &str;

    fn is_enabled(&self) -> bool;

    fn set_enabled(&self, enabled: bool);

    /// Returns true if the object exposes the given interaction property.
    fn has_property(&self, property: PropertyKind) -> bool;

    /// Returns true once the user has performed the property's interaction
    /// (grabbed, touched, used, snapped).
    fn is_triggered(&self, property: PropertyKind) -> bool;

    fn is_locked(&self, property: PropertyKind) -> bool;

    /// Locks or unlocks an interaction property.
    ///
    /// Returns false if the object lacks the property.
    fn set_locked(&self, property: PropertyKind, locked: bool) -> bool;
}

/// Port for resolving scene object references.
///
/// Lookups are synchronous. An unknown name is not an error: callers get
/// `None` and degrade gracefully.
///
/// # Example
///
/// ```ignore
/// let registry: Arc<dyn SceneRegistry> = Arc::new(InMemorySceneRegistry::new());
/// if let Some(wrench) = registry.resolve(&reference) {
///     wrench.set_enabled(true);
/// }
/// ```
pub trait SceneRegistry: Send + Sync {
    /// Looks up an object by its unique name.
    fn get_by_name(&self, unique_name: &str) -> Option<Arc<dyn SceneObject>>;

    /// Resolves a reference, logging a warning when nothing matches.
    fn resolve(&self, reference: &SceneObjectReference) -> Option<Arc<dyn SceneObject>> {
        let found = self.get_by_name(reference.unique_name());
        if found.is_none() {
            warn!(
                unique_name = %reference,
                "Scene object could not be resolved"
            );
        }
        found
    }
}
