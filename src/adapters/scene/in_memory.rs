//! In-memory scene implementation.
//!
//! Stands in for the engine's scene in the demo binary and in tests.
//! Objects are shared through `Arc`, so a test can keep a handle and
//! trigger interactions while the runtime polls the same object.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use crate::domain::foundation::PropertyKind;
use crate::ports::{SceneObject, SceneRegistry};

/// A scene object whose properties are flipped by hand.
///
/// # Example
///
/// ```ignore
/// let wrench = InMemorySceneObject::new("Wrench")
///     .with_property(PropertyKind::Grabbable);
/// wrench.trigger(PropertyKind::Grabbable);
/// ```
#[derive(Debug)]
pub struct InMemorySceneObject {
    unique_name: String,
    enabled: AtomicBool,
    properties: HashSet<PropertyKind>,
    triggered: RwLock<HashSet<PropertyKind>>,
    locked: RwLock<HashSet<PropertyKind>>,
}

impl InMemorySceneObject {
    /// Creates an enabled object without properties.
    pub fn new(unique_name: impl Into<String>) -> Self {
        Self {
            unique_name: unique_name.into(),
            enabled: AtomicBool::new(true),
            properties: HashSet::new(),
            triggered: RwLock::new(HashSet::new()),
            locked: RwLock::new(HashSet::new()),
        }
    }

    pub fn with_property(mut self, property: PropertyKind) -> Self {
        self.properties.insert(property);
        self
    }

    // === Test Helpers ===

    /// Simulates the user performing the property's interaction.
    pub fn trigger(&self, property: PropertyKind) {
        self.triggered
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(property);
    }

    /// Clears a previously triggered interaction.
    pub fn reset(&self, property: PropertyKind) {
        self.triggered
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&property);
    }
}

impl SceneObject for InMemorySceneObject {
    fn unique_name(&self) -> &str {
        &self.unique_name
    }

    fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::SeqCst)
    }

    fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::SeqCst);
    }

    fn has_property(&self, property: PropertyKind) -> bool {
        self.properties.contains(&property)
    }

    fn is_triggered(&self, property: PropertyKind) -> bool {
        self.has_property(property)
            && self
                .triggered
                .read()
                .unwrap_or_else(PoisonError::into_inner)
                .contains(&property)
    }

    fn is_locked(&self, property: PropertyKind) -> bool {
        self.locked
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(&property)
    }

    fn set_locked(&self, property: PropertyKind, locked: bool) -> bool {
        if !self.has_property(property) {
            return false;
        }
        let mut set = self.locked.write().unwrap_or_else(PoisonError::into_inner);
        if locked {
            set.insert(property);
        } else {
            set.remove(&property);
        }
        true
    }
}

/// Scene registry backed by a name-keyed map.
#[derive(Default)]
pub struct InMemorySceneRegistry {
    objects: RwLock<HashMap<String, Arc<InMemorySceneObject>>>,
}

impl InMemorySceneRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an object, replacing any object with the same name.
    /// Returns the shared handle.
    pub fn register(&self, object: InMemorySceneObject) -> Arc<InMemorySceneObject> {
        let object = Arc::new(object);
        self.objects
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(object.unique_name.clone(), Arc::clone(&object));
        object
    }

    pub fn len(&self) -> usize {
        self.objects
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl SceneRegistry for InMemorySceneRegistry {
    fn get_by_name(&self, unique_name: &str) -> Option<Arc<dyn SceneObject>> {
        self.objects
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(unique_name)
            .map(|object| Arc::clone(object) as Arc<dyn SceneObject>)
    }
}
