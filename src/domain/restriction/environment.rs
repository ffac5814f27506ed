//! RestrictiveEnvironment - keeps scene interactions locked unless the
//! current step waits for them.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::foundation::ScenePropertyReference;
use crate::domain::step::Step;
use crate::ports::SceneRegistry;

use super::LockableRegistry;

pub struct RestrictiveEnvironment {
    registry: LockableRegistry,
    scene: Arc<dyn SceneRegistry>,
    unlocked: Vec<ScenePropertyReference>,
}

impl RestrictiveEnvironment {
    pub fn new(scene: Arc<dyn SceneRegistry>, registry: LockableRegistry) -> Self {
        Self {
            registry,
            scene,
            unlocked: Vec::new(),
        }
    }

    /// Properties currently unlocked for the active step.
    pub fn unlocked(&self) -> &[ScenePropertyReference] {
        &self.unlocked
    }

    /// Unlocks every property the step's conditions reference.
    ///
    /// Relocks whatever the previous step had unlocked first.
    pub fn enter_step(&mut self, step: &Step) {
        self.leave_step();
        for property in self.registry.extract_lockables(step) {
            if self.set_locked(&property, false) {
                debug!(step = %step.name(), property = %property, "Unlocked");
                self.unlocked.push(property);
            }
        }
    }

    /// Relocks the properties unlocked by the last `enter_step`.
    pub fn leave_step(&mut self) {
        for property in std::mem::take(&mut self.unlocked) {
            self.set_locked(&property, true);
        }
    }

    fn set_locked(&self, property: &ScenePropertyReference, locked: bool) -> bool {
        let Some(object) = self.scene.resolve(&property.object) else {
            return false;
        };
        let applied = object.set_locked(property.property, locked);
        if !applied {
            warn!(property = %property, "Scene object lacks lockable property");
        }
        applied
    }
}
