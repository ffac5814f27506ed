//! RuntimeConfiguration - the context object every entity is configured with.

use std::fmt;
use std::sync::Arc;

use tracing::info;

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::{SceneObject, SceneRegistry};

use super::Mode;

/// Available modes, the selected one and the scene the course runs in.
///
/// Constructed once by the driver and passed by reference to `configure`.
#[derive(Clone)]
pub struct RuntimeConfiguration {
    modes: Vec<Mode>,
    current: usize,
    scene: Arc<dyn SceneRegistry>,
}

impl RuntimeConfiguration {
    /// Creates a configuration with the default mode selected.
    pub fn new(scene: Arc<dyn SceneRegistry>) -> Self {
        Self {
            modes: vec![Mode::default()],
            current: 0,
            scene,
        }
    }

    /// Adds a mode, replacing an existing mode of the same name.
    pub fn with_mode(mut self, mode: Mode) -> Self {
        match self.modes.iter().position(|m| m.name() == mode.name()) {
            Some(index) => self.modes[index] = mode,
            None => self.modes.push(mode),
        }
        self
    }

    pub fn modes(&self) -> &[Mode] {
        &self.modes
    }

    pub fn current_mode(&self) -> &Mode {
        &self.modes[self.current]
    }

    /// Selects a mode by name.
    ///
    /// Only affects entities configured afterwards.
    pub fn set_mode(&mut self, name: &str) -> Result<(), DomainError> {
        let index = self
            .modes
            .iter()
            .position(|mode| mode.name() == name)
            .ok_or_else(|| {
                DomainError::new(ErrorCode::ModeNotFound, format!("Unknown mode '{}'", name))
                    .with_detail("mode", name)
            })?;

        self.current = index;
        info!(mode = name, "Execution mode selected");
        Ok(())
    }

    pub fn scene(&self) -> &dyn SceneRegistry {
        self.scene.as_ref()
    }

    pub fn scene_handle(&self) -> Arc<dyn SceneRegistry> {
        Arc::clone(&self.scene)
    }
}

impl Default for RuntimeConfiguration {
    fn default() -> Self {
        Self::new(Arc::new(EmptyScene))
    }
}

impl fmt::Debug for RuntimeConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuntimeConfiguration")
            .field("modes", &self.modes)
            .field("current", &self.current)
            .finish_non_exhaustive()
    }
}

/// Scene without objects, for courses that reference none.
struct EmptyScene;

impl SceneRegistry for EmptyScene {
    fn get_by_name(&self, _unique_name: &str) -> Option<Arc<dyn SceneObject>> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_with_default_mode() {
        let runtime = RuntimeConfiguration::default();
        assert_eq!(runtime.current_mode().name(), "Default");
    }

    #[test]
    fn set_mode_selects_known_mode() {
        let mut runtime = RuntimeConfiguration::default().with_mode(Mode::new("Skip All"));

        runtime.set_mode("Skip All").unwrap();

        assert_eq!(runtime.current_mode().name(), "Skip All");
    }

    #[test]
    fn set_mode_rejects_unknown_mode_and_keeps_current() {
        let mut runtime = RuntimeConfiguration::default();

        let err = runtime.set_mode("Nope").unwrap_err();

        assert_eq!(err.code, ErrorCode::ModeNotFound);
        assert_eq!(runtime.current_mode().name(), "Default");
    }

    #[test]
    fn with_mode_replaces_same_name() {
        let runtime = RuntimeConfiguration::default()
            .with_mode(Mode::new("Default").with_parameter("x", 1));

        assert_eq!(runtime.modes().len(), 1);
        assert_eq!(runtime.current_mode().parameter::<i32>("x"), Some(1));
    }
}
