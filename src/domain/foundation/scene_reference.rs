//! References from entity data to objects living in the training scene.
//!
//! References are plain unique names; they are resolved through the
//! [`SceneRegistry`](crate::ports::SceneRegistry) port at configure time.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

/// Reference to a scene object by its unique name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SceneObjectReference(String);

impl SceneObjectReference {
    /// Creates a reference, rejecting blank names.
    pub fn new(unique_name: impl Into<String>) -> Result<Self, ValidationError> {
        let unique_name = unique_name.into();
        if unique_name.trim().is_empty() {
            return Err(ValidationError::empty_field("unique_name"));
        }
        Ok(Self(unique_name))
    }

    pub fn unique_name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SceneObjectReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Interaction properties a scene object may expose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyKind {
    Grabbable,
    Touchable,
    Usable,
    Snappable,
}

impl fmt::Display for PropertyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PropertyKind::Grabbable => "grabbable",
            PropertyKind::Touchable => "touchable",
            PropertyKind::Usable => "usable",
            PropertyKind::Snappable => "snappable",
        };
        write!(f, "{}", s)
    }
}

/// Reference to one property of a scene object.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ScenePropertyReference {
    pub object: SceneObjectReference,
    pub property: PropertyKind,
}

impl ScenePropertyReference {
    pub fn new(object: SceneObjectReference, property: PropertyKind) -> Self {
        Self { object, property }
    }
}

impl fmt::Display for ScenePropertyReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.object, self.property)
    }
}
