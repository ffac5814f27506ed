//! Entity kinds and the label used to name an entity in events and errors.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The kinds of entity that own a lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Behavior,
    Condition,
    Transition,
    Step,
    Chapter,
    Course,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            EntityKind::Behavior => "behavior",
            EntityKind::Condition => "condition",
            EntityKind::Transition => "transition",
            EntityKind::Step => "step",
            EntityKind::Chapter => "chapter",
            EntityKind::Course => "course",
        };
        write!(f, "{}", s)
    }
}

/// Kind and display name of an entity; the `sender` of lifecycle events.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityLabel {
    pub kind: EntityKind,
    pub name: String,
}

impl EntityLabel {
    pub fn new(kind: EntityKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
        }
    }
}

impl fmt::Display for EntityLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} '{}'", self.kind, self.name)
    }
}
