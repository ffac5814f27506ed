//! Condition kinds.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

use crate::domain::foundation::ScenePropertyReference;

/// The predicate a condition waits for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ConditionKind {
    /// Never completes unless autocompleted.
    Endless,
    /// Completes once it has been active for `duration`.
    Timeout { duration: Duration },
    /// Completes when the user performs the interaction on a scene object.
    PropertyTriggered { target: ScenePropertyReference },
}

impl ConditionKind {
    pub fn tag(&self) -> ConditionKindTag {
        match self {
            ConditionKind::Endless => ConditionKindTag::Endless,
            ConditionKind::Timeout { .. } => ConditionKindTag::Timeout,
            ConditionKind::PropertyTriggered { .. } => ConditionKindTag::PropertyTriggered,
        }
    }
}

/// Fieldless discriminant of [`ConditionKind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConditionKindTag {
    Endless,
    Timeout,
    PropertyTriggered,
}

impl fmt::Display for ConditionKindTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ConditionKindTag::Endless => "endless",
            ConditionKindTag::Timeout => "timeout",
            ConditionKindTag::PropertyTriggered => "property_triggered",
        };
        write!(f, "{}", s)
    }
}
