//! Behavior kinds and execution stages.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

use crate::domain::foundation::{SceneObjectReference, Stage};

/// What a behavior does.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BehaviorKind {
    /// Never finishes activating on its own.
    Endless,
    /// Waits for `duration` in each stage it executes in.
    Timeout { duration: Duration },
    /// Enables or disables a scene object.
    SetEnabled {
        target: SceneObjectReference,
        enabled: bool,
    },
}

impl BehaviorKind {
    pub fn tag(&self) -> BehaviorKindTag {
        match self {
            BehaviorKind::Endless => BehaviorKindTag::Endless,
            BehaviorKind::Timeout { .. } => BehaviorKindTag::Timeout,
            BehaviorKind::SetEnabled { .. } => BehaviorKindTag::SetEnabled,
        }
    }
}

/// Fieldless discriminant of [`BehaviorKind`], used by mode rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BehaviorKindTag {
    Endless,
    Timeout,
    SetEnabled,
}

impl fmt::Display for BehaviorKindTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            BehaviorKindTag::Endless => "endless",
            BehaviorKindTag::Timeout => "timeout",
            BehaviorKindTag::SetEnabled => "set_enabled",
        };
        write!(f, "{}", s)
    }
}

/// Stages in which a behavior performs its work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionStages {
    #[default]
    Activation,
    Deactivation,
    ActivationAndDeactivation,
}

impl ExecutionStages {
    pub fn includes(&self, stage: Stage) -> bool {
        match stage {
            Stage::Activating => matches!(
                self,
                ExecutionStages::Activation | ExecutionStages::ActivationAndDeactivation
            ),
            Stage::Deactivating => matches!(
                self,
                ExecutionStages::Deactivation | ExecutionStages::ActivationAndDeactivation
            ),
            Stage::Inactive | Stage::Active => false,
        }
    }
}
