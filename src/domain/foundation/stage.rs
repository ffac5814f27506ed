//! Stage enum for tracking where an entity is in its activation lifecycle.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::StateMachine;

/// Activation stage of an entity.
///
/// Stages cycle `Inactive → Activating → Active → Deactivating → Inactive`.
/// `Activating → Deactivating` is the cancellation edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    #[default]
    Inactive,
    Activating,
    Active,
    Deactivating,
}

impl Stage {
    /// Every stage, in cycle order.
    pub const ALL: [Stage; 4] = [
        Stage::Inactive,
        Stage::Activating,
        Stage::Active,
        Stage::Deactivating,
    ];

    /// Stages that can carry a fast-forward mark.
    pub const FAST_FORWARDABLE: [Stage; 3] = [Stage::Activating, Stage::Active, Stage::Deactivating];

    /// Returns true for stages that must eventually resolve on their own.
    pub fn is_transient(&self) -> bool {
        matches!(self, Stage::Activating | Stage::Deactivating)
    }

    /// Returns true if the entity is activating or active.
    pub fn is_running(&self) -> bool {
        matches!(self, Stage::Activating | Stage::Active)
    }

    /// Returns true if the entity has left `Inactive` on its way up,
    /// i.e. it is `Activating` or `Active`.
    ///
    /// A `Deactivating` entity is on its way down and does not count.
    pub fn is_at_least_activating(&self) -> bool {
        self.is_running()
    }
}

impl StateMachine for Stage {
    fn can_transition_to(&self, target: &Self) -> bool {
        use Stage::*;
        matches!(
            (self, target),
            (Inactive, Activating)
                | (Activating, Active)
                // Cancellation
                | (Activating, Deactivating)
                | (Active, Deactivating)
                | (Deactivating, Inactive)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use Stage::*;
        match self {
            Inactive => vec![Activating],
            Activating => vec![Active, Deactivating],
            Active => vec![Deactivating],
            Deactivating => vec![Inactive],
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Stage::Inactive => "Inactive",
            Stage::Activating => "Activating",
            Stage::Active => "Active",
            Stage::Deactivating => "Deactivating",
        };
        write!(f, "{}", s)
    }
}
