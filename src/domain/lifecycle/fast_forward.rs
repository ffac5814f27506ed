//! Fast-forward marks armed on a lifecycle.

use crate::domain::foundation::Stage;

/// Set of stages marked to be fast-forwarded.
///
/// `Inactive` can never be marked: there is nothing to skip.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StageMarks {
    activating: bool,
    active: bool,
    deactivating: bool,
}

impl StageMarks {
    /// Marks a stage. Returns false if the stage cannot carry a mark.
    pub fn mark(&mut self, stage: Stage) -> bool {
        match self.slot(stage) {
            Some(slot) => {
                *slot = true;
                true
            }
            None => false,
        }
    }

    /// Removes the mark of a stage, returning whether it was set.
    pub fn take(&mut self, stage: Stage) -> bool {
        self.slot(stage).map(std::mem::take).unwrap_or(false)
    }

    pub fn contains(&self, stage: Stage) -> bool {
        match stage {
            Stage::Inactive => false,
            Stage::Activating => self.activating,
            Stage::Active => self.active,
            Stage::Deactivating => self.deactivating,
        }
    }

    pub fn is_empty(&self) -> bool {
        !(self.activating || self.active || self.deactivating)
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    fn slot(&mut self, stage: Stage) -> Option<&mut bool> {
        match stage {
            Stage::Inactive => None,
            Stage::Activating => Some(&mut self.activating),
            Stage::Active => Some(&mut self.active),
            Stage::Deactivating => Some(&mut self.deactivating),
        }
    }
}
