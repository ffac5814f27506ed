//! Registry mapping condition kinds to the scene properties they reference.

use std::collections::HashMap;
use std::fmt;

use crate::domain::condition::{ConditionData, ConditionKind, ConditionKindTag};
use crate::domain::foundation::ScenePropertyReference;
use crate::domain::step::Step;

/// Extracts the lockable properties referenced by one condition.
pub type ExtractFn = fn(&ConditionData) -> Vec<ScenePropertyReference>;

/// Explicit table of condition kinds that reference lockable properties.
///
/// Populated once at startup; kinds without an entry reference nothing.
#[derive(Clone, Default)]
pub struct LockableRegistry {
    extractors: HashMap<ConditionKindTag, ExtractFn>,
}

impl LockableRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry knowing every built-in condition kind.
    pub fn with_defaults() -> Self {
        Self::new().register(ConditionKindTag::PropertyTriggered, property_triggered)
    }

    /// Registers (or replaces) the extractor for a kind.
    pub fn register(mut self, kind: ConditionKindTag, extract: ExtractFn) -> Self {
        self.extractors.insert(kind, extract);
        self
    }

    pub fn extract_from_condition(&self, data: &ConditionData) -> Vec<ScenePropertyReference> {
        self.extractors
            .get(&data.kind.tag())
            .map(|extract| extract(data))
            .unwrap_or_default()
    }

    /// Every property referenced by the conditions of a step, in
    /// transition then condition order.
    pub fn extract_lockables(&self, step: &Step) -> Vec<ScenePropertyReference> {
        step.transitions()
            .iter()
            .flat_map(|transition| transition.conditions())
            .flat_map(|condition| self.extract_from_condition(condition.data()))
            .collect()
    }
}

impl fmt::Debug for LockableRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LockableRegistry")
            .field("kinds", &self.extractors.keys().collect::<Vec<_>>())
            .finish()
    }
}

fn property_triggered(data: &ConditionData) -> Vec<ScenePropertyReference> {
    match &data.kind {
        ConditionKind::PropertyTriggered { target } => vec![target.clone()],
        ConditionKind::Endless | ConditionKind::Timeout { .. } => Vec::new(),
    }
}
