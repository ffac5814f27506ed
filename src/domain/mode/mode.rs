//! Mode - a named rule set for running a course.

use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::warn;

use crate::domain::behavior::BehaviorKindTag;
use crate::domain::condition::ConditionKindTag;

use super::KindRule;

/// Execution mode of a course.
///
/// Behaviors and conditions whose kind is skipped by the mode fast-forward
/// through every stage they enter. Free-form parameters let behaviors read
/// mode-specific settings.
#[derive(Debug, Clone, PartialEq)]
pub struct Mode {
    name: String,
    skipped_behaviors: KindRule<BehaviorKindTag>,
    skipped_conditions: KindRule<ConditionKindTag>,
    parameters: HashMap<String, Value>,
}

impl Mode {
    /// A mode that skips nothing.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            skipped_behaviors: KindRule::new(),
            skipped_conditions: KindRule::new(),
            parameters: HashMap::new(),
        }
    }

    pub fn with_skipped_behaviors(mut self, rule: KindRule<BehaviorKindTag>) -> Self {
        self.skipped_behaviors = rule;
        self
    }

    pub fn with_skipped_conditions(mut self, rule: KindRule<ConditionKindTag>) -> Self {
        self.skipped_conditions = rule;
        self
    }

    pub fn with_parameter(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.parameters.insert(key.into(), value.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn skips_behavior(&self, kind: BehaviorKindTag) -> bool {
        self.skipped_behaviors.contains(kind)
    }

    pub fn skips_condition(&self, kind: ConditionKindTag) -> bool {
        self.skipped_conditions.contains(kind)
    }

    pub fn contains_parameter(&self, key: &str) -> bool {
        self.parameters.contains_key(key)
    }

    /// Reads a parameter as `T`.
    ///
    /// Returns `None` when the key is missing or holds a value of another
    /// shape; the latter is logged.
    pub fn parameter<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let value = self.parameters.get(key)?;
        match serde_json::from_value(value.clone()) {
            Ok(parsed) => Some(parsed),
            Err(err) => {
                warn!(mode = %self.name, key, error = %err, "Mode parameter has unexpected type");
                None
            }
        }
    }
}

impl Default for Mode {
    fn default() -> Self {
        Self::new("Default")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_mode_skips_nothing() {
        let mode = Mode::default();
        assert!(!mode.skips_behavior(BehaviorKindTag::Timeout));
        assert!(!mode.skips_condition(ConditionKindTag::Endless));
    }

    #[test]
    fn skip_rules_are_per_kind() {
        let mode = Mode::new("Fast")
            .with_skipped_behaviors(KindRule::new().add(BehaviorKindTag::Timeout))
            .with_skipped_conditions(KindRule::new().add(ConditionKindTag::Timeout));

        assert!(mode.skips_behavior(BehaviorKindTag::Timeout));
        assert!(!mode.skips_behavior(BehaviorKindTag::Endless));
        assert!(mode.skips_condition(ConditionKindTag::Timeout));
        assert!(!mode.skips_condition(ConditionKindTag::PropertyTriggered));
    }

    #[test]
    fn parameters_are_typed_on_read() {
        let mode = Mode::new("Guided")
            .with_parameter("highlight", true)
            .with_parameter("volume", 0.5);

        assert_eq!(mode.parameter::<bool>("highlight"), Some(true));
        assert_eq!(mode.parameter::<f64>("volume"), Some(0.5));
        assert_eq!(mode.parameter::<bool>("missing"), None);
    }

    #[test]
    fn mismatched_parameter_type_reads_as_none() {
        let mode = Mode::new("Guided").with_parameter("highlight", "yes");
        assert_eq!(mode.parameter::<bool>("highlight"), None);
        assert!(mode.contains_parameter("highlight"));
    }
}
