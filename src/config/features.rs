//! Feature flags configuration

use serde::Deserialize;

/// Feature flags for enabling/disabling functionality
#[derive(Debug, Clone, Deserialize)]
pub struct FeatureFlags {
    /// Lock scene interactions the running step does not wait for
    #[serde(default = "default_restrictive_environment")]
    pub restrictive_environment: bool,

    /// Emit logs as JSON lines instead of human-readable text
    #[serde(default)]
    pub json_logs: bool,
}

impl Default for FeatureFlags {
    fn default() -> Self {
        Self {
            restrictive_environment: default_restrictive_environment(),
            json_logs: false,
        }
    }
}

fn default_restrictive_environment() -> bool {
    true
}
