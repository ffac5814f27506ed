//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `COURSE_RUNTIME` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use course_runtime::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Ticking at {} Hz", config.runtime.tick_rate_hz);
//! ```

mod error;
mod features;
mod runtime;

pub use error::{ConfigError, ValidationError};
pub use features::FeatureFlags;
pub use runtime::RuntimeSettings;

use serde::Deserialize;

/// Root application configuration
///
/// Every section has defaults, so an empty environment yields a usable
/// configuration. Load using [`AppConfig::load()`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Driver settings (tick rate, mode, logging, tick budget)
    #[serde(default)]
    pub runtime: RuntimeSettings,

    /// Feature flags
    #[serde(default)]
    pub features: FeatureFlags,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `COURSE_RUNTIME` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `COURSE_RUNTIME__RUNTIME__TICK_RATE_HZ=90` -> `runtime.tick_rate_hz = 90`
    /// - `COURSE_RUNTIME__FEATURES__JSON_LOGS=true` -> `features.json_logs = true`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("COURSE_RUNTIME")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.runtime.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    /// Helper to clear environment variables after testing
    fn clear_env() {
        env::remove_var("COURSE_RUNTIME__RUNTIME__TICK_RATE_HZ");
        env::remove_var("COURSE_RUNTIME__RUNTIME__MODE");
        env::remove_var("COURSE_RUNTIME__RUNTIME__MAX_TICKS");
        env::remove_var("COURSE_RUNTIME__FEATURES__JSON_LOGS");
        env::remove_var("COURSE_RUNTIME__FEATURES__RESTRICTIVE_ENVIRONMENT");
    }

    #[test]
    fn test_load_with_empty_environment_uses_defaults() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let result = AppConfig::load();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(config.runtime.tick_rate_hz, 60);
        assert!(config.features.restrictive_environment);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("COURSE_RUNTIME__RUNTIME__TICK_RATE_HZ", "90");
        env::set_var("COURSE_RUNTIME__RUNTIME__MAX_TICKS", "500");
        env::set_var("COURSE_RUNTIME__FEATURES__JSON_LOGS", "true");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.runtime.tick_rate_hz, 90);
        assert_eq!(config.runtime.max_ticks, 500);
        assert!(config.features.json_logs);
    }

    #[test]
    fn test_invalid_tick_rate_fails_validation() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("COURSE_RUNTIME__RUNTIME__TICK_RATE_HZ", "5000");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidTickRate { actual: 5000, .. })
        ));
    }

    #[test]
    fn test_unparseable_value_fails_load() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("COURSE_RUNTIME__RUNTIME__TICK_RATE_HZ", "fast");
        let result = AppConfig::load();
        clear_env();

        assert!(matches!(result, Err(ConfigError::LoadError(_))));
    }
}
