//! Runtime driver configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Upper bound for the tick rate; faster ticks gain nothing.
const MAX_TICK_RATE_HZ: u32 = 1000;

/// Settings of the tick-driven course driver
#[derive(Debug, Clone, Deserialize)]
pub struct RuntimeSettings {
    /// Ticks per simulated second
    #[serde(default = "default_tick_rate")]
    pub tick_rate_hz: u32,

    /// Name of the execution mode to select before running
    #[serde(default = "default_mode")]
    pub mode: String,

    /// Rust log filter directive
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Ticks after which the driver gives up on an unfinished course
    #[serde(default = "default_max_ticks")]
    pub max_ticks: u64,
}

impl RuntimeSettings {
    /// Time that passes between two ticks.
    pub fn tick_delta(&self) -> Duration {
        Duration::from_secs(1) / self.tick_rate_hz.max(1)
    }

    /// Validate runtime settings
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.tick_rate_hz == 0 || self.tick_rate_hz > MAX_TICK_RATE_HZ {
            return Err(ValidationError::InvalidTickRate {
                actual: self.tick_rate_hz,
                max: MAX_TICK_RATE_HZ,
            });
        }
        if self.mode.trim().is_empty() {
            return Err(ValidationError::MissingRequired("runtime.mode"));
        }
        if self.log_level.trim().is_empty() {
            return Err(ValidationError::InvalidLogLevel(self.log_level.clone()));
        }
        if self.max_ticks == 0 {
            return Err(ValidationError::InvalidMaxTicks);
        }
        Ok(())
    }
}

impl Default for RuntimeSettings {
    fn default() -> Self {
        Self {
            tick_rate_hz: default_tick_rate(),
            mode: default_mode(),
            log_level: default_log_level(),
            max_ticks: default_max_ticks(),
        }
    }
}

fn default_tick_rate() -> u32 {
    60
}

fn default_mode() -> String {
    "Default".to_string()
}

fn default_log_level() -> String {
    "info,course_runtime=debug".to_string()
}

fn default_max_ticks() -> u64 {
    // Ten minutes at the default rate
    36_000
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_runtime_settings_defaults() {
        let settings = RuntimeSettings::default();
        assert_eq!(settings.tick_rate_hz, 60);
        assert_eq!(settings.mode, "Default");
        assert_eq!(settings.max_ticks, 36_000);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_tick_delta() {
        let settings = RuntimeSettings {
            tick_rate_hz: 50,
            ..Default::default()
        };
        assert_eq!(settings.tick_delta(), Duration::from_millis(20));
    }

    #[test]
    fn test_zero_tick_rate_rejected() {
        let settings = RuntimeSettings {
            tick_rate_hz: 0,
            ..Default::default()
        };
        assert_eq!(
            settings.validate(),
            Err(ValidationError::InvalidTickRate { actual: 0, max: 1000 })
        );
    }

    #[test]
    fn test_blank_mode_rejected() {
        let settings = RuntimeSettings {
            mode: "  ".to_string(),
            ..Default::default()
        };
        assert_eq!(
            settings.validate(),
            Err(ValidationError::MissingRequired("runtime.mode"))
        );
    }

    #[test]
    fn test_zero_max_ticks_rejected() {
        let settings = RuntimeSettings {
            max_ticks: 0,
            ..Default::default()
        };
        assert_eq!(settings.validate(), Err(ValidationError::InvalidMaxTicks));
    }
}
