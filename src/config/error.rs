//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Tick rate must be between 1 and {max} Hz, got {actual}")]
    InvalidTickRate { actual: u32, max: u32 },

    #[error("Max ticks must be greater than zero")]
    InvalidMaxTicks,

    #[error("Invalid log filter directive: {0}")]
    InvalidLogLevel(String),
}
