//! Error types for the domain layer.

use std::collections::HashMap;
use std::error::Error;
use std::fmt;
use thiserror::Error;

use super::{EntityLabel, Stage};

/// Errors that occur during value object construction.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: String },

    #[error("Field '{field}' must not be negative, got {actual}")]
    Negative { field: String, actual: f64 },

    #[error("Field '{field}' has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    /// Creates an empty field validation error.
    pub fn empty_field(field: impl Into<String>) -> Self {
        ValidationError::EmptyField { field: field.into() }
    }

    /// Creates a negative value validation error.
    pub fn negative(field: impl Into<String>, actual: f64) -> Self {
        ValidationError::Negative {
            field: field.into(),
            actual,
        }
    }

    /// Creates an invalid format validation error.
    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Lifecycle operation that was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LifeCycleOperation {
    Activate,
    Deactivate,
}

impl fmt::Display for LifeCycleOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LifeCycleOperation::Activate => "activate",
            LifeCycleOperation::Deactivate => "deactivate",
        };
        write!(f, "{}", s)
    }
}

/// A lifecycle protocol violation, e.g. deactivating an inactive entity.
///
/// Returned to the caller; the entity's stage is left untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Cannot {operation} {entity} while it is {stage}")]
pub struct InvalidStateError {
    pub entity: EntityLabel,
    pub operation: LifeCycleOperation,
    pub stage: Stage,
}

impl InvalidStateError {
    pub fn new(entity: EntityLabel, operation: LifeCycleOperation, stage: Stage) -> Self {
        Self {
            entity,
            operation,
            stage,
        }
    }
}

/// Error codes organized by category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Validation errors
    ValidationFailed,

    // Not found errors
    StepNotFound,
    ChapterNotFound,
    ModeNotFound,

    // State errors
    InvalidState,
    NotInactive,
    AlreadyRunning,
    NotRunning,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::ValidationFailed => "VALIDATION_FAILED",
            ErrorCode::StepNotFound => "STEP_NOT_FOUND",
            ErrorCode::ChapterNotFound => "CHAPTER_NOT_FOUND",
            ErrorCode::ModeNotFound => "MODE_NOT_FOUND",
            ErrorCode::InvalidState => "INVALID_STATE",
            ErrorCode::NotInactive => "NOT_INACTIVE",
            ErrorCode::AlreadyRunning => "ALREADY_RUNNING",
            ErrorCode::NotRunning => "NOT_RUNNING",
        };
        write!(f, "{}", s)
    }
}

/// Standard domain error with code, message, and optional details.
#[derive(Debug, Clone)]
pub struct DomainError {
    pub code: ErrorCode,
    pub message: String,
    pub details: HashMap<String, String>,
}

impl DomainError {
    /// Creates a new domain error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: HashMap::new(),
        }
    }

    /// Creates a validation error for a specific field.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValidationFailed, message).with_detail("field", field.into())
    }

    /// Adds a detail to the error.
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl Error for DomainError {}

impl From<InvalidStateError> for DomainError {
    fn from(err: InvalidStateError) -> Self {
        DomainError::new(ErrorCode::InvalidState, err.to_string())
            .with_detail("entity", err.entity.to_string())
            .with_detail("stage", err.stage.to_string())
    }
}

impl From<ValidationError> for DomainError {
    fn from(err: ValidationError) -> Self {
        DomainError::new(ErrorCode::ValidationFailed, err.to_string())
    }
}
