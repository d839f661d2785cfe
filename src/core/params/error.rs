use crate::core::error::AppError;
use crate::core::types::ErrorCategory;
use thiserror::Error;

/// Problems found while checking caller-supplied values against a tool's declarations.
///
/// All of these are raised before any file is written or process spawned.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParameterError {
    #[error("tool '{tool}' has no parameter named '{key}'")]
    Unknown { tool: String, key: String },

    #[error("parameter '{key}' is required")]
    Missing { key: String },

    #[error("parameter '{key}' expects {expected}, got {found}")]
    InvalidValue {
        key: String,
        expected: String,
        found: String,
    },

    #[error("parameter '{key}' value {value} is outside {bounds}")]
    OutOfRange {
        key: String,
        value: String,
        bounds: String,
    },

    #[error("parameter '{key}' file '{path}' must have extension {allowed}")]
    InvalidExtension {
        key: String,
        path: String,
        allowed: String,
    },

    #[error("parameter '{key}' accepts a single file, got {count}")]
    TooManyFiles { key: String, count: usize },

    #[error("parameter '{key}' is not a valid extent: {reason}")]
    InvalidExtent { key: String, reason: String },

    #[error("parameters '{first}' and '{second}' are mutually exclusive")]
    MutuallyExclusive { first: String, second: String },

    #[error("parameter '{key}' requires '{requires}' to be set")]
    MissingDependency { key: String, requires: String },
}

impl ParameterError {
    /// Stable diagnostic code reported alongside the message.
    pub fn code(&self) -> &'static str {
        match self {
            ParameterError::Unknown { .. } => "FUS-PARAM-001",
            ParameterError::Missing { .. } => "FUS-PARAM-002",
            ParameterError::InvalidValue { .. } => "FUS-PARAM-003",
            ParameterError::OutOfRange { .. } => "FUS-PARAM-004",
            ParameterError::InvalidExtension { .. } => "FUS-PARAM-005",
            ParameterError::TooManyFiles { .. } => "FUS-PARAM-006",
            ParameterError::InvalidExtent { .. } => "FUS-PARAM-007",
            ParameterError::MutuallyExclusive { .. } => "FUS-PARAM-008",
            ParameterError::MissingDependency { .. } => "FUS-PARAM-009",
        }
    }

    /// Key of the offending parameter, the first one for pair errors.
    pub fn key(&self) -> &str {
        match self {
            ParameterError::Unknown { key, .. }
            | ParameterError::Missing { key }
            | ParameterError::InvalidValue { key, .. }
            | ParameterError::OutOfRange { key, .. }
            | ParameterError::InvalidExtension { key, .. }
            | ParameterError::TooManyFiles { key, .. }
            | ParameterError::InvalidExtent { key, .. }
            | ParameterError::MissingDependency { key, .. } => key,
            ParameterError::MutuallyExclusive { first, .. } => first,
        }
    }

    pub(crate) fn invalid(key: &str, expected: &str, found: impl ToString) -> Self {
        ParameterError::InvalidValue {
            key: key.to_string(),
            expected: expected.to_string(),
            found: found.to_string(),
        }
    }
}

impl From<ParameterError> for AppError {
    fn from(err: ParameterError) -> Self {
        let mut app = AppError::new(ErrorCategory::ValidationError, err.to_string())
            .with_code(err.code());
        app.add_context("parameter", err.key());
        app
    }
}
