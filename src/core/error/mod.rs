//! Application error carried across the library boundary.
//!
//! Every failure that stops an invocation before or while it spawns becomes an
//! [`AppError`] with a stable `FUS-*` code. A tool exiting non-zero is not an
//! error; it is reported through the execution status.

use crate::core::types::{ErrorCategory, ErrorSeverity};
use std::collections::BTreeMap;

#[derive(Debug)]
pub struct AppError {
    pub category: ErrorCategory,
    pub severity: ErrorSeverity,
    pub code: String,
    pub message: String,
    /// Sorted so reports are stable.
    pub context: BTreeMap<String, String>,
    pub hints: Vec<String>,
    pub source: Option<anyhow::Error>,
}

impl AppError {
    pub fn new<T: Into<String>>(category: ErrorCategory, message: T) -> Self {
        let severity = match category {
            ErrorCategory::Unknown => ErrorSeverity::Warning,
            _ => ErrorSeverity::Error,
        };
        AppError {
            category,
            severity,
            code: default_code(category).to_string(),
            message: message.into(),
            context: BTreeMap::new(),
            hints: Vec::new(),
            source: None,
        }
    }

    pub fn with_code<T: Into<String>>(mut self, code: T) -> Self {
        self.code = code.into();
        self
    }

    pub fn with_suggestion<T: Into<String>>(mut self, hint: T) -> Self {
        self.hints.push(hint.into());
        self
    }

    pub fn add_context(&mut self, key: &str, value: &str) {
        self.context.insert(key.to_string(), value.to_string());
    }

    pub fn severity(&self) -> ErrorSeverity {
        self.severity
    }

    pub fn is_validation(&self) -> bool {
        self.category == ErrorCategory::ValidationError
    }
}

fn default_code(category: ErrorCategory) -> &'static str {
    match category {
        ErrorCategory::ValidationError => "FUS-PARAM-000",
        ErrorCategory::ToolExecutionError => "FUS-RUN-000",
        ErrorCategory::SerializationError => "FUS-SER-000",
        ErrorCategory::IoError => "FUS-IO-000",
        ErrorCategory::InternalError | ErrorCategory::Unknown => "FUS-INT-000",
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}: {}", self.code, self.category, self.message)?;
        if !self.context.is_empty() {
            let rendered: Vec<String> = self
                .context
                .iter()
                .map(|(key, value)| format!("{}={}", key, value))
                .collect();
            write!(f, " ({})", rendered.join(", "))?;
        }
        Ok(())
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|err| &**err as &(dyn std::error::Error + 'static))
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        let mut error = AppError::new(ErrorCategory::IoError, err.to_string());
        error.source = Some(err.into());
        error
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        let mut error = AppError::new(ErrorCategory::InternalError, format!("{:#}", err));
        error.source = Some(err);
        error
    }
}

pub trait ErrorReporter {
    fn report_error(&self, error: &AppError);
    fn report_warning(&self, message: &str, context: Option<String>);
}

/// Writes diagnostics to stderr for the `fusion` binary.
#[derive(Debug, Default)]
pub struct DefaultErrorReporter;

impl ErrorReporter for DefaultErrorReporter {
    fn report_error(&self, error: &AppError) {
        eprintln!("[ERROR] {}: {}", error.code, error.message);
        for (key, value) in &error.context {
            eprintln!("  {}: {}", key, value);
        }
        for hint in &error.hints {
            eprintln!("  Hint: {}", hint);
        }
    }

    fn report_warning(&self, message: &str, context: Option<String>) {
        eprintln!("[WARNING] {}", message);
        if let Some(context) = context {
            eprintln!("  {}", context);
        }
    }
}
