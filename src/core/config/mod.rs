#![allow(clippy::result_large_err)]

use crate::core::error::AppError;
use crate::core::types::ErrorCategory;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Settings loaded from `config.toml`, environment and CLI flags.
///
/// The `[logging]` section of the same file is read by [`crate::logging`].
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct FusionConfig {
    /// Where the FUSION executables live
    #[serde(default)]
    pub install: InstallConfig,

    /// How invocations run
    #[serde(default)]
    pub execution: ExecutionConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct InstallConfig {
    /// FUSION install directory; empty means "look executables up on PATH"
    #[serde(default)]
    pub directory: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExecutionConfig {
    /// Log the full captured output after each invocation
    #[serde(default)]
    pub verbose: bool,

    /// Parent of the per-invocation scratch directories
    #[serde(default = "default_scratch_dir")]
    pub scratch_dir: PathBuf,

    /// Optional limit such as "90s" or "10m"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<String>,
}

fn default_scratch_dir() -> PathBuf {
    std::env::temp_dir().join("fusion-processing")
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        ExecutionConfig {
            verbose: false,
            scratch_dir: default_scratch_dir(),
            timeout: None,
        }
    }
}

impl ExecutionConfig {
    /// Parses the humantime timeout, if one is configured.
    pub fn timeout_duration(&self) -> Result<Option<Duration>, AppError> {
        let Some(raw) = self.timeout.as_deref().map(str::trim) else {
            return Ok(None);
        };
        if raw.is_empty() {
            return Ok(None);
        }
        let duration = humantime::parse_duration(raw).map_err(|err| {
            AppError::new(
                ErrorCategory::ValidationError,
                format!("execution.timeout '{}' is not a valid duration: {}", raw, err),
            )
            .with_code("FUS-CFG-002")
        })?;
        if duration.is_zero() {
            return Err(AppError::new(
                ErrorCategory::ValidationError,
                "execution.timeout must be greater than zero",
            )
            .with_code("FUS-CFG-002"));
        }
        Ok(Some(duration))
    }
}


pub mod loader;
pub mod validation;

pub use loader::ConfigLoader;
pub use validation::ConfigValidator;
