#![allow(clippy::result_large_err)]

use super::FusionConfig;
use crate::core::error::AppError;
use crate::core::types::ErrorCategory;

pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate configuration rules
    pub fn validate(config: &FusionConfig) -> Result<(), AppError> {
        if config.execution.scratch_dir.as_os_str().is_empty() {
            return Err(AppError::new(
                ErrorCategory::ValidationError,
                "execution.scratch_dir cannot be empty",
            )
            .with_code("FUS-CFG-002"));
        }

        config.execution.timeout_duration()?;

        Ok(())
    }

    /// Problems that do not stop a run but are worth reporting.
    pub fn warnings(config: &FusionConfig) -> Vec<String> {
        let mut warnings = Vec::new();
        let directory = &config.install.directory;
        if directory.as_os_str().is_empty() {
            warnings.push(
                "install.directory is not set; FUSION executables must be on PATH".to_string(),
            );
        } else if !directory.is_dir() {
            warnings.push(format!(
                "install.directory {} does not exist or is not a directory",
                directory.display()
            ));
        }
        warnings
    }
}
