#![allow(clippy::result_large_err)]

use super::FusionConfig;
use crate::core::error::AppError;
use crate::core::types::ErrorCategory;
use std::env;
use std::path::{Path, PathBuf};

pub struct ConfigLoader;

impl ConfigLoader {
    /// Default location: `<user config dir>/fusion-processing/config.toml`.
    pub fn default_path() -> Option<PathBuf> {
        dirs_next::config_dir().map(|dir| dir.join("fusion-processing").join("config.toml"))
    }

    /// Load config from an explicit path, or the default location.
    /// An explicit path must exist; a missing default file means defaults.
    /// Environment variables override file values.
    pub fn load(explicit: Option<&Path>) -> Result<FusionConfig, AppError> {
        let mut config = match explicit {
            Some(path) => Self::load_from_file(path)?.ok_or_else(|| {
                let mut err = AppError::new(
                    ErrorCategory::IoError,
                    format!("config file {} does not exist", path.display()),
                )
                .with_code("FUS-CFG-001");
                err.add_context("path", &path.display().to_string());
                err
            })?,
            None => match Self::default_path() {
                Some(path) => Self::load_from_file(&path)?.unwrap_or_default(),
                None => FusionConfig::default(),
            },
        };

        Self::apply_env_overrides(&mut config);

        Ok(config)
    }

    /// Load config from specific file path
    /// Returns Ok(None) if file doesn't exist
    pub fn load_from_file(path: &Path) -> Result<Option<FusionConfig>, AppError> {
        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(path).map_err(|e| {
            AppError::new(
                ErrorCategory::IoError,
                format!("Failed to read config file {}: {}", path.display(), e),
            )
            .with_code("FUS-CFG-001")
        })?;

        let config: FusionConfig = toml::from_str(&content).map_err(|e| {
            AppError::new(
                ErrorCategory::ValidationError,
                format!("Failed to parse config file {}: {}", path.display(), e),
            )
            .with_code("FUS-CFG-003")
        })?;

        Ok(Some(config))
    }

    /// Apply environment variable overrides to the configuration
    fn apply_env_overrides(config: &mut FusionConfig) {
        if let Ok(directory) = env::var("FUSION_DIRECTORY") {
            config.install.directory = PathBuf::from(directory.trim());
        }

        if let Ok(verbose) = env::var("FUSION_VERBOSE") {
            match parse_bool(&verbose) {
                Some(verbose) => config.execution.verbose = verbose,
                None => tracing::warn!("ignoring FUSION_VERBOSE='{}': expected true or false", verbose),
            }
        }

        if let Ok(scratch_dir) = env::var("FUSION_SCRATCH_DIR") {
            if !scratch_dir.trim().is_empty() {
                config.execution.scratch_dir = PathBuf::from(scratch_dir.trim());
            }
        }

        if let Ok(timeout) = env::var("FUSION_TIMEOUT") {
            config.execution.timeout = Some(timeout);
        }
    }

    /// Get documentation for supported environment variables
    pub fn env_var_documentation() -> &'static [&'static str] {
        &[
            "FUSION_DIRECTORY - Override the FUSION install directory",
            "FUSION_VERBOSE - Log full tool output after each run (true/false)",
            "FUSION_SCRATCH_DIR - Override the scratch directory for list files and generated outputs",
            "FUSION_TIMEOUT - Kill tools that run longer than this (e.g. 90s, 10m)",
            "FUSION_LOG_LEVEL - Override logging.default_level",
            "FUSION_LOG_DIR - Override logging.log_dir",
            "FUSION_LOG_FILE - Enable or disable the log file (true/false)",
        ]
    }
}

pub(crate) fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
