use fusion_processing::core::config::{ConfigLoader, ConfigValidator, FusionConfig};
use fusion_processing::core::ExecutionSettings;
use fusion_processing::logging::config::LoggingConfig;
use serial_test::serial;
use std::env;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;
use tempfile::TempDir;

fn clear_fusion_env() {
    for v in &[
        "FUSION_DIRECTORY",
        "FUSION_VERBOSE",
        "FUSION_SCRATCH_DIR",
        "FUSION_TIMEOUT",
        "FUSION_LOG_LEVEL",
        "FUSION_LOG_DIR",
        "FUSION_LOG_FILE",
    ] {
        env::remove_var(v);
    }
}

const FULL_CONFIG: &str = r#"
[install]
directory = "/opt/FUSION"

[execution]
verbose = true
scratch_dir = "/scratch/fusion"
timeout = "90s"

[logging]
default_level = "debug"
log_dir = "/var/log/fusion"
"#;

#[test]
#[serial]
fn test_full_config_file_feeds_execution_settings() {
    clear_fusion_env();
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.toml");
    fs::write(&path, FULL_CONFIG).unwrap();

    let config = ConfigLoader::load(Some(&path)).unwrap();
    assert_eq!(config.install.directory, PathBuf::from("/opt/FUSION"));
    assert!(config.execution.verbose);
    assert!(ConfigValidator::validate(&config).is_ok());

    let settings = ExecutionSettings::from_config(&config).unwrap();
    assert_eq!(settings.install_dir, PathBuf::from("/opt/FUSION"));
    assert_eq!(settings.scratch_dir, PathBuf::from("/scratch/fusion"));
    assert_eq!(settings.timeout, Some(Duration::from_secs(90)));
    assert!(settings.verbose);

    let logging = LoggingConfig::load(Some(&path)).unwrap();
    assert_eq!(logging.default_level, "debug");
    assert_eq!(logging.log_dir, Some(PathBuf::from("/var/log/fusion")));
}

#[test]
#[serial]
fn test_environment_overrides_file_values() {
    clear_fusion_env();
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.toml");
    fs::write(&path, FULL_CONFIG).unwrap();

    env::set_var("FUSION_DIRECTORY", "/mnt/c/FUSION");
    env::set_var("FUSION_VERBOSE", "false");
    env::set_var("FUSION_TIMEOUT", "2m");
    let config = ConfigLoader::load(Some(&path)).unwrap();
    clear_fusion_env();

    assert_eq!(config.install.directory, PathBuf::from("/mnt/c/FUSION"));
    assert!(!config.execution.verbose);
    assert_eq!(config.execution.scratch_dir, PathBuf::from("/scratch/fusion"));
    assert_eq!(
        config.execution.timeout_duration().unwrap(),
        Some(Duration::from_secs(120))
    );
}

#[test]
#[serial]
fn test_missing_explicit_file_is_an_error() {
    clear_fusion_env();
    let temp_dir = TempDir::new().unwrap();
    let err = ConfigLoader::load(Some(&temp_dir.path().join("absent.toml"))).unwrap_err();
    assert_eq!(err.code, "FUS-CFG-001");
}

#[test]
#[serial]
fn test_invalid_timeout_is_rejected_before_running() {
    clear_fusion_env();
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.toml");
    fs::write(&path, "[execution]\ntimeout = \"soon\"\n").unwrap();

    let config = ConfigLoader::load(Some(&path)).unwrap();
    assert_eq!(ConfigValidator::validate(&config).unwrap_err().code, "FUS-CFG-002");
    assert_eq!(ExecutionSettings::from_config(&config).unwrap_err().code, "FUS-CFG-002");
}

#[test]
#[serial]
fn test_missing_install_directory_only_warns() {
    clear_fusion_env();
    let mut config = FusionConfig::default();
    config.install.directory = PathBuf::from("/nonexistent/FUSION");

    assert!(ConfigValidator::validate(&config).is_ok());
    let warnings = ConfigValidator::warnings(&config);
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].contains("/nonexistent/FUSION"));
}

#[cfg(target_os = "linux")]
#[test]
#[serial]
fn test_default_location_under_config_home() {
    clear_fusion_env();
    let temp_dir = TempDir::new().unwrap();
    let previous = env::var_os("XDG_CONFIG_HOME");
    env::set_var("XDG_CONFIG_HOME", temp_dir.path());

    let expected = temp_dir.path().join("fusion-processing").join("config.toml");
    assert_eq!(ConfigLoader::default_path(), Some(expected.clone()));

    let defaults = ConfigLoader::load(None).unwrap();
    fs::create_dir_all(expected.parent().unwrap()).unwrap();
    fs::write(&expected, "[install]\ndirectory = \"/srv/FUSION\"\n").unwrap();
    let loaded = ConfigLoader::load(None).unwrap();

    match previous {
        Some(value) => env::set_var("XDG_CONFIG_HOME", value),
        None => env::remove_var("XDG_CONFIG_HOME"),
    }

    assert_eq!(defaults, FusionConfig::default());
    assert_eq!(loaded.install.directory, PathBuf::from("/srv/FUSION"));
}
