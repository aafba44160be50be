//! Integration tests for configuration module

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

use super::{CliOverrides, ConfigManager, DEFAULT_INTERVAL_SECS};

fn overrides(tmp: &TempDir) -> CliOverrides {
    let source = tmp.path().join("source");
    fs::create_dir_all(&source).unwrap();
    CliOverrides {
        source,
        replica: tmp.path().join("replica"),
        log_file: Some(tmp.path().join("sync.log")),
        ..CliOverrides::default()
    }
}

#[test]
fn test_full_config_workflow() {
    let tmp = TempDir::new().unwrap();
    let config_file = tmp.path().join("config.toml");
    fs::write(
        &config_file,
        r"
interval = 15
dry_run = true
quiet = true
",
    )
    .unwrap();

    let settings = ConfigManager::load(overrides(&tmp), Some(&config_file), false).unwrap();

    assert_eq!(settings.interval_secs, 15);
    assert!(settings.dry_run);
    assert!(settings.quiet);
    assert_eq!(settings.log_file, tmp.path().join("sync.log"));
}

#[test]
fn test_no_config_ignores_explicit_file() {
    let tmp = TempDir::new().unwrap();
    let config_file = tmp.path().join("config.toml");
    fs::write(&config_file, "interval = 15\n").unwrap();

    let settings = ConfigManager::load(overrides(&tmp), Some(&config_file), true).unwrap();

    assert_eq!(settings.interval_secs, DEFAULT_INTERVAL_SECS);
}

#[test]
fn test_invalid_config_validation() {
    let tmp = TempDir::new().unwrap();
    let config_file = tmp.path().join("config.toml");
    fs::write(&config_file, "interval = 0\n").unwrap();

    let result = ConfigManager::load(overrides(&tmp), Some(&config_file), false);

    assert!(result.is_err());
}

#[test]
fn test_unknown_key_is_rejected() {
    let tmp = TempDir::new().unwrap();
    let config_file = tmp.path().join("config.toml");
    fs::write(&config_file, "replica = \"/elsewhere\"\n").unwrap();

    let result = ConfigManager::load(overrides(&tmp), Some(&config_file), false);

    assert!(result.is_err());
}

#[test]
fn test_log_file_from_config_file() {
    let tmp = TempDir::new().unwrap();
    let config_file = tmp.path().join("config.toml");
    let log_path = tmp.path().join("logs/from-config.log");
    fs::write(
        &config_file,
        format!("log_file = {:?}\n", log_path.display().to_string()),
    )
    .unwrap();
    let cli = CliOverrides {
        log_file: None,
        ..overrides(&tmp)
    };

    let settings = ConfigManager::load(cli, Some(&config_file), false).unwrap();

    assert_eq!(settings.log_file, PathBuf::from(&log_path));
}
