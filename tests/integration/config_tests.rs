//! Configuration loading and validation tests

use std::io::Write;

use anyhow::Result;
use tempfile::NamedTempFile;

use pulsemetrics_rs::Config;
use pulsemetrics_rs::config::{EngineConfig, Validate};

#[test]
fn test_defaults_match_documented_constants() {
    let config = EngineConfig::default();

    assert_eq!(config.placeholders.total_users, 10_500);
    assert_eq!(config.placeholders.session_hours_per_active_user, 8.5);
    assert_eq!(config.capacity.connect_licences, 10_000);
    assert_eq!(config.capacity.workbench_licences, 5_000);
    assert_eq!(config.windows.active_within_days, 7);
    assert_eq!(config.windows.dormant_after_days, 60);
    assert_eq!(config.windows.frequency_window_days, None);
    assert!(config.cache.enabled);
    assert_eq!(config.cache.max_snapshots, 64);
    assert_eq!(config.logging.level, "info");
}

#[test]
fn test_from_file_applies_overrides() -> Result<()> {
    let mut file = NamedTempFile::new()?;
    writeln!(
        file,
        "placeholders:\n  total_users: 12000\ncapacity:\n  connect_licences: 8000\nwindows:\n  frequency_window_days: 30\n"
    )?;

    let config = Config::from_file(file.path())?;
    assert_eq!(config.engine.placeholders.total_users, 12_000);
    assert_eq!(config.engine.capacity.connect_licences, 8_000);
    assert_eq!(config.engine.windows.frequency_window_days, Some(30));
    // Untouched sections keep their defaults
    assert_eq!(config.engine.capacity.workbench_licences, 5_000);
    Ok(())
}

#[test]
fn test_from_file_rejects_unreadable_path() {
    assert!(Config::from_file("definitely/not/a/real/config.yaml").is_err());
}

#[test]
fn test_from_file_rejects_invalid_yaml() -> Result<()> {
    let mut file = NamedTempFile::new()?;
    writeln!(file, "placeholders: [not, a, mapping")?;

    assert!(Config::from_file(file.path()).is_err());
    Ok(())
}

#[test]
fn test_from_file_rejects_semantic_violations() -> Result<()> {
    let mut file = NamedTempFile::new()?;
    writeln!(
        file,
        "windows:\n  active_within_days: 60\n  dormant_after_days: 7\n"
    )?;

    assert!(Config::from_file(file.path()).is_err());
    Ok(())
}

#[test]
fn test_env_overrides() -> Result<()> {
    // SAFETY: this is the only test in the binary touching PULSE_* vars,
    // and it restores them before returning.
    unsafe {
        std::env::set_var("PULSE_TOTAL_USERS", "9000");
        std::env::set_var("PULSE_CACHE_ENABLED", "false");
    }

    let config = Config::from_env()?;
    assert_eq!(config.engine.placeholders.total_users, 9_000);
    assert!(!config.engine.cache.enabled);

    unsafe {
        std::env::remove_var("PULSE_TOTAL_USERS");
        std::env::remove_var("PULSE_CACHE_ENABLED");
    }
    Ok(())
}

#[test]
fn test_validation_trait_surface() {
    let mut config = EngineConfig::default();
    assert!(config.validate().is_ok());

    config.cache.max_snapshots = 0;
    assert!(config.validate().is_err());
}
