//! Integration tests for ConfigManager and logging preparation
//!
//! These tests verify:
//! - Settings loading and saving
//! - Defaults for missing files and missing keys
//! - Invalid YAML is reported as an error
//! - Log directory and file creation from loaded settings

use camino::Utf8PathBuf;
use latexwp::config::{SETTINGS_FILE_NAME, load_settings_or_default};
use latexwp::logging::prepare_log_file;
use latexwp::{ConfigManager, Settings};
use std::fs;
use tempfile::TempDir;

fn create_test_config_dir() -> (TempDir, Utf8PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let config_path = Utf8PathBuf::try_from(temp_dir.path().to_path_buf()).unwrap();
    (temp_dir, config_path)
}

#[test]
fn test_create_config_manager() {
    let (_temp_dir, config_path) = create_test_config_dir();
    let manager = ConfigManager::new(&config_path).unwrap();

    assert_eq!(manager.config_dir(), &config_path);
}

#[test]
fn test_config_dir_created_if_missing() {
    let (_temp_dir, config_path) = create_test_config_dir();
    let nested = config_path.join("LatexWP Data");

    let manager = ConfigManager::new(&nested).unwrap();

    assert!(nested.is_dir());
    assert_eq!(manager.config_dir(), &nested);
}

#[test]
fn test_load_default_settings() {
    let (_temp_dir, config_path) = create_test_config_dir();
    let manager = ConfigManager::new(&config_path).unwrap();

    let settings = manager.load_settings().unwrap();

    assert!(settings.terminal_logging);
    assert_eq!(settings.log_file, "error.log");
    assert_eq!(settings.word_count_exe, "texcount");
    assert_eq!(settings.timeout(), None);
}

#[test]
fn test_load_settings_from_yaml() {
    let (_temp_dir, config_path) = create_test_config_dir();
    fs::write(
        config_path.join(SETTINGS_FILE_NAME),
        r#"LatexWP_Settings:
  Terminal Logging: false
  Log Directory: out/logs
  Log File: latexwp.log
  Word Count EXE: /usr/local/texlive/bin/texcount
  Word Count Timeout: 20
  Debug Mode: true
"#,
    )
    .unwrap();

    let manager = ConfigManager::new(&config_path).unwrap();
    let settings = manager.load_settings().unwrap();

    assert!(!settings.terminal_logging);
    assert_eq!(settings.log_path(), Utf8PathBuf::from("out/logs/latexwp.log"));
    assert_eq!(settings.word_count_exe, "/usr/local/texlive/bin/texcount");
    assert_eq!(settings.word_count_timeout, 20);
    assert!(settings.debug_mode);
}

#[test]
fn test_settings_round_trip() {
    let (_temp_dir, config_path) = create_test_config_dir();
    let manager = ConfigManager::new(&config_path).unwrap();

    let settings = Settings {
        log_dir: Utf8PathBuf::from("custom"),
        word_count_exe: "texcount.pl".to_string(),
        ..Settings::default()
    };
    manager.save_settings(&settings).unwrap();

    assert!(manager.settings_path().exists());
    assert_eq!(manager.load_settings().unwrap(), settings);
}

#[test]
fn test_invalid_yaml_is_an_error() {
    let (_temp_dir, config_path) = create_test_config_dir();
    fs::write(
        config_path.join(SETTINGS_FILE_NAME),
        "LatexWP_Settings:\n  Terminal Logging: [not, a, bool\n",
    )
    .unwrap();

    let manager = ConfigManager::new(&config_path).unwrap();
    let err = manager.load_settings().unwrap_err();

    assert!(format!("{:#}", err).contains("Failed to parse settings"));
}

#[test]
fn test_malformed_settings_fall_back_to_defaults() {
    let (_temp_dir, config_path) = create_test_config_dir();
    fs::write(
        config_path.join(SETTINGS_FILE_NAME),
        "LatexWP_Settings:\n  Terminal Logging: [oops\n",
    )
    .unwrap();

    let (settings, load_error) = load_settings_or_default(&config_path);

    assert_eq!(settings, Settings::default());
    let err = load_error.expect("load failure should be handed back");
    assert!(format!("{:#}", err).contains("Failed to parse settings"));
}

#[test]
fn test_valid_settings_load_without_error() {
    let (_temp_dir, config_path) = create_test_config_dir();
    fs::write(
        config_path.join(SETTINGS_FILE_NAME),
        "LatexWP_Settings:\n  Word Count Timeout: 5\n",
    )
    .unwrap();

    let (settings, load_error) = load_settings_or_default(&config_path);

    assert!(load_error.is_none());
    assert_eq!(settings.word_count_timeout, 5);
}

#[test]
fn test_log_file_prepared_from_settings() {
    let (_temp_dir, config_path) = create_test_config_dir();
    let settings = Settings {
        log_dir: config_path.join("log"),
        ..Settings::default()
    };

    let log_path = prepare_log_file(&settings).unwrap();

    assert_eq!(log_path, config_path.join("log").join("error.log"));
    assert!(log_path.is_file());
}
