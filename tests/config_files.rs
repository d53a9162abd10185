//! Loading movement tuning from TOML files.

use std::fs;
use std::path::PathBuf;

use approx::assert_relative_eq;
use tilehop::{ConfigError, MovementConfig};

fn demo_config() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("demos/movement.toml")
}

fn scratch_file(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("tilehop-{}-{name}", std::process::id()));
    fs::write(&path, contents).expect("write scratch config");
    path
}

#[test]
fn demo_config_matches_defaults() {
    let config = MovementConfig::load(demo_config()).expect("demo config loads");
    assert_eq!(config, MovementConfig::default());
}

#[test]
fn partial_file_keeps_other_defaults() {
    let path = scratch_file("partial.toml", "gravity = 900.0\ncoyote_time_ms = 80.0\n");
    let config = MovementConfig::load(&path).expect("partial config loads");
    fs::remove_file(&path).expect("remove scratch config");
    assert_relative_eq!(config.gravity, 900.0);
    assert_relative_eq!(config.coyote_time_ms, 80.0);
    assert_relative_eq!(config.move_speed, MovementConfig::default().move_speed);
}

#[test]
fn missing_file_is_an_io_error() {
    let path = std::env::temp_dir().join("tilehop-does-not-exist.toml");
    let error = MovementConfig::load(&path).expect_err("missing file should fail");
    assert!(matches!(error, ConfigError::Io { .. }), "got {error:?}");
}

#[test]
fn invalid_values_are_rejected_on_load() {
    let path = scratch_file("upward.toml", "jump_velocity = 250.0\n");
    let error = MovementConfig::load(&path).expect_err("positive jump velocity");
    fs::remove_file(&path).expect("remove scratch config");
    assert!(
        matches!(error, ConfigError::Invalid { field: "jump_velocity", .. }),
        "got {error:?}"
    );
}

#[test]
fn unknown_keys_are_parse_errors() {
    let error = MovementConfig::from_toml_str("gravitee = 3.0").expect_err("typo");
    assert!(matches!(error, ConfigError::Parse(_)), "got {error:?}");
}
