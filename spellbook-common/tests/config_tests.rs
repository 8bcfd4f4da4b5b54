//! Tests for configuration loading and database URL resolution
//!
//! Note: Uses serial_test crate to prevent ENV variable race conditions.
//! Tests that manipulate SPELLBOOK_DBURL are marked with #[serial].

use serial_test::serial;
use spellbook_common::config::{
    default_database_url, resolve_database_url_with, TomlConfig, DATABASE_URL_ENV,
};
use std::env;
use std::path::PathBuf;
use tempfile::TempDir;

fn toml_with_url(url: &str) -> TomlConfig {
    TomlConfig {
        database_url: Some(url.to_string()),
        ..TomlConfig::default()
    }
}

#[test]
#[serial]
fn test_cli_argument_has_highest_priority() {
    env::set_var(DATABASE_URL_ENV, "sqlite://from-env.db");

    let url = resolve_database_url_with(
        Some("sqlite://from-cli.db"),
        DATABASE_URL_ENV,
        &toml_with_url("sqlite://from-toml.db"),
    )
    .unwrap();

    assert_eq!(url, "sqlite://from-cli.db");
    env::remove_var(DATABASE_URL_ENV);
}

#[test]
#[serial]
fn test_env_var_beats_toml() {
    env::set_var(DATABASE_URL_ENV, "sqlite://from-env.db");

    let url =
        resolve_database_url_with(None, DATABASE_URL_ENV, &toml_with_url("sqlite://from-toml.db"))
            .unwrap();

    assert_eq!(url, "sqlite://from-env.db");
    env::remove_var(DATABASE_URL_ENV);
}

#[test]
#[serial]
fn test_toml_used_when_env_missing() {
    env::remove_var(DATABASE_URL_ENV);

    let url =
        resolve_database_url_with(None, DATABASE_URL_ENV, &toml_with_url("sqlite://from-toml.db"))
            .unwrap();

    assert_eq!(url, "sqlite://from-toml.db");
}

#[test]
#[serial]
fn test_blank_values_fall_through_to_default() {
    env::set_var(DATABASE_URL_ENV, "   ");

    let url = resolve_database_url_with(Some(""), DATABASE_URL_ENV, &toml_with_url(""))
        .unwrap();

    assert_eq!(url, default_database_url().unwrap());
    env::remove_var(DATABASE_URL_ENV);
}

#[test]
fn test_default_url_is_sqlite_file() {
    let url = default_database_url().unwrap();
    assert!(url.starts_with("sqlite://"));
    assert!(url.ends_with("spellbook.db"));
}

#[test]
fn test_toml_config_parses_all_fields() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        r#"
database_url = "sqlite:///srv/spellbook.db"
catalog_path = "/srv/spells.json"
port = 9000
"#,
    )
    .unwrap();

    let config = TomlConfig::from_file(&path).unwrap();
    assert_eq!(config.database_url.as_deref(), Some("sqlite:///srv/spellbook.db"));
    assert_eq!(config.catalog_path, Some(PathBuf::from("/srv/spells.json")));
    assert_eq!(config.port, Some(9000));
}

#[test]
fn test_toml_config_missing_keys_are_none() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "port = 8000\n").unwrap();

    let config = TomlConfig::from_file(&path).unwrap();
    assert_eq!(config.database_url, None);
    assert_eq!(config.catalog_path, None);
    assert_eq!(config.port, Some(8000));
}

#[test]
fn test_toml_config_invalid_file_is_config_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "port = \"not a number\"\n").unwrap();

    let err = TomlConfig::from_file(&path).unwrap_err();
    assert!(matches!(err, spellbook_common::Error::Config(_)));
}
