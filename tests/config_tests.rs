// ABOUTME: Tests for configuration loading and validation
// ABOUTME: Verifies TOML file loading, env var overrides, and rejection of bad values

use pressroom::config::{Config, CONFIG_PATH_ENV};
use serial_test::serial;
use std::io::Write;
use std::path::PathBuf;

/// Helper to clear all config-related env vars
fn clear_config_env_vars() {
    for var in [
        CONFIG_PATH_ENV,
        "PRESSROOM_HOST",
        "PRESSROOM_PORT",
        "PRESSROOM_DATABASE",
        "PRESSROOM_UPLOAD_DIR",
        "PRESSROOM_MAX_UPLOAD_BYTES",
        "PRESSROOM_ADMIN_USERNAME",
        "PRESSROOM_ADMIN_PASSWORD",
        "PRESSROOM_LOG_DIR",
    ] {
        std::env::remove_var(var);
    }
}

fn write_config(dir: &tempfile::TempDir, content: &str) -> PathBuf {
    let path = dir.path().join("pressroom.toml");
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(content.as_bytes()).unwrap();
    path
}

#[test]
#[serial]
fn test_defaults_without_file() {
    clear_config_env_vars();

    let config = Config::load_from(None).unwrap();
    assert_eq!(config.bind_addr(), "127.0.0.1:5000");
    assert_eq!(config.storage.database_path, PathBuf::from("media.db"));
    assert_eq!(config.storage.upload_dir, PathBuf::from("static/uploads"));
    assert_eq!(config.storage.max_upload_bytes, 16 * 1024 * 1024);
    assert_eq!(config.admin.username, "admin");
    assert_eq!(config.admin.password, "admin123");
    assert!(config.logging.dir.is_none());
}

#[test]
#[serial]
fn test_config_loads_from_toml_file() {
    clear_config_env_vars();

    let dir = tempfile::tempdir().unwrap();
    let path = write_config(
        &dir,
        r#"
[server]
host = "0.0.0.0"
port = 8080

[storage]
database_path = "/var/lib/pressroom/media.db"
upload_dir = "/var/lib/pressroom/uploads"

[admin]
username = "comms"
password = "s3cret"

[logging]
dir = "/var/log/pressroom"
"#,
    );

    let config = Config::load_from(Some(&path)).unwrap();
    assert_eq!(config.bind_addr(), "0.0.0.0:8080");
    assert_eq!(
        config.storage.database_path,
        PathBuf::from("/var/lib/pressroom/media.db")
    );
    assert_eq!(config.admin.username, "comms");
    assert_eq!(config.admin.password, "s3cret");
    assert_eq!(config.logging.dir, Some(PathBuf::from("/var/log/pressroom")));
    // Unset keys keep their defaults
    assert_eq!(config.storage.max_upload_bytes, 16 * 1024 * 1024);
}

#[test]
#[serial]
fn test_config_path_env_is_honoured() {
    clear_config_env_vars();

    let dir = tempfile::tempdir().unwrap();
    let path = write_config(&dir, "[server]\nport = 9100\n");
    std::env::set_var(CONFIG_PATH_ENV, &path);

    let config = Config::load().unwrap();
    assert_eq!(config.server.port, 9100);

    clear_config_env_vars();
}

#[test]
#[serial]
fn test_env_vars_override_file() {
    clear_config_env_vars();

    let dir = tempfile::tempdir().unwrap();
    let path = write_config(&dir, "[server]\nport = 8080\n\n[admin]\nusername = \"file-user\"\n");

    std::env::set_var("PRESSROOM_PORT", "9000");
    std::env::set_var("PRESSROOM_ADMIN_USERNAME", "env-user");
    std::env::set_var("PRESSROOM_DATABASE", "/tmp/override.db");
    std::env::set_var("PRESSROOM_MAX_UPLOAD_BYTES", "1024");
    std::env::set_var("PRESSROOM_LOG_DIR", "/tmp/pressroom-logs");

    let config = Config::load_from(Some(&path)).unwrap();
    assert_eq!(config.server.port, 9000);
    assert_eq!(config.admin.username, "env-user");
    assert_eq!(config.storage.database_path, PathBuf::from("/tmp/override.db"));
    assert_eq!(config.storage.max_upload_bytes, 1024);
    assert_eq!(config.logging.dir, Some(PathBuf::from("/tmp/pressroom-logs")));

    clear_config_env_vars();
}

#[test]
#[serial]
fn test_invalid_port_env_is_rejected() {
    clear_config_env_vars();
    std::env::set_var("PRESSROOM_PORT", "not-a-port");

    let err = Config::load_from(None).unwrap_err();
    assert!(err.to_string().contains("PRESSROOM_PORT"));

    clear_config_env_vars();
}

#[test]
#[serial]
fn test_empty_admin_password_is_rejected() {
    clear_config_env_vars();
    std::env::set_var("PRESSROOM_ADMIN_PASSWORD", "");

    let err = Config::load_from(None).unwrap_err();
    assert!(err.to_string().contains("admin.password"));

    clear_config_env_vars();
}

#[test]
#[serial]
fn test_missing_config_file_is_an_error() {
    clear_config_env_vars();

    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.toml");
    assert!(Config::load_from(Some(&missing)).is_err());
}

#[test]
#[serial]
fn test_malformed_toml_is_an_error() {
    clear_config_env_vars();

    let dir = tempfile::tempdir().unwrap();
    let path = write_config(&dir, "[server\nport = ");
    assert!(Config::load_from(Some(&path)).is_err());
}
