//! Integration tests for configuration loading and environment overrides.

use episodic::config::{load_config, load_config_or_default, ENV_DB_PATH, ENV_REMOTE_URL};
use serial_test::serial;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn write_config(dir: &Path, content: &str) -> std::path::PathBuf {
    let path = dir.join("episodic.toml");
    fs::write(&path, content).unwrap();
    path
}

fn clear_env() {
    std::env::remove_var(ENV_DB_PATH);
    std::env::remove_var(ENV_REMOTE_URL);
}

#[test]
#[serial]
fn load_full_config() {
    clear_env();
    let dir = tempdir().unwrap();
    let path = write_config(
        dir.path(),
        r#"
[server]
host = "127.0.0.1"
port = 9090
static_dir = "./web/build"

[storage]
db_path = "/var/lib/episodic/catalog.db"
remote_url = "https://catalog.example.com"
remote_timeout_secs = 3
"#,
    );

    let config = load_config(&path).unwrap();
    assert_eq!(config.server.host, "127.0.0.1");
    assert_eq!(config.server.port, 9090);
    assert_eq!(
        config.storage.db_path.as_deref(),
        Some(Path::new("/var/lib/episodic/catalog.db"))
    );
    assert_eq!(
        config.storage.remote_url.as_deref(),
        Some("https://catalog.example.com")
    );
    assert_eq!(config.storage.remote_timeout_secs, 3);
}

#[test]
#[serial]
fn env_overrides_file_values() {
    clear_env();
    let dir = tempdir().unwrap();
    let path = write_config(
        dir.path(),
        "[storage]\ndb_path = \"/from/file.db\"\n",
    );

    std::env::set_var(ENV_DB_PATH, "/from/env.db");
    std::env::set_var(ENV_REMOTE_URL, "http://peer:8080");
    let config = load_config(&path).unwrap();
    clear_env();

    assert_eq!(
        config.storage.db_path.as_deref(),
        Some(Path::new("/from/env.db"))
    );
    assert_eq!(config.storage.remote_url.as_deref(), Some("http://peer:8080"));
}

#[test]
#[serial]
fn empty_env_value_is_ignored() {
    clear_env();
    let dir = tempdir().unwrap();
    let path = write_config(dir.path(), "[storage]\ndb_path = \"/from/file.db\"\n");

    std::env::set_var(ENV_DB_PATH, "  ");
    let config = load_config(&path).unwrap();
    clear_env();

    assert_eq!(
        config.storage.db_path.as_deref(),
        Some(Path::new("/from/file.db"))
    );
}

#[test]
#[serial]
fn invalid_env_remote_fails_validation() {
    clear_env();
    let dir = tempdir().unwrap();
    let path = write_config(dir.path(), "");

    std::env::set_var(ENV_REMOTE_URL, "peer:8080");
    let result = load_config(&path);
    clear_env();

    assert!(result.is_err());
}

#[test]
#[serial]
fn explicit_path_must_exist() {
    clear_env();
    let dir = tempdir().unwrap();
    let err = load_config_or_default(Some(&dir.path().join("missing.toml"))).unwrap_err();
    assert!(err.to_string().contains("Failed to read config file"));
}

#[test]
#[serial]
fn malformed_toml_is_reported() {
    clear_env();
    let dir = tempdir().unwrap();
    let path = write_config(dir.path(), "[server\nport = 1");
    let err = load_config(&path).unwrap_err();
    assert!(err.to_string().contains("Failed to parse config file"));
}

#[test]
#[serial]
fn zero_port_rejected() {
    clear_env();
    let dir = tempdir().unwrap();
    let path = write_config(dir.path(), "[server]\nport = 0\n");
    assert!(load_config(&path).is_err());
}
