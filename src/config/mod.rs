mod types;

pub use types::*;

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Overrides `storage.db_path`.
pub const ENV_DB_PATH: &str = "EPISODIC_DB_PATH";
/// Overrides `storage.remote_url`.
pub const ENV_REMOTE_URL: &str = "EPISODIC_REMOTE_URL";

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let mut config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    apply_env_overrides(&mut config);
    validate_config(&config)?;

    Ok(config)
}

/// Load config from default locations or return default config
pub fn load_config_or_default(custom_path: Option<&Path>) -> Result<Config> {
    if let Some(path) = custom_path {
        return load_config(path);
    }

    // Try default locations
    let default_paths = [
        "./episodic.toml",
        "./config.toml",
        "~/.config/episodic/config.toml",
        "/etc/episodic/config.toml",
    ];

    for path_str in default_paths {
        let path = shellexpand::tilde(path_str);
        let path = Path::new(path.as_ref());
        if path.exists() {
            tracing::debug!("Using config file {:?}", path);
            return load_config(path);
        }
    }

    // Return default config if no file found
    let mut config = Config::default();
    apply_env_overrides(&mut config);
    validate_config(&config)?;
    Ok(config)
}

/// Environment variables win over file values. Empty values are ignored.
fn apply_env_overrides(config: &mut Config) {
    if let Some(db_path) = env_value(ENV_DB_PATH) {
        config.storage.db_path = Some(PathBuf::from(db_path));
    }
    if let Some(url) = env_value(ENV_REMOTE_URL) {
        config.storage.remote_url = Some(url);
    }
}

fn env_value(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Validate configuration
pub fn validate_config(config: &Config) -> Result<()> {
    // Validate server config
    if config.server.port == 0 {
        anyhow::bail!("Server port cannot be 0");
    }

    if let Some(dir) = &config.server.static_dir {
        if !dir.exists() {
            tracing::warn!("Static directory does not exist: {:?}", dir);
        }
    }

    // Validate storage config
    if let Some(url) = &config.storage.remote_url {
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            anyhow::bail!("Remote URL must start with http:// or https://: {}", url);
        }
    }

    if config.storage.remote_timeout_secs == 0 {
        anyhow::bail!("Remote timeout must be greater than 0");
    }

    Ok(())
}
