use episodic_store::StoreConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Directory of prebuilt front-end assets to serve at `/`
    #[serde(default)]
    pub static_dir: Option<PathBuf>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    8080
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            static_dir: None,
        }
    }
}

/// Catalog storage tiers. With neither `db_path` nor `remote_url` set, the
/// catalog lives in memory only.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    /// SQLite file for the durable tier
    #[serde(default)]
    pub db_path: Option<PathBuf>,

    /// Base URL of a peer instance to mirror read-only
    #[serde(default)]
    pub remote_url: Option<String>,

    /// Request timeout for the mirror (default: 5)
    #[serde(default = "default_remote_timeout")]
    pub remote_timeout_secs: u64,
}

fn default_remote_timeout() -> u64 {
    5
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            db_path: None,
            remote_url: None,
            remote_timeout_secs: default_remote_timeout(),
        }
    }
}

impl StorageConfig {
    pub fn store_config(&self) -> StoreConfig {
        StoreConfig {
            db_path: self
                .db_path
                .as_ref()
                .map(|p| PathBuf::from(shellexpand::tilde(&p.to_string_lossy()).as_ref())),
            remote_url: self.remote_url.clone(),
            remote_timeout: Duration::from_secs(self.remote_timeout_secs),
        }
    }
}
