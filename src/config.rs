//! Configuration loading and validation.
//!
//! Configuration is a TOML file with serde defaults for every field, so an
//! empty file (or no file at all) yields a runnable development setup
//! pointing at a local SQLite file and the public catalog service.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub database: DatabaseConfig,

    #[serde(default)]
    pub catalog: CatalogConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// Path of the SQLite database file.
    #[serde(default = "default_db_path")]
    pub path: String,

    /// Maximum number of pooled connections.
    #[serde(default = "default_pool_size")]
    pub pool_size: u32,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CatalogConfig {
    /// Base URL of the remote film catalog (no trailing path).
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout for catalog calls, in seconds. There is no retry;
    /// this is the only request-level bound.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    8080
}
fn default_db_path() -> String {
    "planetarium.db".to_string()
}
fn default_pool_size() -> u32 {
    4
}
fn default_base_url() -> String {
    "https://swapi.dev/api".to_string()
}
fn default_timeout_secs() -> u64 {
    30
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
            pool_size: default_pool_size(),
        }
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Load configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    validate_config(&config)?;

    Ok(config)
}

/// Load config from default locations or return default config.
pub fn load_config_or_default(custom_path: Option<&Path>) -> Result<Config> {
    if let Some(path) = custom_path {
        return load_config(path);
    }

    let default_paths = [
        "./planetarium.toml",
        "~/.config/planetarium/config.toml",
        "/etc/planetarium/config.toml",
    ];

    for path_str in default_paths {
        let path = shellexpand::tilde(path_str);
        let path = Path::new(path.as_ref());
        if path.exists() {
            return load_config(path);
        }
    }

    Ok(Config::default())
}

/// Validate configuration.
fn validate_config(config: &Config) -> Result<()> {
    if config.server.port == 0 {
        anyhow::bail!("Server port cannot be 0");
    }

    if config.catalog.base_url.is_empty() {
        anyhow::bail!("Catalog base_url cannot be empty");
    }

    if config.database.pool_size == 0 {
        anyhow::bail!("Database pool_size cannot be 0");
    }

    if config.catalog.timeout_secs == 0 {
        anyhow::bail!("Catalog timeout_secs cannot be 0");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_toml_yields_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.database.path, "planetarium.db");
        assert_eq!(config.database.pool_size, 4);
        assert_eq!(config.catalog.base_url, "https://swapi.dev/api");
        assert_eq!(config.catalog.timeout_secs, 30);
    }

    #[test]
    fn partial_sections_keep_remaining_defaults() {
        let config: Config = toml::from_str(
            r#"
            [server]
            port = 9000

            [catalog]
            base_url = "http://localhost:1234/api"
            "#,
        )
        .unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.catalog.base_url, "http://localhost:1234/api");
        assert_eq!(config.catalog.timeout_secs, 30);
    }

    #[test]
    fn load_config_rejects_zero_port() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[server]\nport = 0\n").unwrap();
        assert!(load_config(file.path()).is_err());
    }

    #[test]
    fn load_config_rejects_empty_base_url() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[catalog]\nbase_url = \"\"\n").unwrap();
        assert!(load_config(file.path()).is_err());
    }

    #[test]
    fn load_config_rejects_zero_pool_size() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[database]\npool_size = 0\n").unwrap();
        assert!(load_config(file.path()).is_err());
    }

    #[test]
    fn missing_custom_path_is_an_error() {
        assert!(load_config_or_default(Some(Path::new("/nonexistent/planetarium.toml"))).is_err());
    }
}
