//! Configuration loading for Gravida.
//! Reads gravida.toml from the current directory or the path in the
//! GRAVIDA_CONFIG env var; every field has a default so a missing file
//! still yields a runnable local configuration.

use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind_host")]
    pub host: String,
    #[serde(default = "default_bind_port")]
    pub port: u16,
}

fn default_bind_host() -> String { "0.0.0.0".to_string() }
fn default_bind_port() -> u16 { 8000 }

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_bind_host(),
            port: default_bind_port(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_db_host")]
    pub host: String,
    #[serde(default = "default_db_port")]
    pub port: u16,
    #[serde(default = "default_db_user")]
    pub user: String,
    /// Overridden by GRAVIDA_DB_PASSWORD when set; keep secrets out of the file.
    #[serde(default)]
    pub password: String,
    #[serde(default = "default_db_name")]
    pub dbname: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: usize,
}

fn default_db_host()         -> String { "localhost".to_string() }
fn default_db_port()         -> u16    { 5432 }
fn default_db_user()         -> String { "gravida".to_string() }
fn default_db_name()         -> String { "gravida".to_string() }
fn default_max_connections() -> usize  { 10 }

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            host: default_db_host(),
            port: default_db_port(),
            user: default_db_user(),
            password: String::new(),
            dbname: default_db_name(),
            max_connections: default_max_connections(),
        }
    }
}

mod tests;

impl Config {
    /// Load configuration from gravida.toml.
    /// Checks GRAVIDA_CONFIG first, then the current directory; falls back
    /// to defaults when no file exists.
    pub fn load() -> anyhow::Result<Self> {
        let path = std::env::var("GRAVIDA_CONFIG")
            .unwrap_or_else(|_| "gravida.toml".to_string());

        let mut config = if Path::new(&path).exists() {
            let content = std::fs::read_to_string(&path)?;
            toml::from_str(&content)?
        } else {
            tracing::warn!(path = %path, "config file not found, using defaults");
            Config::default()
        };

        if let Ok(password) = std::env::var("GRAVIDA_DB_PASSWORD") {
            config.database.password = password;
        }

        Ok(config)
    }
}
