//! Application settings loading from config.toml and the environment.
//!
//! Settings resolve in three layers: hard defaults, then an optional
//! `config.toml`, then `BIND_ADDR` / `DATABASE_URL` environment variables.
//! The file is optional so a bare checkout runs with local defaults.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
const DEFAULT_DATABASE_URL: &str = "sqlite://pawmart.sqlite?mode=rwc";

/// Optional keys as they appear in config.toml
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    /// Address the HTTP server binds to
    bind_addr: Option<String>,
    /// SeaORM connection URL
    database_url: Option<String>,
}

/// Resolved application settings.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Address the HTTP server binds to
    pub bind_addr: String,
    /// SeaORM connection URL
    pub database_url: String,
}

fn resolve(file: FileConfig, env_bind: Option<String>, env_db: Option<String>) -> AppConfig {
    AppConfig {
        bind_addr: env_bind
            .or(file.bind_addr)
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
        database_url: env_db
            .or(file.database_url)
            .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
    }
}

/// Loads settings from an optional TOML file plus environment overrides.
///
/// # Errors
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    let file: FileConfig = if path.as_ref().exists() {
        let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
            message: format!("Failed to read config file: {e}"),
        })?;
        toml::from_str(&contents).map_err(|e| Error::Config {
            message: format!("Failed to parse config.toml: {e}"),
        })?
    } else {
        FileConfig::default()
    };

    Ok(resolve(
        file,
        std::env::var("BIND_ADDR").ok(),
        std::env::var("DATABASE_URL").ok(),
    ))
}

/// Loads settings from the default location (./config.toml).
///
/// # Errors
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_default_config() -> Result<AppConfig> {
    load_config("config.toml")
}
