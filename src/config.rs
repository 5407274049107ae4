//! Runtime configuration.
//!
//! Settings come from an optional TOML file, then the `PORT` environment
//! variable overrides `[server].port`:
//!
//! ```toml
//! [server]
//! host = "0.0.0.0"
//! port = 8000
//!
//! [data]
//! reviews_path = "data/reviews.csv"
//! ```
//!
//! Every section and key is optional.

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Environment variable that overrides `[server].port`.
pub const PORT_ENV: &str = "PORT";

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub data: DataConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    8000
}

#[derive(Debug, Deserialize, Clone)]
pub struct DataConfig {
    #[serde(default = "default_reviews_path")]
    pub reviews_path: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            reviews_path: default_reviews_path(),
        }
    }
}

fn default_reviews_path() -> PathBuf {
    PathBuf::from("data/reviews.csv")
}

impl Config {
    /// Address to bind the HTTP listener to, as `host:port`.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Apply a raw `PORT` value, if any.
    pub fn apply_port_override(&mut self, port: Option<&str>) -> Result<()> {
        let Some(raw) = port else {
            return Ok(());
        };
        self.server.port = raw
            .trim()
            .parse()
            .with_context(|| format!("{} must be a port number, got '{}'", PORT_ENV, raw))?;
        Ok(())
    }
}

/// Parse a TOML config file.
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&content).with_context(|| "Failed to parse config file")?;

    if config.server.host.trim().is_empty() {
        bail!("server.host must not be empty");
    }

    Ok(config)
}

/// Resolve the effective configuration.
///
/// With `required = false` a missing file falls back to defaults; with
/// `required = true` (the user named the file explicitly) it is an error.
/// `PORT` from the environment is applied last.
pub fn resolve_config(path: &Path, required: bool) -> Result<Config> {
    let mut config = if required || path.exists() {
        load_config(path)?
    } else {
        Config::default()
    };
    let port = std::env::var(PORT_ENV).ok();
    config.apply_port_override(port.as_deref())?;
    Ok(config)
}
