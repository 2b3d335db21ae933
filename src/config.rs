//! Configuration Module
//!
//! Handles loading server configuration from environment variables.

use std::env;
use std::path::PathBuf;

use thiserror::Error;

use crate::upstream::DEFAULT_UPSTREAM_URL;

/// Error raised when the environment does not describe a usable configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required environment variable is not set
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    /// An environment variable is set but cannot be parsed
    #[error("Invalid value for environment variable {0}: {1}")]
    Invalid(&'static str, String),
}

/// Server configuration parameters.
///
/// Built once at startup and passed by reference into the router and store
/// constructors; request handling never reads the environment.
#[derive(Debug, Clone)]
pub struct Config {
    /// Address or hostname the HTTP server binds to
    pub bind_host: String,
    /// HTTP server port
    pub server_port: u16,
    /// Directory holding the cached image files
    pub cache_dir: PathBuf,
    /// Base URL of the upstream image provider
    pub upstream_url: String,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `BIND_HOST` - bind address or hostname (required)
    /// - `SERVER_PORT` - HTTP server port (required)
    /// - `CACHE_DIR` - cache directory path (required)
    /// - `UPSTREAM_URL` - upstream image provider base URL
    ///   (default: `https://http.cat`)
    pub fn from_env() -> Result<Self, ConfigError> {
        let port_raw = require("SERVER_PORT")?;
        let server_port = port_raw
            .parse()
            .map_err(|_| ConfigError::Invalid("SERVER_PORT", port_raw))?;

        Ok(Self {
            bind_host: require("BIND_HOST")?,
            server_port,
            cache_dir: PathBuf::from(require("CACHE_DIR")?),
            upstream_url: env::var("UPSTREAM_URL")
                .unwrap_or_else(|_| DEFAULT_UPSTREAM_URL.to_string()),
        })
    }
}

fn require(name: &'static str) -> Result<String, ConfigError> {
    env::var(name).map_err(|_| ConfigError::Missing(name))
}
