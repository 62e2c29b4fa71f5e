//! Server configuration.
//!
//! Defaults can be overridden by a RON file and then by command line flags.
//!
//! # Example RON
//!
//! ```ron
//! ServerConfig(
//!     bind_address: "127.0.0.1",
//!     port: 9000,
//!     recipes_path: Some("assets/data/recipes.ron"),
//!     precision: 4,
//! )
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use craft_core::report::DEFAULT_PRECISION;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while loading server configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the config file.
    #[error("Failed to read config '{path}': {source}")]
    IoError {
        /// Path to the file.
        path: String,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse the config file.
    #[error("Failed to parse config '{path}': {source}")]
    ParseError {
        /// Path to the file.
        path: String,
        /// Underlying parse error.
        #[source]
        source: ron::error::SpannedError,
    },
}

/// Server configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind.
    pub bind_address: String,
    /// Port to listen on.
    pub port: u16,
    /// Recipe file to serve. `None` uses the default lookup.
    pub recipes_path: Option<PathBuf>,
    /// Decimal places in plan responses.
    pub precision: u32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0".to_string(),
            port: 8080,
            recipes_path: None,
            precision: DEFAULT_PRECISION,
        }
    }
}

impl ServerConfig {
    /// Load configuration from a RON file. Missing fields keep their defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::IoError {
            path: path.display().to_string(),
            source,
        })?;
        ron::from_str(&content).map_err(|source| ConfigError::ParseError {
            path: path.display().to_string(),
            source,
        })
    }

    /// `address:port` to bind.
    #[must_use]
    pub fn socket_address(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }
}
