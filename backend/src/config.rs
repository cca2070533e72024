use serde::{Deserialize, Serialize};
use shape_core::ShapeConfig;
use std::net::SocketAddr;
use std::path::Path;
use thiserror::Error;

/// Environment variable naming a JSON config file.
pub const CONFIG_ENV: &str = "SHAPE_SERVER_CONFIG";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub addr: SocketAddr,
    /// Settings every new editing session starts with
    pub shape: ShapeConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            shape: ShapeConfig::default(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}

impl ServerConfig {
    /// Reads the file named by `SHAPE_SERVER_CONFIG`, or returns defaults
    /// when the variable is unset.
    pub fn load() -> Result<Self, ConfigError> {
        match std::env::var(CONFIG_ENV) {
            Ok(path) => Self::from_file(path),
            Err(_) => Ok(Self::default()),
        }
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }
}
