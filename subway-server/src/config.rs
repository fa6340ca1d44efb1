use std::net::SocketAddr;
use std::path::Path;

use serde::Deserialize;
use subway_core::fare::FareConfig;
use subway_core::loading::NetworkConfig;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid server settings: {0}")]
    Server(String),
    #[error(transparent)]
    Invalid(#[from] subway_core::Error),
}

/// Server configuration file
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default)]
    pub server: HttpConfig,
    pub network: NetworkConfig,
    #[serde(default)]
    pub fare: FareConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub bind: SocketAddr,
    pub request_timeout_secs: u64,
    pub concurrency_limit: usize,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([127, 0, 0, 1], 3000)),
            request_timeout_secs: 30,
            concurrency_limit: 256,
        }
    }
}

impl ServerConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.server.validate()?;
        config.fare.validate()?;
        Ok(config)
    }
}

impl HttpConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::Server(
                "request_timeout_secs must be positive".to_string(),
            ));
        }
        if self.concurrency_limit == 0 {
            return Err(ConfigError::Server(
                "concurrency_limit must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
