use std::path::Path;
use std::time::Duration;

use pylos_advisor::AdvisorConfig;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Top-level application configuration, loadable from TOML.
///
/// ```toml
/// [server]
/// host = "localhost"
/// port = 5000
///
/// [client]
/// host = "127.0.0.1"
/// port = 5000
/// poll_interval_ms = 200
///
/// [advisor]
/// depth = 3
/// strategy = "heuristic"
/// prune = true
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub client: ClientConfig,
    pub advisor: AdvisorConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 5000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub host: String,
    pub port: u16,
    /// Delay between two polls of the game state
    pub poll_interval_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
            poll_interval_ms: 200,
        }
    }
}

impl ClientConfig {
    pub fn base_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_toml(&content)
    }

    /// Parse and validate configuration text.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            log::debug!("config file '{}' not found, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.host.is_empty() {
            return Err(ConfigError::Validation("server.host must not be empty".into()));
        }
        if self.client.host.is_empty() {
            return Err(ConfigError::Validation("client.host must not be empty".into()));
        }
        if self.client.port == 0 {
            return Err(ConfigError::Validation("client.port must be > 0".into()));
        }
        if self.client.poll_interval_ms == 0 {
            return Err(ConfigError::Validation(
                "client.poll_interval_ms must be > 0".into(),
            ));
        }
        self.advisor
            .validate()
            .map_err(|e| ConfigError::Validation(format!("advisor: {}", e)))?;
        Ok(())
    }
}
