//! Configuration types for the sqlgate gateway.
//!
//! Configuration is read from a single YAML file (`sqlgate.yaml` by default).
//! Every section is optional; a missing file yields the defaults, which the
//! binary then overrides from command-line flags and the environment.
//!
//! ```yaml
//! upstream:
//!   database_url_env: DATABASE_URL
//!   pool:
//!     max_connections: 10
//!     statement_timeout_ms: 30000
//! server:
//!   listen_addr: 0.0.0.0:8080
//!   cors:
//!     enabled: true
//! ```

pub mod server;
pub mod upstream;

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub use server::{CorsConfig, ServerConfig};
pub use upstream::{ConnectionPoolConfig, SslMode, UpstreamConfig};

/// Complete gateway configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Upstream database connection.
    #[serde(default)]
    pub upstream: UpstreamConfig,

    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
}

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl GatewayConfig {
    /// Load configuration from a YAML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from YAML content. An empty document means defaults.
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path` if it exists, otherwise fall back to defaults.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if path.exists() {
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if let Some(pool) = &self.upstream.pool {
            if pool.max_connections == 0 {
                return Err(ConfigError::Config(
                    "upstream.pool.max_connections must be at least 1".to_string(),
                ));
            }
            if pool.min_connections > pool.max_connections {
                return Err(ConfigError::Config(format!(
                    "upstream.pool.min_connections ({}) exceeds max_connections ({})",
                    pool.min_connections, pool.max_connections
                )));
            }
        }
        Ok(())
    }
}
