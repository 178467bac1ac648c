//! Where the gateway's Postgres lives and how its pool behaves.
//!
//! A URL (from `database_url_env`, then `database_url`) wins outright.
//! Without one, the discrete fields are handed to the driver as-is, so
//! passwords and names never need URL escaping.

use serde::{Deserialize, Serialize};

/// The upstream Postgres connection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Environment variable holding a full connection URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database_url_env: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub database_url: Option<String>,

    pub host: String,
    pub port: u16,
    pub database: String,
    pub username: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,

    /// Environment variable holding the password; checked before `password`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password_env: Option<String>,

    pub ssl_mode: SslMode,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub pool: Option<ConnectionPoolConfig>,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            database_url_env: None,
            database_url: None,
            host: "localhost".into(),
            port: 5432,
            database: "postgres".into(),
            username: "postgres".into(),
            password: None,
            password_env: None,
            ssl_mode: SslMode::Prefer,
            pool: None,
        }
    }
}

/// libpq `sslmode` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SslMode {
    Disable,
    Allow,
    #[default]
    Prefer,
    Require,
    VerifyCa,
    VerifyFull,
}

/// Pool sizing, timeouts and the per-session `statement_timeout`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectionPoolConfig {
    pub min_connections: u32,
    pub max_connections: u32,
    pub acquire_timeout_seconds: u32,
    pub idle_timeout_seconds: u32,

    /// Unset means no limit.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub statement_timeout_ms: Option<u64>,
}

impl Default for ConnectionPoolConfig {
    fn default() -> Self {
        Self {
            min_connections: 1,
            max_connections: 10,
            acquire_timeout_seconds: 30,
            idle_timeout_seconds: 600,
            statement_timeout_ms: None,
        }
    }
}

impl UpstreamConfig {
    /// The configured URL, if any. `None` means "connect from the fields".
    pub fn database_url(&self) -> Option<String> {
        self.database_url_env
            .as_deref()
            .and_then(|name| std::env::var(name).ok())
            .or_else(|| self.database_url.clone())
    }

    /// The password for field-based connections.
    pub fn resolved_password(&self) -> Option<String> {
        self.password_env
            .as_deref()
            .and_then(|name| std::env::var(name).ok())
            .or_else(|| self.password.clone())
    }

    /// Replace whatever was configured with a direct URL.
    pub fn with_database_url(mut self, url: impl Into<String>) -> Self {
        self.database_url_env = None;
        self.database_url = Some(url.into());
        self
    }

    /// Pool settings, falling back to defaults when none are configured.
    pub fn pool_config(&self) -> ConnectionPoolConfig {
        self.pool.clone().unwrap_or_default()
    }
}
