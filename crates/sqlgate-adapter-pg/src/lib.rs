//! Postgres backend for sqlgate.
//!
//! Owns a `sqlx` connection pool. Every call borrows one connection for its
//! duration; the pool guard hands it back on every exit path.

use async_trait::async_trait;
use sqlgate_core::config::SslMode;
use sqlgate_core::{GatewayError, ResultSet, SchemaDescription, UpstreamConfig};
use sqlgate_runtime::DatabaseBackend;
use sqlx::PgPool;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions, PgSslMode};
use std::time::Duration;

mod decode;
pub mod execute;
pub mod introspect;

/// [`DatabaseBackend`] over a Postgres pool.
#[derive(Debug, Clone)]
pub struct PostgresBackend {
    pool: PgPool,
}

impl PostgresBackend {
    /// Open the pool and make sure at least one connection can be established.
    pub async fn connect(config: &UpstreamConfig) -> anyhow::Result<Self> {
        let pool = pool_options(config)
            .connect_with(connect_options(config)?)
            .await?;
        tracing::info!(
            max_connections = config.pool_config().max_connections,
            "connected to upstream Postgres"
        );
        Ok(Self { pool })
    }

    /// Build the pool without connecting. The first request opens the first
    /// connection, so the process can start before the database is up.
    pub fn connect_lazy(config: &UpstreamConfig) -> anyhow::Result<Self> {
        let pool = pool_options(config).connect_lazy_with(connect_options(config)?);
        Ok(Self { pool })
    }

    /// Wrap an existing pool.
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Wait for checked-out connections to come back, then close the pool.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl DatabaseBackend for PostgresBackend {
    async fn describe_schema(&self) -> Result<SchemaDescription, GatewayError> {
        introspect::describe_schema(&self.pool)
            .await
            .map_err(|e| GatewayError::schema_unavailable(engine_message(&e)))
    }

    async fn execute(&self, query: &str) -> Result<ResultSet, GatewayError> {
        execute::execute_read_only(&self.pool, query)
            .await
            .map_err(|e| GatewayError::execution(engine_message(&e)))
    }
}

/// The engine's own text for database errors; the driver's description for
/// everything else (I/O, pool timeout, decode failures).
pub(crate) fn engine_message(err: &sqlx::Error) -> String {
    match err {
        sqlx::Error::Database(db) => db.message().to_string(),
        other => other.to_string(),
    }
}

fn connect_options(config: &UpstreamConfig) -> anyhow::Result<PgConnectOptions> {
    let mut options = match config.database_url() {
        Some(url) => url.parse::<PgConnectOptions>()?,
        None => {
            let options = PgConnectOptions::new()
                .host(&config.host)
                .port(config.port)
                .username(&config.username)
                .database(&config.database)
                .ssl_mode(ssl_mode(config.ssl_mode));
            match config.resolved_password() {
                Some(password) => options.password(&password),
                None => options,
            }
        }
    };
    if let Some(ms) = config.pool_config().statement_timeout_ms {
        options = options.options([("statement_timeout", ms.to_string())]);
    }
    Ok(options)
}

fn ssl_mode(mode: SslMode) -> PgSslMode {
    match mode {
        SslMode::Disable => PgSslMode::Disable,
        SslMode::Allow => PgSslMode::Allow,
        SslMode::Prefer => PgSslMode::Prefer,
        SslMode::Require => PgSslMode::Require,
        SslMode::VerifyCa => PgSslMode::VerifyCa,
        SslMode::VerifyFull => PgSslMode::VerifyFull,
    }
}

fn pool_options(config: &UpstreamConfig) -> PgPoolOptions {
    let pool = config.pool_config();
    PgPoolOptions::new()
        .min_connections(pool.min_connections)
        .max_connections(pool.max_connections)
        .acquire_timeout(Duration::from_secs(pool.acquire_timeout_seconds.into()))
        .idle_timeout(Some(Duration::from_secs(pool.idle_timeout_seconds.into())))
}
