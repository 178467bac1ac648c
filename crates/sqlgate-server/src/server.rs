//! Server lifecycle.

use crate::error::ServerError;
use crate::routes;
use crate::state::AppState;
use sqlgate_core::ServerConfig;
use tokio::net::TcpListener;

/// The HTTP server.
pub struct GatewayServer {
    config: ServerConfig,
    state: AppState,
}

impl GatewayServer {
    pub fn new(config: ServerConfig, state: AppState) -> Self {
        Self { config, state }
    }

    /// Serve until Ctrl-C. In-flight requests finish before this returns.
    pub async fn run(self) -> Result<(), ServerError> {
        let app = routes::create_router(self.state, &self.config.cors);

        let listener = TcpListener::bind(&self.config.listen_addr)
            .await
            .map_err(|e| {
                ServerError::StartupFailed(format!(
                    "failed to bind {}: {}",
                    self.config.listen_addr, e
                ))
            })?;

        tracing::info!(address = %self.config.listen_addr, "sqlgate listening");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("sqlgate stopped");
        Ok(())
    }

    pub fn listen_addr(&self) -> &str {
        &self.config.listen_addr
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown requested");
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlgate_runtime::MemoryBackend;
    use std::sync::Arc;

    #[test]
    fn test_server_creation() {
        let state = AppState::new(Arc::new(MemoryBackend::new()));
        let server = GatewayServer::new(ServerConfig::default(), state);
        assert_eq!(server.listen_addr(), "0.0.0.0:8080");
    }
}
