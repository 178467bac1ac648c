//! `sqlgate serve` - run the HTTP server.

use sqlgate_adapter_pg::PostgresBackend;
use sqlgate_core::GatewayConfig;
use sqlgate_server::{AppState, GatewayServer};
use std::process::ExitCode;
use std::sync::Arc;

pub async fn run(mut config: GatewayConfig, listen: Option<String>) -> anyhow::Result<ExitCode> {
    if let Some(addr) = listen {
        config.server.listen_addr = addr;
    }

    // Lazy: the server comes up even if the database is not reachable yet;
    // requests report the connection error until it is.
    let backend = Arc::new(PostgresBackend::connect_lazy(&config.upstream)?);
    let state = AppState::new(backend.clone());

    GatewayServer::new(config.server, state).run().await?;
    backend.close().await;

    Ok(ExitCode::SUCCESS)
}
