//! `sqlgate schema` - print the live schema description.

use sqlgate_adapter_pg::PostgresBackend;
use sqlgate_core::GatewayConfig;
use sqlgate_runtime::SchemaIntrospector;
use std::process::ExitCode;
use std::sync::Arc;

pub async fn run(config: &GatewayConfig) -> anyhow::Result<ExitCode> {
    let backend = Arc::new(PostgresBackend::connect(&config.upstream).await?);
    let introspector = SchemaIntrospector::new(backend.clone());

    let schema = introspector.describe_schema().await?;
    println!("{}", serde_json::to_string_pretty(&schema)?);

    backend.close().await;
    Ok(ExitCode::SUCCESS)
}
