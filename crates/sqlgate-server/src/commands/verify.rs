//! `sqlgate verify` - count rows in key tables to confirm a loaded database.

use sqlgate_adapter_pg::PostgresBackend;
use sqlgate_core::{GatewayConfig, QueryRequest, ScalarValue};
use sqlgate_runtime::QueryGateway;
use std::process::ExitCode;
use std::sync::Arc;

const DEFAULT_TABLES: [&str; 5] = ["customers", "employees", "orders", "products", "suppliers"];

pub async fn run(config: &GatewayConfig, tables: Vec<String>) -> anyhow::Result<ExitCode> {
    let tables = if tables.is_empty() {
        DEFAULT_TABLES.iter().map(|t| t.to_string()).collect()
    } else {
        tables
    };

    let backend = Arc::new(PostgresBackend::connect(&config.upstream).await?);
    let gateway = QueryGateway::new(backend.clone());

    let mut status = ExitCode::SUCCESS;
    for table in &tables {
        let request = QueryRequest::new(count_query(table));
        match gateway.run(&request).await {
            Ok(rows) => {
                let count = rows
                    .first()
                    .and_then(|row| row.get("count"))
                    .cloned()
                    .unwrap_or(ScalarValue::Null);
                println!("Table {}: {} records", table, serde_json::to_string(&count)?);
            }
            Err(e) => {
                eprintln!("Error verifying table {}: {}", table, e);
                status = ExitCode::FAILURE;
                break;
            }
        }
    }

    backend.close().await;
    Ok(status)
}

/// `SELECT COUNT(*)` over a quoted identifier. `schema.table` is split on the
/// first dot.
fn count_query(table: &str) -> String {
    let target = match table.split_once('.') {
        Some((schema, name)) => format!("{}.{}", quote_ident(schema), quote_ident(name)),
        None => quote_ident(table),
    };
    format!("SELECT COUNT(*) AS count FROM {}", target)
}

fn quote_ident(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}
