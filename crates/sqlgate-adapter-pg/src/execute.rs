//! Read-only execution of validated query text.

use crate::decode::decode_row;
use sqlgate_core::ResultSet;
use sqlx::PgPool;

/// Run `query` verbatim inside a `READ ONLY` transaction and collect every row.
///
/// The transaction is always rolled back; nothing the text does can persist.
/// Postgres refuses multiple statements in one prepared query, so stacked
/// statements fail here as a syntax error rather than running.
pub async fn execute_read_only(pool: &PgPool, query: &str) -> Result<ResultSet, sqlx::Error> {
    let mut tx = pool.begin().await?;

    sqlx::query("SET TRANSACTION READ ONLY")
        .execute(&mut *tx)
        .await?;

    let rows = sqlx::query(query)
        .persistent(false)
        .fetch_all(&mut *tx)
        .await?;

    if let Err(e) = tx.rollback().await {
        // The rows are complete; the connection is discarded by the pool.
        tracing::warn!(error = %e, "rollback after read-only query failed");
    }

    rows.iter().map(decode_row).collect()
}
