use async_trait::async_trait;
use sqlgate_core::{GatewayError, ResultSet, SchemaDescription};

/// A database the gateway can talk to.
///
/// Implementations own their connection pool. Each call acquires what it needs
/// and releases it before returning, on success and on error.
#[async_trait]
pub trait DatabaseBackend: Send + Sync {
    /// Read the live catalog. Failures are [`GatewayError::SchemaUnavailable`].
    async fn describe_schema(&self) -> Result<SchemaDescription, GatewayError>;

    /// Run already-validated text in a read-only context and collect every row
    /// in engine order. Failures are [`GatewayError::ExecutionFailed`] carrying
    /// the engine's message.
    async fn execute(&self, query: &str) -> Result<ResultSet, GatewayError>;
}
