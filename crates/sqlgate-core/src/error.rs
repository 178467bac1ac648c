//! Error taxonomy for the gateway.
//!
//! Each variant maps to exactly one response class at the transport boundary.
//! Nothing here knows about status codes.

use crate::RejectReason;
use thiserror::Error;

/// Errors produced by validation, execution and introspection.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The query failed the allow-list. Never reaches the database.
    #[error("query rejected: {0}")]
    ValidationRejected(RejectReason),

    /// The engine refused or failed a validated query. `message` is the
    /// engine's own text.
    #[error("{message}")]
    ExecutionFailed { message: String },

    /// The catalog could not be read.
    #[error("{message}")]
    SchemaUnavailable { message: String },
}

impl GatewayError {
    pub fn execution(message: impl Into<String>) -> Self {
        Self::ExecutionFailed {
            message: message.into(),
        }
    }

    pub fn schema_unavailable(message: impl Into<String>) -> Self {
        Self::SchemaUnavailable {
            message: message.into(),
        }
    }

    /// Whether the caller can fix this by changing the query text.
    pub fn is_client_error(&self) -> bool {
        matches!(self, GatewayError::ValidationRejected(_))
    }
}
