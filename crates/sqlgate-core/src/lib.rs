//! Shared types for the sqlgate query gateway.
//!
//! The gateway exposes a relational database through two operations: describe
//! the schema, and run a caller-supplied read query. Everything that crosses
//! crate boundaries lives here: the request and verdict types, the result and
//! schema shapes, the error taxonomy and the configuration.

// Configuration types shared across all sqlgate crates
pub mod config;
pub mod error;
pub mod schema;
pub mod value;

use serde::{Deserialize, Serialize};
use std::fmt;

pub use config::{ConfigError, CorsConfig, GatewayConfig, ServerConfig, UpstreamConfig};
pub use error::GatewayError;
pub use schema::{ColumnDescriptor, SchemaDescription};
pub use value::{ResultRow, ResultSet, ScalarValue};

/// A caller-supplied query. Untrusted; lives for one request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryRequest {
    pub query: String,
}

impl QueryRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
        }
    }
}

/// Why a query was turned away by the allow-list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectReason {
    /// The trimmed text does not start with `select`.
    NotAReadQuery,
    /// A forbidden keyword occurs as a whole word. Holds the lowercase keyword.
    ForbiddenKeyword(String),
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectReason::NotAReadQuery => f.write_str("not a read query"),
            RejectReason::ForbiddenKeyword(kw) => write!(f, "forbidden keyword: {}", kw),
        }
    }
}

/// Outcome of validating a query. Derived only from the query text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    pub accepted: bool,
    pub reason: Option<RejectReason>,
}

impl Verdict {
    pub fn accept() -> Self {
        Self {
            accepted: true,
            reason: None,
        }
    }

    pub fn reject(reason: RejectReason) -> Self {
        Self {
            accepted: false,
            reason: Some(reason),
        }
    }

    /// Convert into a `Result`, turning a rejection into
    /// [`GatewayError::ValidationRejected`].
    pub fn into_result(self) -> Result<(), GatewayError> {
        match self.reason {
            Some(reason) if !self.accepted => Err(GatewayError::ValidationRejected(reason)),
            _ => Ok(()),
        }
    }
}
