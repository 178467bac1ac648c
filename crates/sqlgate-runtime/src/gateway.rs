//! The query gateway: validate, then execute.

use crate::adapter::DatabaseBackend;
use sqlgate_core::{GatewayError, QueryRequest, ResultSet, Verdict};
use sqlgate_policy::QueryValidator;
use std::sync::Arc;

/// Gate for ad-hoc read queries.
///
/// Validation and execution are one step: there is no public way to execute
/// text that has not just passed [`QueryGateway::validate`]. One request is
/// one attempt; nothing is retried.
#[derive(Clone)]
pub struct QueryGateway {
    backend: Arc<dyn DatabaseBackend>,
    validator: QueryValidator,
}

impl QueryGateway {
    pub fn new(backend: Arc<dyn DatabaseBackend>) -> Self {
        Self {
            backend,
            validator: QueryValidator::new(),
        }
    }

    /// Pure policy check. Never touches the database.
    pub fn validate(&self, query: &str) -> Verdict {
        self.validator.validate(query)
    }

    /// Validate the request and, if accepted, execute it.
    pub async fn run(&self, request: &QueryRequest) -> Result<ResultSet, GatewayError> {
        let verdict = self.validate(&request.query);
        if let Some(reason) = &verdict.reason {
            tracing::info!(reason = %reason, "query rejected");
        }
        verdict.into_result()?;

        tracing::debug!(query = %request.query, "executing query");
        self.execute(&request.query).await
    }

    async fn execute(&self, query: &str) -> Result<ResultSet, GatewayError> {
        match self.backend.execute(query).await {
            Ok(rows) => {
                tracing::debug!(rows = rows.len(), "query succeeded");
                Ok(rows)
            }
            Err(e) => {
                tracing::warn!(error = %e, "query failed");
                Err(e)
            }
        }
    }
}
