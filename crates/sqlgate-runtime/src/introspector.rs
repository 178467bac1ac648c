use crate::adapter::DatabaseBackend;
use sqlgate_core::{GatewayError, SchemaDescription};
use std::sync::Arc;

/// Produces a live [`SchemaDescription`]. Nothing is cached between calls.
#[derive(Clone)]
pub struct SchemaIntrospector {
    backend: Arc<dyn DatabaseBackend>,
}

impl SchemaIntrospector {
    pub fn new(backend: Arc<dyn DatabaseBackend>) -> Self {
        Self { backend }
    }

    pub async fn describe_schema(&self) -> Result<SchemaDescription, GatewayError> {
        match self.backend.describe_schema().await {
            Ok(schema) => {
                tracing::debug!(tables = schema.len(), "schema described");
                Ok(schema)
            }
            Err(e) => {
                tracing::warn!(error = %e, "schema unavailable");
                Err(e)
            }
        }
    }
}
