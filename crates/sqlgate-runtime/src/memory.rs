//! In-memory backend with canned answers, for tests and offline tooling.

use crate::adapter::DatabaseBackend;
use async_trait::async_trait;
use sqlgate_core::{GatewayError, ResultSet, SchemaDescription};
use std::collections::HashMap;
use std::sync::Mutex;

/// Canned outcome for a query text.
#[derive(Debug, Clone)]
enum Canned {
    Rows(ResultSet),
    Error(String),
}

/// Backend that answers from fixed tables of queries and a fixed schema.
///
/// Unknown query text fails the way an engine would for unparseable input.
/// Every text passed to [`DatabaseBackend::execute`] is recorded.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    schema: SchemaDescription,
    answers: HashMap<String, Canned>,
    unavailable: Option<String>,
    executed: Mutex<Vec<String>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_schema(mut self, schema: SchemaDescription) -> Self {
        self.schema = schema;
        self
    }

    pub fn with_result(mut self, query: impl Into<String>, rows: ResultSet) -> Self {
        self.answers.insert(query.into(), Canned::Rows(rows));
        self
    }

    pub fn with_error(mut self, query: impl Into<String>, message: impl Into<String>) -> Self {
        self.answers
            .insert(query.into(), Canned::Error(message.into()));
        self
    }

    /// Make every call fail as if the database were unreachable.
    pub fn unavailable(mut self, message: impl Into<String>) -> Self {
        self.unavailable = Some(message.into());
        self
    }

    /// Query texts received so far, in arrival order.
    pub fn executed(&self) -> Vec<String> {
        self.executed
            .lock()
            .map(|log| log.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl DatabaseBackend for MemoryBackend {
    async fn describe_schema(&self) -> Result<SchemaDescription, GatewayError> {
        if let Some(message) = &self.unavailable {
            return Err(GatewayError::schema_unavailable(message.clone()));
        }
        Ok(self.schema.clone())
    }

    async fn execute(&self, query: &str) -> Result<ResultSet, GatewayError> {
        if let Ok(mut log) = self.executed.lock() {
            log.push(query.to_string());
        }
        if let Some(message) = &self.unavailable {
            return Err(GatewayError::execution(message.clone()));
        }
        match self.answers.get(query) {
            Some(Canned::Rows(rows)) => Ok(rows.clone()),
            Some(Canned::Error(message)) => Err(GatewayError::execution(message.clone())),
            None => Err(GatewayError::execution(format!(
                "syntax error at or near \"{}\"",
                query.split_whitespace().last().unwrap_or_default()
            ))),
        }
    }
}
