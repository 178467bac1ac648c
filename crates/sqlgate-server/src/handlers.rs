//! Request handlers.

use crate::error::ApiError;
use crate::state::AppState;
use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use serde::Deserialize;
use serde_json::{Value, json};
use sqlgate_core::{QueryRequest, ResultSet, SchemaDescription};

/// Body of `POST /query`.
#[derive(Debug, Deserialize)]
pub struct QueryBody {
    #[serde(default)]
    pub query: Option<String>,
}

/// `GET /schema`
pub async fn get_schema(
    State(state): State<AppState>,
) -> Result<Json<SchemaDescription>, ApiError> {
    let schema = state.introspector().describe_schema().await?;
    Ok(Json(schema))
}

/// `POST /query`
///
/// Anything that does not yield a string `query` (no body, not JSON, missing
/// or null field) is answered as "No query provided".
pub async fn post_query(
    State(state): State<AppState>,
    body: Result<Json<QueryBody>, JsonRejection>,
) -> Result<Json<ResultSet>, ApiError> {
    let query = match body {
        Ok(Json(QueryBody { query: Some(query) })) => query,
        Ok(_) => return Err(ApiError::MissingQuery),
        Err(rejection) => {
            tracing::debug!(error = %rejection, "unusable query body");
            return Err(ApiError::MissingQuery);
        }
    };

    let rows = state.gateway().run(&QueryRequest::new(query)).await?;
    Ok(Json(rows))
}

/// `GET /healthz`
pub async fn healthz() -> Json<Value> {
    Json(json!({ "ok": true, "service": "sqlgate" }))
}
