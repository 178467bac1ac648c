//! Error types for the server crate.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use sqlgate_core::{GatewayError, RejectReason};
use thiserror::Error;

/// Request-level failures, each with a fixed response shape.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The body had no usable `query` field.
    #[error("No query provided")]
    MissingQuery,

    /// The allow-list refused the query.
    #[error("Invalid or forbidden SQL query")]
    Rejected(RejectReason),

    /// The engine failed a validated query. Engine message, verbatim.
    #[error("{0}")]
    ExecutionFailed(String),

    /// The catalog could not be read.
    #[error("{0}")]
    SchemaUnavailable(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingQuery | ApiError::Rejected(_) => StatusCode::BAD_REQUEST,
            ApiError::ExecutionFailed(_) | ApiError::SchemaUnavailable(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<GatewayError> for ApiError {
    fn from(err: GatewayError) -> Self {
        match err {
            GatewayError::ValidationRejected(reason) => ApiError::Rejected(reason),
            GatewayError::ExecutionFailed { message } => ApiError::ExecutionFailed(message),
            GatewayError::SchemaUnavailable { message } => ApiError::SchemaUnavailable(message),
        }
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let reason = match &self {
            ApiError::Rejected(reason) => Some(reason.to_string()),
            _ => None,
        };
        let body = ErrorBody {
            error: self.to_string(),
            reason,
        };
        (status, Json(body)).into_response()
    }
}

/// Failures while bringing the server up.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("failed to start server: {0}")]
    StartupFailed(String),

    #[error("server error: {0}")]
    Io(#[from] std::io::Error),
}
