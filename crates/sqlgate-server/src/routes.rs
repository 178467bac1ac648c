//! Route definitions.

use crate::handlers;
use crate::state::AppState;
use axum::http::HeaderValue;
use axum::{
    Router,
    routing::{get, post},
};
use sqlgate_core::CorsConfig;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Build the router with tracing and, if enabled, CORS.
pub fn create_router(state: AppState, cors: &CorsConfig) -> Router {
    let router = Router::new()
        .route("/schema", get(handlers::get_schema))
        .route("/query", post(handlers::post_query))
        .route("/healthz", get(handlers::healthz))
        .with_state(state);

    let router = match cors_layer(cors) {
        Some(layer) => router.layer(layer),
        None => router,
    };

    router.layer(TraceLayer::new_for_http())
}

fn cors_layer(cors: &CorsConfig) -> Option<CorsLayer> {
    if !cors.enabled {
        return None;
    }

    let origins = if cors.allowed_origins.is_empty() {
        AllowOrigin::any()
    } else {
        let parsed: Vec<HeaderValue> = cors
            .allowed_origins
            .iter()
            .filter_map(|origin| match HeaderValue::from_str(origin) {
                Ok(value) => Some(value),
                Err(_) => {
                    tracing::warn!(origin = %origin, "ignoring invalid CORS origin");
                    None
                }
            })
            .collect();
        AllowOrigin::list(parsed)
    };

    Some(
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any),
    )
}
