//! Shared application state.

use sqlgate_runtime::{DatabaseBackend, QueryGateway, SchemaIntrospector};
use std::sync::Arc;

/// Per-process state handed to every handler. Holds no per-request data;
/// the backend's pool is the only thing requests share.
#[derive(Clone)]
pub struct AppState {
    gateway: QueryGateway,
    introspector: SchemaIntrospector,
}

impl AppState {
    pub fn new(backend: Arc<dyn DatabaseBackend>) -> Self {
        Self {
            gateway: QueryGateway::new(backend.clone()),
            introspector: SchemaIntrospector::new(backend),
        }
    }

    pub fn gateway(&self) -> &QueryGateway {
        &self.gateway
    }

    pub fn introspector(&self) -> &SchemaIntrospector {
        &self.introspector
    }
}
