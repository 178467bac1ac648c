//! HTTP front end for the sqlgate query gateway.
//!
//! `GET /schema` describes the database, `POST /query` runs a validated read
//! query. Status codes are decided in [`error`] and nowhere else.

pub mod error;
pub mod handlers;
pub mod routes;
pub mod server;
pub mod state;

pub use error::{ApiError, ServerError};
pub use routes::create_router;
pub use server::GatewayServer;
pub use state::AppState;
