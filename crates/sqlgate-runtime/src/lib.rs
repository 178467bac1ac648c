//! sqlgate runtime.
//!
//! Composes the policy with a database backend. The [`QueryGateway`] is the
//! only way to get a query to a backend, and it always validates first.

pub mod adapter;
pub mod gateway;
pub mod introspector;
pub mod memory;

pub use adapter::DatabaseBackend;
pub use gateway::QueryGateway;
pub use introspector::SchemaIntrospector;
pub use memory::MemoryBackend;
