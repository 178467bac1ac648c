//! sqlgate query policy.
//!
//! A syntactic allow-list that decides whether caller-supplied text may be sent
//! to the database. It does not parse SQL. See [`validator`] for the exact rules
//! and their known blind spots.

pub mod validator;

pub use validator::{FORBIDDEN_KEYWORDS, QueryValidator, validate};
