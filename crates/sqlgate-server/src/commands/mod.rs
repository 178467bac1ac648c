//! Subcommands of the `sqlgate` binary.

pub mod check;
pub mod schema;
pub mod serve;
pub mod verify;
