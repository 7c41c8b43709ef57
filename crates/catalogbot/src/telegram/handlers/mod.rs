//! Telegram bot handler tree configuration
//!
//! The same schema is used by the production dispatcher and by the
//! integration tests in `tests/`.

mod commands;
mod schema;
mod types;

pub use schema::{schema, usage_kind, UsageKind};
pub use types::{HandlerDeps, HandlerError};
