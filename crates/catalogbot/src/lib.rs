//! Catalog bot - Telegram front end of the per-chat product catalog
//!
//! The catalog itself (data model, JSON store, service, reply texts) lives in
//! `catalogcore`; this crate only maps Telegram updates onto it.
//!
//! # Module Structure
//!
//! - `cli`: command line interface of the `catalogbot` binary
//! - `telegram`: bot creation, command enum, permissions, dispatcher schema

pub mod cli;
pub mod telegram;

// Re-export commonly used types for convenience
pub use telegram::{create_bot, schema, setup_bot_commands, Command, HandlerDeps, PermissionPolicy};
