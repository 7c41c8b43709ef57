//! Catalog core - per-channel product catalog without any chat-platform code
//!
//! # Module Structure
//!
//! - `core`: configuration, errors, and logging
//! - `catalog`: the in-memory data model (`Catalog`, `ProductMap`)
//! - `storage`: JSON file persistence
//! - `service`: the catalog service the bot commands call into
//! - `i18n`: Fluent lookups
//! - `reply`: localized texts for command outcomes

pub mod catalog;
pub mod core;
pub mod i18n;
pub mod reply;
pub mod service;
pub mod storage;

// Re-export commonly used types for convenience
pub use catalog::{Catalog, ProductMap};
pub use crate::core::{config, CatalogError, CatalogResult};
pub use service::{CatalogService, Privilege};
pub use storage::CatalogStore;
