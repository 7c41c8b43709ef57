//! Configuration, errors, and logging

pub mod config;
pub mod error;
pub mod logging;

// Re-exports for convenience
pub use error::{CatalogError, CatalogResult};
pub use logging::init_logger;
