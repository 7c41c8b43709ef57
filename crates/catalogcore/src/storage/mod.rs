//! JSON file persistence for the catalog

pub mod catalog_file;

// Re-exports for convenience
pub use catalog_file::{CatalogStore, FileAccess};
