use thiserror::Error;

/// Error taxonomy of the catalog.
///
/// None of these are fatal: command handlers turn the first three into reply
/// messages, and the store-level variants are logged and swallowed by the
/// service.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// The code is already registered in this channel
    #[error("product with code {0} already exists")]
    AlreadyExists(i64),

    /// The code is not registered in this channel
    #[error("product with code {0} not found")]
    NotFound(i64),

    /// The caller does not hold the elevated role
    #[error("permission denied")]
    PermissionDenied,

    /// Reading or writing the storage file failed
    #[error("persistence failure: {0}")]
    PersistenceFailure(#[from] std::io::Error),

    /// The storage file exists but is not a valid catalog document
    #[error("malformed storage: {0}")]
    MalformedStorage(#[from] serde_json::Error),
}

/// Type alias for Result with CatalogError
pub type CatalogResult<T> = Result<T, CatalogError>;
