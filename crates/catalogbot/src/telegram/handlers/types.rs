//! Handler types and dependencies

use std::sync::Arc;

use tokio::sync::Mutex;

use catalogcore::CatalogService;

use crate::telegram::permissions::PermissionPolicy;

/// Error type for handlers
pub type HandlerError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Dependencies required by handlers
///
/// The catalog lock is held for a whole command, save included, so commands
/// never interleave their catalog access.
#[derive(Clone)]
pub struct HandlerDeps {
    pub catalog: Arc<Mutex<CatalogService>>,
    pub permissions: Arc<PermissionPolicy>,
}

impl HandlerDeps {
    /// Create new handler dependencies
    pub fn new(service: CatalogService, permissions: PermissionPolicy) -> Self {
        Self {
            catalog: Arc::new(Mutex::new(service)),
            permissions: Arc::new(permissions),
        }
    }
}
