//! Catalog service: the operations behind the chat commands
//!
//! The service owns the in-memory `Catalog` and its `CatalogStore`. Every
//! successful mutation is applied in memory first and then the whole catalog
//! is written back. A failed write is logged and otherwise ignored, so the
//! caller still sees the change (best effort durability).

use crate::catalog::Catalog;
use crate::core::error::{CatalogError, CatalogResult};
use crate::storage::CatalogStore;

/// Permission level of the caller, resolved by the chat layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Privilege {
    Regular,
    Elevated,
}

impl Privilege {
    pub fn is_elevated(self) -> bool {
        matches!(self, Privilege::Elevated)
    }
}

pub struct CatalogService {
    catalog: Catalog,
    store: CatalogStore,
}

impl CatalogService {
    pub fn new(catalog: Catalog, store: CatalogStore) -> Self {
        Self { catalog, store }
    }

    /// Loads the catalog from the store.
    ///
    /// An unreadable or malformed file is logged and the service starts with
    /// an empty catalog; the file is left as is until the next change.
    pub async fn open(store: CatalogStore) -> Self {
        let catalog = match store.load().await {
            Ok(catalog) => {
                let channels = catalog.channels().count();
                let products: usize = catalog.channels().map(|(_, products)| products.len()).sum();
                log::info!(
                    "Loaded {} products in {} channels from {}",
                    products,
                    channels,
                    store.path().display()
                );
                catalog
            }
            Err(e) => {
                log::error!(
                    "Failed to load catalog from {}, starting empty: {}",
                    store.path().display(),
                    e
                );
                Catalog::new()
            }
        };

        Self::new(catalog, store)
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn store(&self) -> &CatalogStore {
        &self.store
    }

    /// Registers a product in the channel
    ///
    /// # Returns
    /// * `Ok(())` - Inserted (and a save was attempted)
    /// * `Err(CatalogError::AlreadyExists)` - The code is taken in this channel, nothing changed
    pub async fn add(&mut self, channel_id: &str, code: i64, name: &str) -> CatalogResult<()> {
        if !self.catalog.channel_entry(channel_id).insert_new(code, name) {
            return Err(CatalogError::AlreadyExists(code));
        }

        log::info!("Product added in channel {}: {} (code {})", channel_id, name, code);
        self.persist().await;
        Ok(())
    }

    /// Removes a product from the channel
    ///
    /// The privilege is checked before the lookup, so a regular user learns
    /// nothing about which codes exist.
    ///
    /// # Returns
    /// * `Ok(name)` - Removed, with the name it had
    /// * `Err(CatalogError::PermissionDenied)` - Caller is not elevated
    /// * `Err(CatalogError::NotFound)` - No such code in this channel
    pub async fn remove(&mut self, channel_id: &str, code: i64, privilege: Privilege) -> CatalogResult<String> {
        if !privilege.is_elevated() {
            log::warn!("Denied removal of code {} in channel {}", code, channel_id);
            return Err(CatalogError::PermissionDenied);
        }

        let name = self
            .catalog
            .channel_mut(channel_id)
            .and_then(|products| products.remove(code))
            .ok_or(CatalogError::NotFound(code))?;

        log::info!("Product removed in channel {}: {} (code {})", channel_id, name, code);
        self.persist().await;
        Ok(name)
    }

    /// Products of the channel in insertion order; empty for unknown channels
    pub fn list(&self, channel_id: &str) -> Vec<(i64, String)> {
        self.catalog
            .channel(channel_id)
            .map(|products| products.iter().map(|(code, name)| (code, name.to_string())).collect())
            .unwrap_or_default()
    }

    async fn persist(&self) {
        if let Err(e) = self.store.save(&self.catalog).await {
            log::error!("Failed to save catalog to {}: {}", self.store.path().display(), e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    async fn open_in(dir: &TempDir) -> CatalogService {
        CatalogService::open(CatalogStore::new(dir.path().join("products.json"))).await
    }

    #[tokio::test]
    async fn test_add_then_list_scenario() {
        let dir = TempDir::new().unwrap();
        let mut service = open_in(&dir).await;
        assert!(service.list("100").is_empty());

        service.add("100", 100, "Widget").await.unwrap();

        assert_eq!(service.list("100"), vec![(100, "Widget".to_string())]);
    }

    #[tokio::test]
    async fn test_add_is_visible_in_its_channel_only() {
        let dir = TempDir::new().unwrap();
        let mut service = open_in(&dir).await;

        service.add("a", 1, "Lamp").await.unwrap();

        assert_eq!(service.list("a"), vec![(1, "Lamp".to_string())]);
        assert!(service.list("b").is_empty());
    }

    #[tokio::test]
    async fn test_same_code_allowed_in_different_channels() {
        let dir = TempDir::new().unwrap();
        let mut service = open_in(&dir).await;

        service.add("a", 1, "Lamp").await.unwrap();
        service.add("b", 1, "Desk").await.unwrap();

        assert_eq!(service.list("b"), vec![(1, "Desk".to_string())]);
    }

    #[tokio::test]
    async fn test_duplicate_add_keeps_original_name() {
        let dir = TempDir::new().unwrap();
        let mut service = open_in(&dir).await;
        service.add("100", 5, "Original").await.unwrap();

        let result = service.add("100", 5, "Replacement").await;

        assert!(matches!(result, Err(CatalogError::AlreadyExists(5))));
        assert_eq!(service.list("100"), vec![(5, "Original".to_string())]);
    }

    #[tokio::test]
    async fn test_list_keeps_insertion_order() {
        let dir = TempDir::new().unwrap();
        let mut service = open_in(&dir).await;
        for (code, name) in [(30, "c"), (10, "a"), (20, "b")] {
            service.add("100", code, name).await.unwrap();
        }

        let codes: Vec<i64> = service.list("100").into_iter().map(|(code, _)| code).collect();
        assert_eq!(codes, vec![30, 10, 20]);
    }

    #[tokio::test]
    async fn test_remove_without_privilege_is_denied() {
        let dir = TempDir::new().unwrap();
        let mut service = open_in(&dir).await;
        service.add("100", 1, "Widget").await.unwrap();

        let result = service.remove("100", 1, Privilege::Regular).await;

        assert!(matches!(result, Err(CatalogError::PermissionDenied)));
        assert_eq!(service.list("100"), vec![(1, "Widget".to_string())]);
    }

    #[tokio::test]
    async fn test_remove_absent_code_without_privilege_is_still_denied() {
        let dir = TempDir::new().unwrap();
        let mut service = open_in(&dir).await;

        let result = service.remove("100", 1, Privilege::Regular).await;

        assert!(matches!(result, Err(CatalogError::PermissionDenied)));
    }

    #[tokio::test]
    async fn test_remove_with_privilege_deletes() {
        let dir = TempDir::new().unwrap();
        let mut service = open_in(&dir).await;
        service.add("100", 1, "Widget").await.unwrap();
        service.add("100", 2, "Gadget").await.unwrap();

        let removed = service.remove("100", 1, Privilege::Elevated).await.unwrap();

        assert_eq!(removed, "Widget");
        assert_eq!(service.list("100"), vec![(2, "Gadget".to_string())]);
    }

    #[tokio::test]
    async fn test_remove_absent_code_is_not_found() {
        let dir = TempDir::new().unwrap();
        let mut service = open_in(&dir).await;
        service.add("100", 1, "Widget").await.unwrap();

        assert!(matches!(
            service.remove("100", 2, Privilege::Elevated).await,
            Err(CatalogError::NotFound(2))
        ));
        assert!(matches!(
            service.remove("unknown", 1, Privilege::Elevated).await,
            Err(CatalogError::NotFound(1))
        ));
    }

    #[tokio::test]
    async fn test_mutations_survive_reopen() {
        let dir = TempDir::new().unwrap();
        {
            let mut service = open_in(&dir).await;
            service.add("100", 1, "Widget").await.unwrap();
            service.add("100", 2, "Gadget").await.unwrap();
            service.add("200", 1, "Other").await.unwrap();
            service.remove("100", 1, Privilege::Elevated).await.unwrap();
        }

        let service = open_in(&dir).await;

        assert_eq!(service.list("100"), vec![(2, "Gadget".to_string())]);
        assert_eq!(service.list("200"), vec![(1, "Other".to_string())]);
    }

    #[tokio::test]
    async fn test_removing_last_product_keeps_empty_channel() {
        let dir = TempDir::new().unwrap();
        let mut service = open_in(&dir).await;
        service.add("100", 1, "Widget").await.unwrap();
        service.remove("100", 1, Privilege::Elevated).await.unwrap();

        let raw = std::fs::read_to_string(dir.path().join("products.json")).unwrap();

        assert_eq!(raw, "{\n    \"100\": {}\n}");
    }

    #[tokio::test]
    async fn test_malformed_storage_starts_empty() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("products.json"), "][ definitely not json").unwrap();

        let service = open_in(&dir).await;

        assert!(service.catalog().is_empty());
    }

    #[tokio::test]
    async fn test_save_failure_keeps_in_memory_change() {
        let dir = TempDir::new().unwrap();
        let store = CatalogStore::new(dir.path().join("missing-dir").join("products.json"));
        let mut service = CatalogService::open(store).await;

        service.add("100", 1, "Widget").await.unwrap();

        assert_eq!(service.list("100"), vec![(1, "Widget".to_string())]);
        assert!(!dir.path().join("missing-dir").exists());
    }
}
