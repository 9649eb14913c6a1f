//! In-memory catalog store.

use async_trait::async_trait;
use bea_core::{BeaError, Catalog, CatalogStore, Result};
use chrono::NaiveDate;
use tokio::sync::RwLock;
use tracing::{debug, instrument};

/// Volatile store for testing and for runs that should not touch the disk.
///
/// The catalog is lost when the store is dropped.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    catalog: RwLock<Option<Catalog>>,
}

impl InMemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store already holding `catalog`.
    #[must_use]
    pub fn with_catalog(catalog: Catalog) -> Self {
        Self {
            catalog: RwLock::new(Some(catalog)),
        }
    }

    fn miss(&self) -> BeaError {
        BeaError::CacheMiss(self.location())
    }
}

#[async_trait]
impl CatalogStore for InMemoryStore {
    fn location(&self) -> String {
        ":memory:".to_string()
    }

    async fn stored_date(&self) -> Result<NaiveDate> {
        self.catalog
            .read()
            .await
            .as_ref()
            .map(|catalog| catalog.as_of)
            .ok_or_else(|| self.miss())
    }

    #[instrument(skip(self))]
    async fn read(&self) -> Result<Catalog> {
        let catalog = self.catalog.read().await.clone().ok_or_else(|| self.miss())?;
        debug!(datasets = catalog.datasets.len(), "Cache hit for catalog");
        Ok(catalog)
    }

    #[instrument(skip(self, catalog), fields(datasets = catalog.datasets.len()))]
    async fn write(&self, catalog: &Catalog) -> Result<()> {
        *self.catalog.write().await = Some(catalog.clone());
        debug!("Cached catalog");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn clear(&self) -> Result<()> {
        self.catalog.write().await.take();
        debug!("Cleared cached catalog");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bea_core::Dataset;

    #[tokio::test]
    async fn test_memory_store_lifecycle() {
        let store = InMemoryStore::new();
        assert!(matches!(store.stored_date().await, Err(BeaError::CacheMiss(ref l)) if l == ":memory:"));
        assert!(store.read().await.is_err());

        let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        let catalog = Catalog::new(date, vec![Dataset::new("Regional", "Regional data sets")]);
        store.write(&catalog).await.unwrap();

        assert_eq!(store.stored_date().await.unwrap(), date);
        assert_eq!(store.read().await.unwrap(), catalog);

        store.clear().await.unwrap();
        assert!(matches!(store.read().await, Err(BeaError::CacheMiss(_))));
    }

    #[tokio::test]
    async fn test_with_catalog() {
        let date = NaiveDate::from_ymd_opt(2023, 11, 3).unwrap();
        let store = InMemoryStore::with_catalog(Catalog::new(date, Vec::new()));
        assert_eq!(store.stored_date().await.unwrap(), date);
    }
}
