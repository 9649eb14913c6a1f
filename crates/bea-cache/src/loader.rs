//! Quarter-fresh catalog loading.

use bea_catalog::CatalogBuilder;
use bea_client::BeaClient;
use bea_core::{BeaError, Catalog, CatalogStore, FiscalQuarter, Result};
use chrono::{Local, NaiveDate};
use tracing::{info, instrument, warn};

/// Serves the catalog from a store while it is from the current quarter,
/// and rebuilds it through the API otherwise.
#[derive(Debug)]
pub struct CatalogCache<S> {
    store: S,
}

impl<S: CatalogStore> CatalogCache<S> {
    /// Creates a loader over `store`.
    #[must_use]
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    /// The underlying store.
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Loads the catalog, judging freshness against today's local date.
    ///
    /// # Errors
    /// See [`CatalogCache::load_as_of`].
    pub async fn load(&self, client: &BeaClient) -> Result<Catalog> {
        self.load_as_of(client, Local::now().date_naive()).await
    }

    /// Loads the catalog as if today were `today`.
    ///
    /// A stored catalog from the same quarter of the same year is returned
    /// without any request. An outdated or missing catalog is rebuilt and
    /// written back.
    ///
    /// # Errors
    /// Returns [`BeaError::CacheRead`] if the stored catalog is malformed,
    /// and any error of [`CatalogBuilder::build_as_of`] when rebuilding.
    #[instrument(skip(self, client), fields(store = %self.store.location()))]
    pub async fn load_as_of(&self, client: &BeaClient, today: NaiveDate) -> Result<Catalog> {
        match self.store.stored_date().await {
            Ok(stored) if FiscalQuarter::is_fresh(stored, today) => {
                let catalog = self.store.read().await?;
                info!(
                    as_of = %catalog.as_of,
                    datasets = catalog.datasets.len(),
                    "Loaded catalog from cache"
                );
                Ok(catalog)
            }
            Ok(stored) => {
                info!(
                    stored = %FiscalQuarter::of(stored),
                    current = %FiscalQuarter::of(today),
                    "Cached catalog is outdated, downloading datasets"
                );
                self.rebuild(client, today).await
            }
            Err(BeaError::CacheMiss(location)) => {
                info!(%location, "No cached catalog, downloading datasets");
                self.rebuild(client, today).await
            }
            Err(e) => Err(e),
        }
    }

    /// Rebuilds and stores the catalog regardless of freshness.
    ///
    /// # Errors
    /// Returns any error of [`CatalogBuilder::build_as_of`].
    pub async fn refresh(&self, client: &BeaClient) -> Result<Catalog> {
        self.refresh_as_of(client, Local::now().date_naive()).await
    }

    /// Rebuilds and stores the catalog, stamped with `today`.
    ///
    /// # Errors
    /// Returns any error of [`CatalogBuilder::build_as_of`].
    #[instrument(skip(self, client), fields(store = %self.store.location()))]
    pub async fn refresh_as_of(&self, client: &BeaClient, today: NaiveDate) -> Result<Catalog> {
        self.rebuild(client, today).await
    }

    async fn rebuild(&self, client: &BeaClient, today: NaiveDate) -> Result<Catalog> {
        let catalog = CatalogBuilder::new(client).build_as_of(today).await?;

        // The built catalog is returned even when it cannot be stored.
        match self.store.write(&catalog).await {
            Ok(()) => info!(location = %self.store.location(), "Catalog written"),
            Err(e) => warn!(error = %e, "Failed to write catalog, it will be rebuilt next run"),
        }
        Ok(catalog)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FileStore, InMemoryStore};
    use bea_client::CannedTransport;
    use bea_core::Dataset;
    use serde_json::json;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    /// A one-dataset, one-parameter API: a full build costs three requests.
    fn api() -> (BeaClient, Arc<CannedTransport>) {
        let transport = Arc::new(
            CannedTransport::new()
                .json(
                    &[("method", "GETDATASETLIST")],
                    &json!({"BEAAPI": {"Results": {"Dataset": {
                        "DatasetName": "Regional", "DatasetDescription": "Regional data sets"
                    }}}}),
                )
                .json(
                    &[("method", "getparameterlist")],
                    &json!({"BEAAPI": {"Results": {"Parameter": {
                        "ParameterName": "GeoFips", "ParameterDescription": "Geography",
                        "ParameterIsRequiredFlag": "1"
                    }}}}),
                )
                .json(
                    &[("method", "GetParameterValues")],
                    &json!({"BEAAPI": {"Results": {"ParamValue": [
                        {"Key": "STATE", "Desc": "All states"},
                        {"Key": "COUNTY", "Desc": "All counties"}
                    ]}}}),
                ),
        );
        let client = BeaClient::with_transport("key", transport.clone());
        (client, transport)
    }

    fn stored(as_of: NaiveDate) -> Catalog {
        Catalog::new(as_of, vec![Dataset::new("NIPA", "Standard NIPA tables")])
    }

    #[tokio::test]
    async fn test_fresh_cache_makes_no_requests() {
        let (client, transport) = api();
        let cache = CatalogCache::new(InMemoryStore::with_catalog(stored(date(2024, 4, 1))));

        let catalog = cache.load_as_of(&client, date(2024, 6, 30)).await.unwrap();

        assert_eq!(catalog, stored(date(2024, 4, 1)));
        assert_eq!(transport.call_count(), 0);
    }

    #[tokio::test]
    async fn test_earlier_quarter_triggers_rebuild() {
        let (client, transport) = api();
        let cache = CatalogCache::new(InMemoryStore::with_catalog(stored(date(2024, 2, 1))));

        let catalog = cache.load_as_of(&client, date(2024, 4, 10)).await.unwrap();

        assert_eq!(transport.call_count(), 3);
        assert_eq!(catalog.as_of, date(2024, 4, 10));
        assert_eq!(catalog.datasets[0].name, "Regional");
        assert_eq!(catalog.datasets[0].parameters[0].valid_inputs.len(), 2);
        assert_eq!(cache.store().read().await.unwrap(), catalog);
    }

    #[tokio::test]
    async fn test_same_quarter_of_another_year_is_stale() {
        let (client, transport) = api();
        let cache = CatalogCache::new(InMemoryStore::with_catalog(stored(date(2023, 4, 20))));

        cache.load_as_of(&client, date(2024, 4, 20)).await.unwrap();
        assert_eq!(transport.call_count(), 3);
    }

    #[tokio::test]
    async fn test_missing_file_is_built_and_persisted() {
        let dir = TempDir::new().unwrap();
        let (client, transport) = api();
        let cache = CatalogCache::new(FileStore::new(dir.path().join("beaDataSets.txt")));

        let built = cache.load_as_of(&client, date(2024, 4, 10)).await.unwrap();
        assert_eq!(transport.call_count(), 3);

        let text = std::fs::read_to_string(cache.store().path()).unwrap();
        assert!(text.starts_with("2024-04-10\n"));

        // Second load in the same quarter is served from the file.
        let loaded = cache.load_as_of(&client, date(2024, 5, 1)).await.unwrap();
        assert_eq!(loaded, built);
        assert_eq!(transport.call_count(), 3);
    }

    #[tokio::test]
    async fn test_malformed_cache_is_reported_without_requests() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("beaDataSets.txt");
        std::fs::write(&path, "2024-04-02\n['NIPA', 'Regional']\n").unwrap();
        let (client, transport) = api();
        let cache = CatalogCache::new(FileStore::new(&path));

        let err = cache.load_as_of(&client, date(2024, 4, 10)).await.unwrap_err();

        assert!(matches!(err, BeaError::CacheRead(_)));
        assert_eq!(transport.call_count(), 0);
    }

    #[tokio::test]
    async fn test_unreadable_date_is_reported() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("beaDataSets.txt");
        std::fs::write(&path, "\0\n").unwrap();
        let (client, _) = api();
        let cache = CatalogCache::new(FileStore::new(&path));

        assert!(matches!(
            cache.load_as_of(&client, date(2024, 4, 10)).await,
            Err(BeaError::CacheRead(_))
        ));
    }

    #[tokio::test]
    async fn test_failed_write_still_returns_catalog() {
        let dir = TempDir::new().unwrap();
        let (client, _) = api();
        let cache = CatalogCache::new(FileStore::new(dir.path().join("missing").join("cache.txt")));

        let catalog = cache.load_as_of(&client, date(2024, 4, 10)).await.unwrap();
        assert_eq!(catalog.datasets.len(), 1);
    }

    #[tokio::test]
    async fn test_refresh_ignores_freshness() {
        let (client, transport) = api();
        let cache = CatalogCache::new(InMemoryStore::with_catalog(stored(date(2024, 4, 1))));

        let catalog = cache.refresh_as_of(&client, date(2024, 4, 2)).await.unwrap();

        assert_eq!(transport.call_count(), 3);
        assert_eq!(catalog.as_of, date(2024, 4, 2));
        assert_eq!(cache.store().stored_date().await.unwrap(), date(2024, 4, 2));
    }

    #[tokio::test]
    async fn test_failed_rebuild_keeps_old_cache() {
        let transport = Arc::new(CannedTransport::new());
        let client = BeaClient::with_transport("key", transport.clone());
        let cache = CatalogCache::new(InMemoryStore::with_catalog(stored(date(2024, 1, 5))));

        let err = cache.load_as_of(&client, date(2024, 4, 10)).await.unwrap_err();

        assert!(matches!(err, BeaError::Request { status: 404 }));
        assert_eq!(cache.store().stored_date().await.unwrap(), date(2024, 1, 5));
    }
}
