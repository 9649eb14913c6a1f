//! A client paired with a catalog store.

use bea_cache::{CatalogCache, FileStore};
use bea_client::{BeaClient, DataRequest, data_frame};
use bea_core::{BeaError, Catalog, CatalogStore, Result};
use polars::prelude::DataFrame;
use serde_json::Value;
use tracing::debug;

/// One client and the cache its catalog is kept in.
///
/// Every request made through a session, whether for the catalog or for
/// data, shares the client's rate window.
#[derive(Debug)]
pub struct Session<S = FileStore> {
    client: BeaClient,
    cache: CatalogCache<S>,
}

impl<S: CatalogStore> Session<S> {
    /// Creates a session over `client` and `store`.
    #[must_use]
    pub const fn new(client: BeaClient, store: S) -> Self {
        Self {
            client,
            cache: CatalogCache::new(store),
        }
    }

    /// The underlying client.
    #[must_use]
    pub const fn client(&self) -> &BeaClient {
        &self.client
    }

    /// The catalog cache.
    #[must_use]
    pub const fn cache(&self) -> &CatalogCache<S> {
        &self.cache
    }

    /// Loads the catalog, rebuilding it if it is not from the current quarter.
    ///
    /// # Errors
    /// See [`CatalogCache::load`].
    pub async fn catalog(&self) -> Result<Catalog> {
        self.cache.load(&self.client).await
    }

    /// Rebuilds and stores the catalog.
    ///
    /// # Errors
    /// See [`CatalogCache::refresh`].
    pub async fn refresh(&self) -> Result<Catalog> {
        self.cache.refresh(&self.client).await
    }

    /// Fetches the raw `GetData` response for `request`.
    ///
    /// The envelope is checked, so an API error in the payload is returned
    /// as [`BeaError::Api`].
    ///
    /// # Errors
    /// Returns request, parse and API errors.
    pub async fn fetch_data(&self, request: &DataRequest) -> Result<Value> {
        let doc = self.client.fetch_data(request).await?;
        bea_client::response::results(&doc)?;
        Ok(doc)
    }

    /// Fetches data for `request` as a [`DataFrame`].
    ///
    /// # Errors
    /// Returns request, parse and API errors, and [`BeaError::NotFound`] if
    /// the response holds no rows.
    pub async fn fetch_frame(&self, request: &DataRequest) -> Result<DataFrame> {
        let doc = self.client.fetch_data(request).await?;
        let frame = data_frame(&doc)?;
        if frame.height() == 0 {
            return Err(BeaError::NotFound(format!(
                "no data rows returned for {}",
                request.dataset
            )));
        }
        debug!(rows = frame.height(), columns = frame.width(), "Converted data");
        Ok(frame)
    }
}
