//! Flat-file catalog store.

use async_trait::async_trait;
use bea_core::{BeaError, Catalog, CatalogStore, Result};
use chrono::NaiveDate;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, instrument};

use crate::format::{deserialize, parse_date_line, serialize};

/// Default catalog file name.
pub const DEFAULT_CACHE_FILE: &str = "beaDataSets.txt";

/// Catalog stored in a single text file.
///
/// Writes go to a sibling `.tmp` file which is then renamed over the target,
/// so an interrupted write never leaves a truncated catalog behind.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Creates a store backed by the file at `path`. The file need not exist.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the catalog file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.clone().into_os_string();
        name.push(".tmp");
        PathBuf::from(name)
    }

    fn read_error(&self, e: &std::io::Error) -> BeaError {
        if e.kind() == ErrorKind::NotFound {
            BeaError::CacheMiss(self.location())
        } else {
            BeaError::CacheRead(format!("{}: {e}", self.location()))
        }
    }
}

impl Default for FileStore {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_FILE)
    }
}

#[async_trait]
impl CatalogStore for FileStore {
    fn location(&self) -> String {
        self.path.display().to_string()
    }

    #[instrument(skip(self), fields(path = %self.path.display()))]
    async fn stored_date(&self) -> Result<NaiveDate> {
        let file = fs::File::open(&self.path)
            .await
            .map_err(|e| self.read_error(&e))?;
        let mut line = String::new();
        BufReader::new(file)
            .read_line(&mut line)
            .await
            .map_err(|e| self.read_error(&e))?;
        parse_date_line(&line)
    }

    #[instrument(skip(self), fields(path = %self.path.display()))]
    async fn read(&self) -> Result<Catalog> {
        let text = fs::read_to_string(&self.path)
            .await
            .map_err(|e| self.read_error(&e))?;
        let catalog = deserialize(&text)?;
        debug!(datasets = catalog.datasets.len(), "Read catalog file");
        Ok(catalog)
    }

    #[instrument(skip(self, catalog), fields(path = %self.path.display()))]
    async fn write(&self, catalog: &Catalog) -> Result<()> {
        let text = serialize(catalog)?;
        let temp = self.temp_path();
        fs::write(&temp, text.as_bytes())
            .await
            .map_err(|e| BeaError::Cache(format!("{}: {e}", temp.display())))?;
        fs::rename(&temp, &self.path)
            .await
            .map_err(|e| BeaError::Cache(format!("{}: {e}", self.location())))?;
        debug!(bytes = text.len(), "Wrote catalog file");
        Ok(())
    }

    #[instrument(skip(self), fields(path = %self.path.display()))]
    async fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path).await {
            Ok(()) => {
                debug!("Removed catalog file");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(BeaError::Cache(format!("{}: {e}", self.location()))),
        }
    }
}
