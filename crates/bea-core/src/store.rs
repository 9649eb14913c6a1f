//! Store trait for persisting the dataset catalog.
//!
//! This module defines the [`CatalogStore`] trait that provides a unified interface
//! for saving and restoring a [`Catalog`] between runs.

use async_trait::async_trait;
use chrono::NaiveDate;
use std::fmt::Debug;

use crate::{error::Result, types::Catalog};

/// Trait for persisting a fetched catalog.
///
/// Implementations can store the catalog in various backends (flat file,
/// in-memory, etc.) so the full catalog build only runs once per quarter.
#[async_trait]
pub trait CatalogStore: Send + Sync + Debug {
    /// Human-readable location of the store, used in log and error messages.
    fn location(&self) -> String;

    /// Returns the date the stored catalog was built.
    ///
    /// Returns `Err(BeaError::CacheMiss)` if nothing is stored, and
    /// `Err(BeaError::CacheRead)` if the stored date cannot be read.
    async fn stored_date(&self) -> Result<NaiveDate>;

    /// Reads the full stored catalog.
    async fn read(&self) -> Result<Catalog>;

    /// Replaces the stored catalog.
    async fn write(&self, catalog: &Catalog) -> Result<()>;

    /// Removes the stored catalog, if any.
    async fn clear(&self) -> Result<()>;
}
