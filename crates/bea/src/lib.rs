#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/bea/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Unified interface to the Bureau of Economic Analysis data API.
//!
//! This crate re-exports the core types, the rate-limited client, the
//! catalog builder and the catalog cache, and provides a [`Session`] that
//! ties a client to a catalog store.
//!
//! # Example
//!
//! ```rust,ignore
//! use bea::{BeaClient, DataRequest, FileStore, Session};
//!
//! #[tokio::main]
//! async fn main() -> bea::Result<()> {
//!     let client = BeaClient::new(std::env::var("BEA_API_KEY").unwrap_or_default())?;
//!     let session = Session::new(client, FileStore::default());
//!
//!     let catalog = session.catalog().await?;
//!     println!("{} datasets as of {}", catalog.datasets.len(), catalog.as_of);
//!
//!     let request = DataRequest::new("NIPA")
//!         .param("TableName", "T10101")
//!         .param("Frequency", "Q")
//!         .param("Year", "2023");
//!     let frame = session.fetch_frame(&request).await?;
//!     println!("{frame}");
//!
//!     Ok(())
//! }
//! ```

// Core types and traits
pub use bea_core::*;

// Client
pub use bea_client::{
    BEA_BASE_URL, BeaClient, CannedTransport, DEFAULT_TIMEOUT, DataRequest, RateLimiter,
    RateLimits, RateWindow, ReqwestTransport, data_frame, data_rows, response,
};

// Catalog
pub use bea_catalog::{CatalogBuilder, YEAR_RANGE_DATASETS, has_year_ranges};

// Cache
pub use bea_cache::{CatalogCache, DEFAULT_CACHE_FILE, FileStore, InMemoryStore};

mod session;
pub use session::Session;
