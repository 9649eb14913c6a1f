#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/bea/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Catalog persistence for the BEA data API.
//!
//! This crate provides implementations of the [`CatalogStore`] trait from `bea-core`:
//!
//! - [`FileStore`] - Persistent flat-file store (default `beaDataSets.txt`)
//! - [`InMemoryStore`] - Simple in-memory store for testing
//!
//! and [`CatalogCache`], which decides between the stored catalog and a rebuild.

/// Flat-file store.
pub mod file;
/// Catalog file codec.
pub mod format;
/// Quarter-fresh loader.
pub mod loader;
/// In-memory store.
pub mod memory;

// Re-export the trait for convenience
pub use bea_core::CatalogStore;

pub use file::{DEFAULT_CACHE_FILE, FileStore};
pub use format::{deserialize, serialize};
pub use loader::CatalogCache;
pub use memory::InMemoryStore;
