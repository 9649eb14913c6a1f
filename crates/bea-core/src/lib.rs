#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/bea/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Core traits and types for the BEA data API client.
//!
//! This crate provides the foundational abstractions shared by the other crates:
//!
//! - [`Catalog`](types::Catalog) - Datasets, their parameters and valid inputs
//! - [`BeaError`](error::BeaError) - Error type for every operation
//! - [`FiscalQuarter`](quarter::FiscalQuarter) - Quarter used to judge catalog freshness
//! - [`HttpTransport`](transport::HttpTransport) - Outbound request seam
//! - [`CatalogStore`](store::CatalogStore) - Catalog persistence abstraction

/// Error types for API, parsing and cache operations.
pub mod error;
/// Calendar quarter definitions.
pub mod quarter;
/// Catalog persistence trait.
pub mod store;
/// HTTP transport trait and response type.
pub mod transport;
/// Catalog data types (Dataset, Parameter, ValidInput, etc.).
pub mod types;

// Re-export commonly used items at crate root
pub use error::{BeaError, Result};
pub use quarter::FiscalQuarter;
pub use store::CatalogStore;
pub use transport::{HttpResponse, HttpTransport};
pub use types::{Catalog, Dataset, InputValue, NOT_APPLICABLE, Parameter, ValidInput, YearRanges};
