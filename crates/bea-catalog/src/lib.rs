#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/bea/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Catalog construction for the BEA data API.
//!
//! - [`CatalogBuilder`] - Fetches every dataset, parameter and valid input
//! - [`parse`] - Pure parsers for the metadata responses

/// Sequential catalog builder.
pub mod builder;
/// Metadata response parsers.
pub mod parse;

pub use builder::CatalogBuilder;
pub use parse::{
    YEAR_RANGE_DATASETS, has_year_ranges, parse_datasets, parse_parameters, parse_valid_inputs,
};
