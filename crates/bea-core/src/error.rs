//! Error types for BEA operations.
//!
//! This module defines [`BeaError`] which covers all error cases that can occur
//! when requesting data from the API, parsing its responses, or reading and
//! writing the catalog cache.

use thiserror::Error;

/// Errors that can occur during BEA operations.
#[derive(Error, Debug)]
pub enum BeaError {
    /// The server answered with a status other than 200.
    #[error("Error during request: HTTP {status}")]
    Request {
        /// The HTTP status code returned by the server.
        status: u16,
    },

    /// The request never produced a response (connection failure, timeout, etc.).
    #[error("Network error: {0}")]
    Network(String),

    /// A response body could not be interpreted.
    #[error("Parse error: {0}")]
    Parse(String),

    /// The API answered successfully but reported an error in its payload.
    #[error("BEA API error {code}: {description}")]
    Api {
        /// The `APIErrorCode` value.
        code: String,
        /// The `APIErrorDescription` value.
        description: String,
    },

    /// The cached catalog exists but could not be read or decoded.
    #[error("Cache read error: {0}")]
    CacheRead(String),

    /// No cached catalog exists at the given location.
    #[error("No cached catalog at {0}")]
    CacheMiss(String),

    /// The catalog could not be persisted.
    #[error("Cache error: {0}")]
    Cache(String),

    /// A dataset or parameter is not present in the catalog.
    #[error("Not found: {0}")]
    NotFound(String),

    /// An invalid parameter was provided.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

impl BeaError {
    /// Returns true if this error relates to the catalog cache.
    #[must_use]
    pub const fn is_cache_failure(&self) -> bool {
        matches!(self, Self::CacheRead(_) | Self::CacheMiss(_) | Self::Cache(_))
    }
}

/// Result type alias using [`BeaError`].
pub type Result<T> = std::result::Result<T, BeaError>;
