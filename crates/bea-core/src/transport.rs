//! HTTP transport trait.
//!
//! The rate-limited client never talks to the network directly; it sends every
//! GET through an [`HttpTransport`]. Production code uses a reqwest-backed
//! implementation, tests substitute canned responses.

use async_trait::async_trait;
use std::fmt::Debug;

use crate::error::Result;

/// A raw HTTP response: status code and the full body.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body bytes.
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Creates a response from a status code and body.
    #[must_use]
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Creates a 200 response.
    #[must_use]
    pub fn ok(body: impl Into<Vec<u8>>) -> Self {
        Self::new(200, body)
    }

    /// Returns true if the status is exactly 200.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.status == 200
    }

    /// Size of the body in bytes.
    #[must_use]
    pub fn size(&self) -> u64 {
        self.body.len() as u64
    }
}

/// Transport used to issue GET requests.
///
/// Implementations return `Ok` for any response the server produced,
/// whatever its status; `Err` is reserved for requests that never completed.
#[async_trait]
pub trait HttpTransport: Send + Sync + Debug {
    /// Issues a GET request to `url` and returns the complete response.
    async fn get(&self, url: &str) -> Result<HttpResponse>;
}
