#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/bea/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Rate-limited client for the Bureau of Economic Analysis data API.
//!
//! This crate provides:
//!
//! - [`BeaClient`] - Issues every request through one shared rolling window
//! - [`RateLimits`] / [`RateWindow`] - Request, byte and error budgets
//! - URL builders for `GETDATASETLIST`, `getparameterlist`, `GetParameterValues` and `GetData`
//! - [`data_frame`] - Converts `GetData` results to a polars `DataFrame`
//!
//! # Example
//!
//! ```no_run
//! use bea_client::{BeaClient, RateLimits};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = BeaClient::new("YOUR-36-CHARACTER-USER-ID")?
//!         .with_limits(RateLimits::default().with_max_requests(50));
//!
//!     let datasets = client.dataset_list().await?;
//!     println!("{datasets}");
//!
//!     Ok(())
//! }
//! ```

/// `GetData` requests and DataFrame conversion.
pub mod data;
/// Rolling-window request budget.
pub mod limiter;
/// `BEAAPI` envelope helpers.
pub mod response;
/// Transport implementations.
pub mod transport;

pub use data::{DataRequest, data_frame, data_rows};
pub use limiter::{RateLimiter, RateLimits, RateWindow};
pub use transport::{CannedTransport, ReqwestTransport};

use bea_core::{BeaError, HttpTransport, Result};
use reqwest::Url;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, warn};

/// BEA data API endpoint.
pub const BEA_BASE_URL: &str = "https://apps.bea.gov/api/data";

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for the BEA data API.
///
/// All requests share one [`RateLimiter`]. Its lock is held from the budget
/// check until the response has been counted, so concurrent callers are
/// serialized and can never jointly overrun a window.
pub struct BeaClient {
    transport: Arc<dyn HttpTransport>,
    api_key: String,
    base_url: String,
    limiter: Mutex<RateLimiter>,
}

impl fmt::Debug for BeaClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BeaClient")
            .field("api_key", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .field("transport", &self.transport)
            .finish_non_exhaustive()
    }
}

impl BeaClient {
    /// Creates a client for `api_key` using reqwest and the default limits.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let transport = ReqwestTransport::new(DEFAULT_TIMEOUT)?;
        Ok(Self::with_transport(api_key, Arc::new(transport)))
    }

    /// Creates a client that sends requests through `transport`.
    #[must_use]
    pub fn with_transport(api_key: impl Into<String>, transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            transport,
            api_key: api_key.into(),
            base_url: BEA_BASE_URL.to_string(),
            limiter: Mutex::new(RateLimiter::new(RateLimits::default())),
        }
    }

    /// Replaces the rate limits. The window restarts empty.
    #[must_use]
    pub fn with_limits(mut self, limits: RateLimits) -> Self {
        self.limiter = Mutex::new(RateLimiter::new(limits));
        self
    }

    /// Replaces the API endpoint.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// The configured rate limits.
    pub async fn limits(&self) -> RateLimits {
        *self.limiter.lock().await.limits()
    }

    /// A snapshot of the current rate window.
    pub async fn window(&self) -> RateWindow {
        self.limiter.lock().await.window()
    }

    /// Fetches `url` and parses the body as JSON.
    ///
    /// Waits first if the current window's budget is spent. The response is
    /// counted against the window whatever its status.
    ///
    /// # Errors
    /// Returns [`BeaError::Request`] for a non-200 status, [`BeaError::Network`]
    /// if no response arrived and [`BeaError::Parse`] for a non-JSON body.
    pub async fn fetch(&self, url: &str) -> Result<Value> {
        let response = {
            let mut limiter = self.limiter.lock().await;
            let waited = limiter.wait().await;
            if !waited.is_zero() {
                debug!(waited_secs = waited.as_secs_f64(), "Rate window rolled over");
            }

            let response = self.transport.get(url).await?;
            limiter.record(response.size(), response.is_ok());
            response
        };

        debug!(
            status = response.status,
            bytes = response.size(),
            "BEA response received"
        );

        if !response.is_ok() {
            warn!(status = response.status, "BEA request failed");
            return Err(BeaError::Request {
                status: response.status,
            });
        }

        serde_json::from_slice(&response.body)
            .map_err(|e| BeaError::Parse(format!("Failed to parse response body: {e}")))
    }

    /// Builds a request URL for `method` with the credential and JSON format attached.
    fn url(&self, method: &str, params: &[(&str, &str)]) -> Result<String> {
        let query = [("UserID", self.api_key.as_str()), ("method", method)]
            .into_iter()
            .chain(params.iter().copied())
            .chain([("ResultFormat", "JSON")]);
        Url::parse_with_params(&self.base_url, query)
            .map(String::from)
            .map_err(|e| BeaError::InvalidParameter(format!("Invalid base URL: {e}")))
    }

    /// URL listing every dataset.
    ///
    /// # Errors
    /// Fails if the base URL is invalid.
    pub fn dataset_list_url(&self) -> Result<String> {
        self.url("GETDATASETLIST", &[])
    }

    /// URL listing the parameters of `dataset`.
    ///
    /// # Errors
    /// Fails if the base URL is invalid.
    pub fn parameter_list_url(&self, dataset: &str) -> Result<String> {
        self.url("getparameterlist", &[("datasetname", dataset)])
    }

    /// URL listing the valid values of `parameter` in `dataset`.
    ///
    /// # Errors
    /// Fails if the base URL is invalid.
    pub fn parameter_values_url(&self, dataset: &str, parameter: &str) -> Result<String> {
        self.url(
            "GetParameterValues",
            &[("datasetname", dataset), ("ParameterName", parameter)],
        )
    }

    /// URL retrieving data for `request`.
    ///
    /// # Errors
    /// Fails if the base URL is invalid.
    pub fn data_url(&self, request: &DataRequest) -> Result<String> {
        let mut params = vec![("datasetname", request.dataset.as_str())];
        params.extend(
            request
                .params
                .iter()
                .map(|(name, value)| (name.as_str(), value.as_str())),
        );
        self.url("GetData", &params)
    }

    /// Fetches the dataset list.
    ///
    /// # Errors
    /// See [`BeaClient::fetch`].
    pub async fn dataset_list(&self) -> Result<Value> {
        debug!("Fetching dataset list");
        self.fetch(&self.dataset_list_url()?).await
    }

    /// Fetches the parameter list of `dataset`.
    ///
    /// # Errors
    /// See [`BeaClient::fetch`].
    pub async fn parameter_list(&self, dataset: &str) -> Result<Value> {
        debug!(dataset, "Fetching parameter list");
        self.fetch(&self.parameter_list_url(dataset)?).await
    }

    /// Fetches the valid values of `parameter` in `dataset`.
    ///
    /// # Errors
    /// See [`BeaClient::fetch`].
    pub async fn parameter_values(&self, dataset: &str, parameter: &str) -> Result<Value> {
        debug!(dataset, parameter, "Fetching parameter values");
        self.fetch(&self.parameter_values_url(dataset, parameter)?)
            .await
    }

    /// Fetches data for `request` as the raw response document.
    ///
    /// # Errors
    /// See [`BeaClient::fetch`].
    pub async fn fetch_data(&self, request: &DataRequest) -> Result<Value> {
        debug!(dataset = %request.dataset, params = request.params.len(), "Fetching data");
        self.fetch(&self.data_url(request)?).await
    }
}
