//! [`HttpTransport`] implementations.

use async_trait::async_trait;
use bea_core::{BeaError, HttpResponse, HttpTransport, Result};
use reqwest::Url;
use std::sync::Mutex;
use std::time::Duration;
use tracing::trace;

/// User agent sent with every request.
const USER_AGENT: &str = concat!("bea-client/", env!("CARGO_PKG_VERSION"));

/// Production transport backed by a reqwest client.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Creates a transport whose requests time out after `timeout`.
    ///
    /// # Errors
    /// Returns an error if the TLS backend cannot be initialized.
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| BeaError::Network(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn get(&self, url: &str) -> Result<HttpResponse> {
        // The URL carries the API key, keep it out of error messages.
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| BeaError::Network(e.without_url().to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| BeaError::Network(e.without_url().to_string()))?;

        Ok(HttpResponse::new(status, body.to_vec()))
    }
}

/// Transport that answers from a fixed set of canned responses.
///
/// A route matches when every one of its query pairs appears in the request
/// URL (names compared case-insensitively, values exactly). Routes are tried
/// in insertion order; unmatched requests get the fallback response, or 404.
/// Every requested URL is recorded, which makes this transport suitable for
/// offline runs and tests.
#[derive(Debug, Default)]
pub struct CannedTransport {
    routes: Vec<(Vec<(String, String)>, HttpResponse)>,
    fallback: Option<HttpResponse>,
    calls: Mutex<Vec<String>>,
}

impl CannedTransport {
    /// Creates a transport with no routes.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a route answering requests whose query contains all of `query`.
    #[must_use]
    pub fn route(mut self, query: &[(&str, &str)], response: HttpResponse) -> Self {
        let query = query
            .iter()
            .map(|(name, value)| ((*name).to_string(), (*value).to_string()))
            .collect();
        self.routes.push((query, response));
        self
    }

    /// Adds a route answering with a 200 JSON body.
    #[must_use]
    pub fn json(self, query: &[(&str, &str)], body: &serde_json::Value) -> Self {
        self.route(query, HttpResponse::ok(body.to_string()))
    }

    /// Sets the response for requests no route matches.
    #[must_use]
    pub fn fallback(mut self, response: HttpResponse) -> Self {
        self.fallback = Some(response);
        self
    }

    /// URLs requested so far, in order.
    #[must_use]
    pub fn calls(&self) -> Vec<String> {
        self.calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }

    /// Number of requests served so far.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.calls.lock().map(|calls| calls.len()).unwrap_or(0)
    }

    fn respond(&self, url: &str) -> Result<HttpResponse> {
        let parsed = Url::parse(url).map_err(|e| BeaError::InvalidParameter(e.to_string()))?;
        let pairs: Vec<(String, String)> = parsed
            .query_pairs()
            .map(|(name, value)| (name.into_owned(), value.into_owned()))
            .collect();

        let matched = self.routes.iter().find(|(query, _)| {
            query.iter().all(|(name, value)| {
                pairs
                    .iter()
                    .any(|(n, v)| n.eq_ignore_ascii_case(name) && v == value)
            })
        });

        Ok(match (matched, &self.fallback) {
            (Some((_, response)), _) => response.clone(),
            (None, Some(fallback)) => fallback.clone(),
            (None, None) => HttpResponse::new(404, Vec::new()),
        })
    }
}

#[async_trait]
impl HttpTransport for CannedTransport {
    async fn get(&self, url: &str) -> Result<HttpResponse> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(url.to_string());
        }
        let response = self.respond(url)?;
        trace!(status = response.status, "CannedTransport: served response");
        Ok(response)
    }
}
