//! Resolved runtime settings.

use bea::{BeaClient, RateLimits, ReqwestTransport};
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::cli::Cli;
use crate::error::CliError;

/// Settings after flags, environment and `.env` have been merged.
#[derive(Clone)]
pub(crate) struct Settings {
    pub(crate) api_key: String,
    pub(crate) cache_file: PathBuf,
    pub(crate) no_cache: bool,
    pub(crate) base_url: String,
    pub(crate) limits: RateLimits,
    pub(crate) timeout: Duration,
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("api_key", &"[REDACTED]")
            .field("cache_file", &self.cache_file)
            .field("no_cache", &self.no_cache)
            .field("base_url", &self.base_url)
            .field("limits", &self.limits)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl Settings {
    pub(crate) fn from_cli(cli: &Cli) -> Result<Self, CliError> {
        let api_key = cli
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .ok_or_else(|| {
                CliError::Config("an API key is required (--api-key or BEA_API_KEY)".to_string())
            })?
            .to_string();

        Ok(Self {
            api_key,
            cache_file: cli.cache_file.clone(),
            no_cache: cli.no_cache,
            base_url: cli.base_url.clone(),
            limits: RateLimits::default()
                .with_max_requests(cli.max_requests)
                .with_max_megabytes(cli.max_megabytes)
                .with_max_errors(cli.max_errors)
                .with_window(Duration::from_secs(cli.window_secs)),
            timeout: Duration::from_secs(cli.timeout_secs),
        })
    }

    /// Builds the rate-limited client these settings describe.
    pub(crate) fn client(&self) -> Result<BeaClient, CliError> {
        let transport = ReqwestTransport::new(self.timeout)?;
        Ok(BeaClient::with_transport(self.api_key.clone(), Arc::new(transport))
            .with_limits(self.limits)
            .with_base_url(self.base_url.clone()))
    }
}
