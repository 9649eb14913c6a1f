//! Rolling-window request budget.
//!
//! A [`RateWindow`] counts requests, received bytes and error responses since
//! the window opened. [`RateLimiter::wait`] blocks while any count is at or
//! above its ceiling and only returns once the window has rolled over.

use std::time::Duration;
use tokio::time::{Instant, sleep};
use tracing::info;

/// Default request ceiling per window.
pub const DEFAULT_MAX_REQUESTS: u32 = 100;

/// Default received-bytes ceiling per window (100 MiB).
pub const DEFAULT_MAX_BYTES: u64 = 100 * 1024 * 1024;

/// Default error-response ceiling per window.
pub const DEFAULT_MAX_ERRORS: u32 = 30;

/// Default window length.
pub const DEFAULT_WINDOW: Duration = Duration::from_secs(60);

/// Shortest pause while waiting. Rollover needs strictly more than a full
/// window to have elapsed, so a zero wait would never make progress.
const MIN_WAIT: Duration = Duration::from_millis(1);

/// Ceilings applied to each window.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RateLimits {
    /// Maximum requests per window.
    pub max_requests: u32,
    /// Maximum response bytes per window.
    pub max_bytes: u64,
    /// Maximum non-200 responses per window.
    pub max_errors: u32,
    /// Window length.
    pub window: Duration,
}

impl Default for RateLimits {
    fn default() -> Self {
        Self {
            max_requests: DEFAULT_MAX_REQUESTS,
            max_bytes: DEFAULT_MAX_BYTES,
            max_errors: DEFAULT_MAX_ERRORS,
            window: DEFAULT_WINDOW,
        }
    }
}

impl RateLimits {
    /// Sets the request ceiling.
    #[must_use]
    pub const fn with_max_requests(mut self, max_requests: u32) -> Self {
        self.max_requests = max_requests;
        self
    }

    /// Sets the byte ceiling.
    #[must_use]
    pub const fn with_max_bytes(mut self, max_bytes: u64) -> Self {
        self.max_bytes = max_bytes;
        self
    }

    /// Sets the byte ceiling in mebibytes.
    #[must_use]
    pub const fn with_max_megabytes(self, megabytes: u64) -> Self {
        self.with_max_bytes(megabytes.saturating_mul(1024 * 1024))
    }

    /// Sets the error ceiling.
    #[must_use]
    pub const fn with_max_errors(mut self, max_errors: u32) -> Self {
        self.max_errors = max_errors;
        self
    }

    /// Sets the window length.
    #[must_use]
    pub const fn with_window(mut self, window: Duration) -> Self {
        self.window = window;
        self
    }
}

/// Usage counted since `window_start`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RateWindow {
    /// Requests completed in this window.
    pub request_count: u32,
    /// Response bytes received in this window.
    pub bytes_received: u64,
    /// Non-200 responses in this window.
    pub error_count: u32,
    /// When this window opened.
    pub window_start: Instant,
}

impl RateWindow {
    /// Opens an empty window at `now`.
    #[must_use]
    pub const fn new(now: Instant) -> Self {
        Self {
            request_count: 0,
            bytes_received: 0,
            error_count: 0,
            window_start: now,
        }
    }

    /// Resets every counter if more than `length` has passed since the window opened.
    ///
    /// Returns true if the window rolled over.
    pub fn roll_over(&mut self, now: Instant, length: Duration) -> bool {
        if now.saturating_duration_since(self.window_start) > length {
            *self = Self::new(now);
            true
        } else {
            false
        }
    }

    /// Returns true if any counter has reached its ceiling.
    #[must_use]
    pub const fn is_exhausted(&self, limits: &RateLimits) -> bool {
        self.request_count >= limits.max_requests
            || self.bytes_received >= limits.max_bytes
            || self.error_count >= limits.max_errors
    }

    /// Time left until the window has run its full `length`.
    #[must_use]
    pub fn remaining(&self, now: Instant, length: Duration) -> Duration {
        length.saturating_sub(now.saturating_duration_since(self.window_start))
    }

    /// Counts one completed request of `bytes` size.
    pub fn record(&mut self, bytes: u64, succeeded: bool) {
        self.request_count = self.request_count.saturating_add(1);
        self.bytes_received = self.bytes_received.saturating_add(bytes);
        if !succeeded {
            self.error_count = self.error_count.saturating_add(1);
        }
    }
}

/// Gatekeeper for a single shared [`RateWindow`].
#[derive(Debug)]
pub struct RateLimiter {
    limits: RateLimits,
    window: RateWindow,
}

impl RateLimiter {
    /// Creates a limiter whose first window opens now.
    #[must_use]
    pub fn new(limits: RateLimits) -> Self {
        Self {
            limits,
            window: RateWindow::new(Instant::now()),
        }
    }

    /// The configured ceilings.
    #[must_use]
    pub const fn limits(&self) -> &RateLimits {
        &self.limits
    }

    /// A snapshot of the current window.
    #[must_use]
    pub const fn window(&self) -> RateWindow {
        self.window
    }

    /// Waits until the current window has capacity for another request.
    ///
    /// Returns how long the caller was suspended.
    pub async fn wait(&mut self) -> Duration {
        let length = self.limits.window;
        self.window.roll_over(Instant::now(), length);

        let mut waited = Duration::ZERO;
        while self.window.is_exhausted(&self.limits) {
            let remaining = self.window.remaining(Instant::now(), length);
            if !remaining.is_zero() {
                info!(
                    wait_secs = remaining.as_secs_f64(),
                    requests = self.window.request_count,
                    bytes = self.window.bytes_received,
                    errors = self.window.error_count,
                    "Limit exceeded, waiting for the window to roll over"
                );
            }
            let pause = remaining.max(MIN_WAIT);
            sleep(pause).await;
            waited += pause;
            self.window.roll_over(Instant::now(), length);
        }
        waited
    }

    /// Counts one completed request.
    pub fn record(&mut self, bytes: u64, succeeded: bool) {
        self.window.record(bytes, succeeded);
    }
}
