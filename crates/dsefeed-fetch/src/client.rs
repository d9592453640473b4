//! HTTP client configuration and the retrying fetch loop.

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, error, warn};
use url::Url;

/// Origin of the Dhaka Stock Exchange website.
pub const DEFAULT_BASE_URL: &str = "https://dsebd.org";

/// Browser-like user agent; the exchange blocks default library agents.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// Configuration for the HTTP client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Site origin every endpoint path is joined onto.
    pub base_url: String,
    /// Overall timeout for a single request attempt.
    pub timeout: Duration,
    /// Maximum attempts per fetch, including the first.
    pub max_retries: u32,
    /// Delay before the second attempt; doubles for each later attempt.
    pub backoff_base: Duration,
    /// Maximum concurrent requests across all hosts.
    pub max_connections: usize,
    /// Maximum concurrent requests to a single host.
    pub max_connections_per_host: usize,
    /// User agent string.
    pub user_agent: String,
    /// Skip TLS certificate verification.
    pub accept_invalid_certs: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
            max_retries: 3,
            backoff_base: Duration::from_secs(1),
            max_connections: 10,
            max_connections_per_host: 5,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            accept_invalid_certs: false,
        }
    }
}

impl ClientConfig {
    /// Sets the site origin.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Sets the per-attempt timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the maximum number of attempts per fetch.
    #[must_use]
    pub const fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Sets the first backoff delay.
    #[must_use]
    pub const fn with_backoff_base(mut self, backoff_base: Duration) -> Self {
        self.backoff_base = backoff_base;
        self
    }

    /// Sets the total and per-host concurrent request limits.
    #[must_use]
    pub const fn with_connection_limits(mut self, total: usize, per_host: usize) -> Self {
        self.max_connections = total;
        self.max_connections_per_host = per_host;
        self
    }

    /// Sets the user agent string.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Disables TLS certificate verification.
    ///
    /// Only use this when the origin's certificate cannot be verified.
    #[must_use]
    pub const fn with_accept_invalid_certs(mut self, accept: bool) -> Self {
        self.accept_invalid_certs = accept;
        self
    }
}

/// Errors from a single request attempt.
#[derive(Error, Debug)]
pub enum TransportError {
    /// Request could not be built, sent, or read.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with something other than 200 OK.
    #[error("HTTP {status}")]
    Status {
        /// HTTP status code.
        status: u16,
    },

    /// Connection pool is unavailable.
    #[error("Session error: {0}")]
    Session(String),
}

/// Errors from a fetch after the retry policy has run.
#[derive(Error, Debug)]
pub enum FetchError {
    /// Every attempt failed.
    #[error("Failed to fetch {url} after {attempts} attempts: {source}")]
    RetriesExhausted {
        /// The requested URL, including query string.
        url: String,
        /// Number of attempts made.
        attempts: u32,
        /// Error from the final attempt.
        source: TransportError,
    },
}

/// A single-attempt page transport.
///
/// Implementations perform exactly one request; retries are layered on top
/// by [`FetchClient`].
#[async_trait]
pub trait Transport: Send + Sync {
    /// Fetches `url` once, returning the body of a 200 response.
    async fn get(&self, url: &Url) -> Result<String, TransportError>;

    /// Releases pooled connections. Later requests may reopen them.
    fn close(&self) {}

    /// Returns true if the transport currently holds open resources.
    fn is_open(&self) -> bool {
        true
    }
}

/// Fetches pages through a [`Transport`], retrying failed attempts with
/// exponential backoff.
#[derive(Debug)]
pub struct FetchClient<T> {
    transport: T,
    max_retries: u32,
    backoff_base: Duration,
}

impl<T: Transport> FetchClient<T> {
    /// Creates a fetch client using the retry settings from `config`.
    #[must_use]
    pub const fn new(transport: T, config: &ClientConfig) -> Self {
        Self {
            transport,
            max_retries: config.max_retries,
            backoff_base: config.backoff_base,
        }
    }

    /// Returns the underlying transport.
    #[must_use]
    pub const fn transport(&self) -> &T {
        &self.transport
    }

    /// Returns the number of attempts each fetch makes at most.
    ///
    /// A configured value of zero still makes one attempt.
    #[must_use]
    pub fn attempts(&self) -> u32 {
        self.max_retries.max(1)
    }

    /// Fetches a page body, retrying failures.
    ///
    /// Attempt `n` (zero-based) that fails is followed by a sleep of
    /// `backoff_base * 2^n` unless it was the last attempt.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::RetriesExhausted`] if every attempt fails.
    pub async fn fetch(&self, url: &Url) -> Result<String, FetchError> {
        let attempts = self.attempts();
        let mut attempt = 0;

        loop {
            match self.transport.get(url).await {
                Ok(body) => {
                    debug!(%url, attempt, bytes = body.len(), "fetched");
                    return Ok(body);
                }
                Err(e) => {
                    attempt += 1;
                    if attempt >= attempts {
                        error!(%url, attempts, error = %e, "giving up");
                        return Err(FetchError::RetriesExhausted {
                            url: url.to_string(),
                            attempts,
                            source: e,
                        });
                    }

                    let delay = self.backoff_delay(attempt - 1);
                    warn!(%url, attempt, ?delay, error = %e, "fetch failed, retrying");
                    tokio::time::sleep(delay).await;
                }
            }
        }
    }

    /// Calculates the delay after the zero-based attempt `attempt`.
    fn backoff_delay(&self, attempt: u32) -> Duration {
        self.backoff_base.saturating_mul(1u32 << attempt.min(16))
    }
}
