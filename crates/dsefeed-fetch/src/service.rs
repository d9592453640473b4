//! Exchange data operations.

use dsefeed_types::{DseError, Endpoint, FailurePolicy, HistoricalQuery, Record, Result};
use tracing::{debug, warn};
use url::Url;

use crate::{
    ClientConfig, FetchClient, HttpTransport, TableSpec, Transport, endpoint_url,
    parse_table_html,
};

/// Retrieves share tables from the exchange website.
///
/// The service owns one [`Transport`] (by default an [`HttpTransport`] with a
/// lazily opened connection pool) shared by every operation. Operations take
/// `&self` and may run concurrently.
///
/// Each [`Endpoint`] has a default [`FailurePolicy`]: index pages degrade to an
/// empty list on failure while latest prices and the archive return the error.
/// [`StockService::with_failure_policy`] applies one policy to all operations.
#[derive(Debug)]
pub struct StockService<T = HttpTransport> {
    client: FetchClient<T>,
    base_url: Url,
    failure_policy: Option<FailurePolicy>,
}

impl StockService<HttpTransport> {
    /// Creates a service that fetches over HTTP.
    ///
    /// # Errors
    ///
    /// Returns an error if `config.base_url` is not a valid URL.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let transport = HttpTransport::new(config.clone());
        Self::with_transport(transport, &config)
    }

    /// Creates an HTTP service with default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the default base URL is rejected.
    pub fn with_defaults() -> Result<Self> {
        Self::new(ClientConfig::default())
    }
}

impl<T: Transport> StockService<T> {
    /// Creates a service over a custom transport.
    ///
    /// Retry settings and the base URL come from `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if `config.base_url` is not a valid URL.
    pub fn with_transport(transport: T, config: &ClientConfig) -> Result<Self> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| DseError::Config(format!("invalid base URL {}: {e}", config.base_url)))?;

        Ok(Self {
            client: FetchClient::new(transport, config),
            base_url,
            failure_policy: None,
        })
    }

    /// Applies `policy` to every operation, replacing per-endpoint defaults.
    #[must_use]
    pub fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.failure_policy = Some(policy);
        self
    }

    /// Returns the failure policy used for `endpoint`.
    #[must_use]
    pub fn failure_policy(&self, endpoint: Endpoint) -> FailurePolicy {
        self.failure_policy
            .unwrap_or_else(|| endpoint.default_failure_policy())
    }

    /// Returns the site origin endpoints are resolved against.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Returns the underlying transport.
    #[must_use]
    pub const fn transport(&self) -> &T {
        self.client.transport()
    }

    /// Fetches latest share prices.
    ///
    /// # Errors
    ///
    /// Under the default policy, returns an error if the page cannot be
    /// fetched or parsed.
    pub async fn latest(&self) -> Result<Vec<Record>> {
        self.fetch(Endpoint::Latest, None).await
    }

    /// Fetches DSEX index constituents, optionally only those whose
    /// trading code equals `symbol` (ignoring case).
    ///
    /// A blank `symbol` means no filter.
    ///
    /// # Errors
    ///
    /// Under the default policy failures yield an empty list instead.
    pub async fn index(&self, symbol: Option<&str>) -> Result<Vec<Record>> {
        let records = self.fetch(Endpoint::Index, None).await?;

        Ok(match symbol.filter(|s| !s.is_empty()) {
            Some(symbol) => records
                .into_iter()
                .filter(|record| record.matches_trading_code(symbol))
                .collect(),
            None => records,
        })
    }

    /// Fetches DS30 index constituents.
    ///
    /// # Errors
    ///
    /// Under the default policy failures yield an empty list instead.
    pub async fn top_movers(&self) -> Result<Vec<Record>> {
        self.fetch(Endpoint::TopMovers, None).await
    }

    /// Fetches the day-end archive for a date range.
    ///
    /// # Errors
    ///
    /// Under the default policy, returns an error if the page cannot be
    /// fetched or parsed.
    pub async fn historical(&self, query: &HistoricalQuery) -> Result<Vec<Record>> {
        self.fetch(Endpoint::Historical, Some(query)).await
    }

    /// Fetches and parses any endpoint, applying its failure policy.
    ///
    /// # Errors
    ///
    /// Returns an error when the fetch fails under [`FailurePolicy::Propagate`],
    /// or if `endpoint` needs a query and none was given.
    pub async fn fetch(
        &self,
        endpoint: Endpoint,
        query: Option<&HistoricalQuery>,
    ) -> Result<Vec<Record>> {
        self.fetch_as(endpoint, query, TableSpec::for_endpoint(endpoint)).await
    }

    /// Fetches `endpoint` and reads it with `spec` instead of the endpoint's
    /// own table spec.
    #[tracing::instrument(skip_all, fields(endpoint = %endpoint))]
    async fn fetch_as(
        &self,
        endpoint: Endpoint,
        query: Option<&HistoricalQuery>,
        spec: TableSpec<'static>,
    ) -> Result<Vec<Record>> {
        if endpoint.has_query() && query.is_none() {
            return Err(DseError::Config(format!(
                "{endpoint} endpoint requires a date range"
            )));
        }

        match self.fetch_records(endpoint, query, spec).await {
            Ok(records) => {
                debug!(records = records.len(), "parsed");
                Ok(records)
            }
            Err(e) => match self.failure_policy(endpoint) {
                FailurePolicy::Propagate => Err(e),
                FailurePolicy::Degrade => {
                    warn!(error = %e, "returning empty result");
                    Ok(Vec::new())
                }
            },
        }
    }

    async fn fetch_records(
        &self,
        endpoint: Endpoint,
        query: Option<&HistoricalQuery>,
        spec: TableSpec<'static>,
    ) -> Result<Vec<Record>> {
        let url = endpoint_url(&self.base_url, endpoint, query)
            .map_err(|e| DseError::Config(e.to_string()))?;

        let html = self
            .client
            .fetch(&url)
            .await
            .map_err(|e| DseError::Fetch(e.to_string()))?;

        // Parsing is CPU-bound; keep it off the async workers
        tokio::task::spawn_blocking(move || parse_table_html(&html, &spec))
            .await
            .map_err(|e| DseError::Task(e.to_string()))?
            .map_err(|e| DseError::Parse(e.to_string()))
    }

    /// Releases the connection pool. Later operations reopen it.
    pub fn close(&self) {
        self.client.transport().close();
    }

    /// Returns true if the connection pool is open.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.client.transport().is_open()
    }
}
