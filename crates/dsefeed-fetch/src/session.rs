//! Connection pool lifecycle and the reqwest-backed transport.

use async_trait::async_trait;
use parking_lot::{Mutex, RwLock};
use reqwest::{Client, StatusCode};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};
use tracing::{debug, warn};
use url::Url;

use crate::{ClientConfig, Transport, TransportError};

/// Shared connection pool with lazy creation and explicit close.
///
/// The underlying [`Client`] is built on first use and dropped by
/// [`Session::close`]; the next request builds a fresh one. Requests that
/// already hold a clone of the old client finish on it.
///
/// Concurrency is capped by two semaphores: one across all hosts and one per
/// host. A request holds a permit from each for its whole duration.
#[derive(Debug)]
pub struct Session {
    config: ClientConfig,
    client: RwLock<Option<Client>>,
    total: Arc<Semaphore>,
    per_host: Mutex<HashMap<String, Arc<Semaphore>>>,
}

/// Permits held while a request is in flight.
#[derive(Debug)]
pub struct ConnectionPermit {
    _host: OwnedSemaphorePermit,
    _total: OwnedSemaphorePermit,
}

impl Session {
    /// Creates a session. No connections are opened until the first request.
    #[must_use]
    pub fn new(config: ClientConfig) -> Self {
        let total = Arc::new(Semaphore::new(config.max_connections.max(1)));
        Self {
            config,
            client: RwLock::new(None),
            total,
            per_host: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the session configuration.
    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Returns true if a client is currently open.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.client.read().is_some()
    }

    /// Returns the pooled client, building it if none is open.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn client(&self) -> Result<Client, TransportError> {
        if let Some(client) = self.client.read().as_ref() {
            return Ok(client.clone());
        }

        let mut slot = self.client.write();
        // Another caller may have built it while we waited for the lock
        if let Some(client) = slot.as_ref() {
            return Ok(client.clone());
        }

        let client = build_client(&self.config)?;
        *slot = Some(client.clone());
        Ok(client)
    }

    /// Drops the pooled client. Does nothing if already closed.
    ///
    /// Returns true if a client was open.
    pub fn close(&self) -> bool {
        let closed = self.client.write().take().is_some();
        if closed {
            debug!("session closed");
        }
        closed
    }

    /// Waits for a free connection slot for `host`.
    ///
    /// # Errors
    ///
    /// Returns an error if the limiting semaphores have been shut down.
    pub async fn acquire(&self, host: &str) -> Result<ConnectionPermit, TransportError> {
        let host_limit = {
            let mut per_host = self.per_host.lock();
            Arc::clone(per_host.entry(host.to_string()).or_insert_with(|| {
                Arc::new(Semaphore::new(self.config.max_connections_per_host.max(1)))
            }))
        };

        // Host first, so a request queued behind its host does not hold a global slot
        let host = host_limit
            .acquire_owned()
            .await
            .map_err(|e| TransportError::Session(e.to_string()))?;
        let total = Arc::clone(&self.total)
            .acquire_owned()
            .await
            .map_err(|e| TransportError::Session(e.to_string()))?;

        Ok(ConnectionPermit {
            _host: host,
            _total: total,
        })
    }
}

fn build_client(config: &ClientConfig) -> Result<Client, TransportError> {
    if config.accept_invalid_certs {
        warn!(base_url = %config.base_url, "TLS certificate verification disabled");
    }

    let client = Client::builder()
        .pool_max_idle_per_host(config.max_connections_per_host)
        .pool_idle_timeout(Duration::from_secs(90))
        .tcp_keepalive(Duration::from_secs(60))
        .timeout(config.timeout)
        .connect_timeout(config.timeout.min(Duration::from_secs(10)))
        .user_agent(&config.user_agent)
        .gzip(true)
        .danger_accept_invalid_certs(config.accept_invalid_certs)
        .build()?;

    debug!(user_agent = %config.user_agent, timeout = ?config.timeout, "session opened");
    Ok(client)
}

/// [`Transport`] that issues real HTTP requests through a [`Session`].
#[derive(Debug, Clone)]
pub struct HttpTransport {
    session: Arc<Session>,
}

impl HttpTransport {
    /// Creates a transport with its own session.
    #[must_use]
    pub fn new(config: ClientConfig) -> Self {
        Self::with_session(Arc::new(Session::new(config)))
    }

    /// Creates a transport over an existing session.
    #[must_use]
    pub const fn with_session(session: Arc<Session>) -> Self {
        Self { session }
    }

    /// Returns the session backing this transport.
    #[must_use]
    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: &Url) -> Result<String, TransportError> {
        let _permit = self.session.acquire(url.host_str().unwrap_or_default()).await?;
        let client = self.session.client()?;

        let response = client.get(url.clone()).send().await?;
        let status = response.status();
        if status != StatusCode::OK {
            return Err(TransportError::Status {
                status: status.as_u16(),
            });
        }

        Ok(response.text().await?)
    }

    fn close(&self) {
        self.session.close();
    }

    fn is_open(&self) -> bool {
        self.session.is_open()
    }
}
