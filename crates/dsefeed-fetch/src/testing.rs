//! Fake transports and page fixtures shared by unit tests.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::{HashMap, VecDeque};
use std::time::Duration;
use tokio::time::Instant;
use url::Url;

use crate::{Transport, TransportError};

/// Replays a fixed sequence of responses, recording when each call happened.
#[derive(Debug)]
pub(crate) struct ScriptedTransport {
    script: Mutex<VecDeque<Result<String, u16>>>,
    fallback: Option<u16>,
    calls: Mutex<Vec<Instant>>,
}

impl ScriptedTransport {
    /// Responds with `script` in order; `Err(status)` fails with that status.
    pub(crate) fn new(script: Vec<Result<String, u16>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            fallback: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Fails every call with `status`.
    pub(crate) fn always_failing(status: u16) -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            fallback: Some(status),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.lock().len()
    }

    /// Time between consecutive calls.
    pub(crate) fn gaps(&self) -> Vec<Duration> {
        self.calls
            .lock()
            .windows(2)
            .map(|w| w[1].duration_since(w[0]))
            .collect()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn get(&self, _url: &Url) -> Result<String, TransportError> {
        self.calls.lock().push(Instant::now());
        let next = self.script.lock().pop_front();
        match next {
            Some(Ok(body)) => Ok(body),
            Some(Err(status)) => Err(TransportError::Status { status }),
            None => Err(TransportError::Status {
                status: self.fallback.unwrap_or(599),
            }),
        }
    }
}

/// Serves fixed pages by URL path; unknown paths answer 404.
#[derive(Debug, Default)]
pub(crate) struct PageTransport {
    pages: HashMap<String, String>,
    requested: Mutex<Vec<String>>,
    closed: Mutex<bool>,
}

impl PageTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_page(mut self, path: &str, html: &str) -> Self {
        self.pages.insert(path.to_string(), html.to_string());
        self
    }

    /// Full URLs requested so far.
    pub(crate) fn requested(&self) -> Vec<String> {
        self.requested.lock().clone()
    }
}

#[async_trait]
impl Transport for PageTransport {
    async fn get(&self, url: &Url) -> Result<String, TransportError> {
        self.requested.lock().push(url.to_string());
        self.pages
            .get(url.path())
            .cloned()
            .ok_or(TransportError::Status { status: 404 })
    }

    fn close(&self) {
        *self.closed.lock() = true;
    }

    fn is_open(&self) -> bool {
        !*self.closed.lock()
    }
}

/// A price page laid out like the exchange's share tables.
pub(crate) const LATEST_PAGE: &str = r#"
<html><body>
<table class="table table-bordered background-white shares-table fixedHeader">
  <tr>
    <th>#</th>
    <th>TRADING CODE</th>
    <th>LTP*</th>
    <th>HIGH</th>
    <th>LOW</th>
    <th>CLOSEP*</th>
    <th>YCP*</th>
    <th>CHANGE</th>
    <th>TRADE</th>
    <th>VALUE (mn)</th>
    <th>VOLUME</th>
  </tr>
  <tr>
    <td>1</td>
    <td><a href="displayCompany.php?name=1JANATAMF">1JANATAMF</a></td>
    <td>3.1</td><td>3.2</td><td>3.0</td><td>3.1</td><td>3.1</td>
    <td>0</td><td>57</td><td>0.298</td><td>96,003</td>
  </tr>
  <tr>
    <td>2</td>
    <td><a href="displayCompany.php?name=GP">GP</a></td>
    <td>286.5</td><td>289</td><td>285.1</td><td>286.5</td><td>287.2</td>
    <td>-0.7</td><td>1,204</td><td>51.712</td><td>1,234,567</td>
  </tr>
</table>
</body></html>
"#;

/// An index page whose trading codes differ in case.
pub(crate) const INDEX_PAGE: &str = r#"
<html><body>
<table class="table table-bordered shares-table">
  <tr><th>#</th><th>TRADING CODE</th><th>LTP</th></tr>
  <tr><td>1</td><td>abc</td><td>10.5</td></tr>
  <tr><td>2</td><td>BATBC</td><td>518.2</td></tr>
  <tr><td>3</td><td></td><td>1.0</td></tr>
</table>
</body></html>
"#;

/// An archive page with an explicit body section.
pub(crate) const HISTORICAL_PAGE: &str = r#"
<html><body>
<table class="table table-bordered shares-table">
  <thead>
    <tr><th>#</th><th>DATE</th><th>TRADING CODE</th><th>LTP*</th><th>VOLUME</th></tr>
  </thead>
  <tbody>
    <tr><td>1</td><td>2024-01-02</td><td>GP</td><td>286.5</td><td>1,500</td></tr>
    <tr><td>2</td><td>2024-01-03</td><td>GP</td><td>288</td><td>2,750,000</td></tr>
  </tbody>
</table>
</body></html>
"#;
