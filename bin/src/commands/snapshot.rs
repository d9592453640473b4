//! Snapshot command implementation.
//!
//! Fetches latest prices and both index tables concurrently over one session.

use crate::display::Output;
use anyhow::{Context, Result};
use dsefeed_lib::prelude::*;
use tracing::info;

/// Fetch latest, index and top30 tables concurrently and write them together.
pub(crate) async fn snapshot(service: &StockService, output: &Output) -> Result<()> {
    let endpoints = [Endpoint::Latest, Endpoint::Index, Endpoint::TopMovers];

    let results = futures::future::join_all(
        endpoints
            .iter()
            .map(|&endpoint| service.fetch(endpoint, None)),
    )
    .await;

    let mut sections = Vec::with_capacity(endpoints.len());
    for (endpoint, result) in endpoints.into_iter().zip(results) {
        let records = result.with_context(|| format!("Failed to fetch {endpoint} table"))?;
        sections.push((endpoint, records));
    }

    info!(
        tables = sections.len(),
        records = sections.iter().map(|(_, r)| r.len()).sum::<usize>(),
        "snapshot complete"
    );
    output.write_sections(&sections)
}
