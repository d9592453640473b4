//! Single-table commands: latest, index, top30 and historical.

use crate::display::Output;
use anyhow::{Context, Result};
use dsefeed_lib::prelude::*;
use tracing::info;

/// Fetch a table that takes no parameters and write it out.
pub(crate) async fn run(
    service: &StockService,
    endpoint: Endpoint,
    output: &Output,
) -> Result<()> {
    let records = service
        .fetch(endpoint, None)
        .await
        .with_context(|| format!("Failed to fetch {endpoint} table"))?;

    info!(%endpoint, records = records.len(), "fetched");
    output.write(&records)
}

/// Fetch DSEX constituents, optionally narrowed to one trading code.
pub(crate) async fn index(
    service: &StockService,
    symbol: Option<&str>,
    output: &Output,
) -> Result<()> {
    let records = service
        .index(symbol)
        .await
        .context("Failed to fetch index table")?;

    if let Some(symbol) = symbol
        && records.is_empty()
    {
        info!(symbol, "no matching trading code");
    }

    output.write(&records)
}

/// Fetch the day-end archive for a date range.
pub(crate) async fn historical(
    service: &StockService,
    query: &HistoricalQuery,
    output: &Output,
) -> Result<()> {
    let records = service
        .historical(query)
        .await
        .with_context(|| format!("Failed to fetch archive for {query}"))?;

    info!(%query, records = records.len(), "fetched");
    output.write(&records)
}
