//! HTTP client, table parser and exchange operations for dsefeed.
//!
//! This crate provides the data acquisition pipeline:
//!
//! - [`endpoint_url`] - Builds exchange page URLs
//! - [`FetchClient`] - Retries a [`Transport`] with exponential backoff
//! - [`Session`] / [`HttpTransport`] - Lazily opened, closable connection pool
//! - [`parse_table`] - Header-driven HTML table parsing
//! - [`StockService`] - Latest, index, top-30 and archive operations

#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod client;
mod endpoint;
mod service;
mod session;
mod table;

#[cfg(test)]
mod testing;

pub use client::{
    ClientConfig, DEFAULT_BASE_URL, DEFAULT_USER_AGENT, FetchClient, FetchError, Transport,
    TransportError,
};
pub use endpoint::endpoint_url;
pub use service::StockService;
pub use session::{ConnectionPermit, HttpTransport, Session};
pub use table::{
    HEADER_TABLE_SELECTOR, ParseError, TableSpec, header_row, parse_table, parse_table_html,
};

// Re-exported so callers can implement `Transport` and hold parsed documents
pub use async_trait::async_trait;
pub use scraper::Html;
pub use url::Url;
