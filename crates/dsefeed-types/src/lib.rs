//! Core types for the dsefeed stock data scraper.
//!
//! This crate provides the data structures shared by every dsefeed crate:
//!
//! - [`Record`] - One scraped table row keyed by column header
//! - [`Endpoint`] - The four exchange pages and how their tables are read
//! - [`FailurePolicy`] - Whether an operation propagates or swallows failures
//! - [`HistoricalQuery`] - Parameters for the day-end archive
//! - [`DseError`] - Operation-level error type

#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod endpoint;
mod error;
mod query;
mod record;

pub use endpoint::{Endpoint, EndpointDescriptor, EndpointParseError, FailurePolicy};
pub use error::{DseError, Result};
pub use query::{DEFAULT_INSTRUMENT, HistoricalQuery};
pub use record::{Record, TRADING_CODE};
