//! Output formatters for dsefeed records.
//!
//! This crate provides formatters for writing scraped records
//! to various output formats:
//!
//! - [`TableFormatter`] - Aligned plain-text table
//! - [`CsvFormatter`] - CSV format
//! - [`JsonFormatter`] - JSON array, NDJSON, or enveloped JSON

#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod csv;
mod formatter;
mod json;
mod table;

pub use crate::csv::CsvFormatter;
pub use formatter::{FormatError, Formatter, OutputFormat};
pub use json::{JsonFormatter, JsonStyle, dhaka_timestamp};
pub use table::TableFormatter;
