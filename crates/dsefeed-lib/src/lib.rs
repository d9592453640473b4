//! Rust library for scraping Dhaka Stock Exchange share tables.
//!
//! This is a facade crate that re-exports functionality from the dsefeed
//! workspace crates for convenient access.
//!
//! # Quick Start
//!
//! ```ignore
//! use dsefeed_lib::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let service = StockService::with_defaults()?;
//!
//!     let query = HistoricalQuery::new("2024-01-01", "2024-01-31").with_instrument("GP");
//!     for record in service.historical(&query).await? {
//!         let date = record.get("DATE").unwrap_or_default();
//!         println!("{date} {}", record.get("CLOSEP*").unwrap_or_default());
//!     }
//!
//!     service.close();
//!     Ok(())
//! }
//! ```

#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Re-export core types
pub use dsefeed_types::*;

// Re-export fetch functionality
#[cfg(feature = "fetch")]
pub use dsefeed_fetch::{
    ClientConfig, DEFAULT_BASE_URL, DEFAULT_USER_AGENT, FetchClient, FetchError, HttpTransport,
    ParseError, Session, StockService, TableSpec, Transport, TransportError, endpoint_url,
    header_row, parse_table, parse_table_html,
};

// Re-export formatters
#[cfg(feature = "format")]
pub use dsefeed_format::{
    CsvFormatter, FormatError, Formatter, JsonFormatter, JsonStyle, OutputFormat, TableFormatter,
    dhaka_timestamp,
};

/// Prelude module for convenient imports.
///
/// ```
/// use dsefeed_lib::prelude::*;
/// ```
pub mod prelude {
    pub use dsefeed_types::{
        DseError, Endpoint, FailurePolicy, HistoricalQuery, Record, Result,
    };

    #[cfg(feature = "fetch")]
    pub use dsefeed_fetch::{ClientConfig, HttpTransport, StockService, Transport};

    #[cfg(feature = "format")]
    pub use dsefeed_format::{
        CsvFormatter, Formatter, JsonFormatter, OutputFormat, TableFormatter,
    };
}
