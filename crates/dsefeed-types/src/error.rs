//! Error types for dsefeed.

use thiserror::Error;

/// Result type alias for dsefeed operations.
pub type Result<T> = std::result::Result<T, DseError>;

/// Errors that can occur while retrieving exchange data.
#[derive(Error, Debug)]
pub enum DseError {
    /// Page could not be fetched, including after retries.
    #[error("Fetch error: {0}")]
    Fetch(String),

    /// Page could not be read as a table.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Background parsing task failed to complete.
    #[error("Task error: {0}")]
    Task(String),

    /// Invalid client or endpoint configuration.
    #[error("Configuration error: {0}")]
    Config(String),
}
