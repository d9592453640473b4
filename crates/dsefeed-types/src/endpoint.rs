//! Exchange page definitions.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// Row selector shared by the snapshot pages.
const BORDERED_ROWS: &str = "table.table-bordered tr";

/// Row selector for the archive page, which wraps data rows in `<tbody>`.
const BORDERED_BODY_ROWS: &str = "table.table-bordered tbody tr";

/// How an operation reports a failed fetch or parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Return the error to the caller.
    Propagate,
    /// Log the error and return an empty record list.
    Degrade,
}

impl FailurePolicy {
    /// Returns the policy as a string slice.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Propagate => "propagate",
            Self::Degrade => "degrade",
        }
    }
}

impl std::fmt::Display for FailurePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A data page on the exchange website.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Endpoint {
    /// Latest share prices for every listed instrument.
    Latest,
    /// Constituents of the broad DSEX index.
    Index,
    /// Constituents of the DS30 blue-chip index.
    TopMovers,
    /// Day-end price archive over a date range.
    Historical,
}

/// Request-time constants describing how an [`Endpoint`] is fetched and read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EndpointDescriptor {
    /// Path under the site origin.
    pub path: &'static str,
    /// CSS selector matching candidate table rows.
    pub row_selector: &'static str,
    /// Whether the first matched row is a label row to discard.
    pub skip_first_row: bool,
    /// Failure handling used unless the caller overrides it.
    pub failure_policy: FailurePolicy,
}

impl Endpoint {
    /// Returns all endpoints.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Latest, Self::Index, Self::TopMovers, Self::Historical]
    }

    /// Returns the endpoint as a string identifier.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Latest => "latest",
            Self::Index => "index",
            Self::TopMovers => "top30",
            Self::Historical => "historical",
        }
    }

    /// Returns the page path under the site origin.
    #[must_use]
    pub const fn path(&self) -> &'static str {
        match self {
            Self::Latest => "/latest_share_price_scroll_l.php",
            Self::Index => "/dseX_share.php",
            Self::TopMovers => "/dse30_share.php",
            Self::Historical => "/day_end_archive.php",
        }
    }

    /// Returns the CSS selector for candidate data rows.
    #[must_use]
    pub const fn row_selector(&self) -> &'static str {
        match self {
            Self::Latest | Self::Index | Self::TopMovers => BORDERED_ROWS,
            Self::Historical => BORDERED_BODY_ROWS,
        }
    }

    /// Returns true if the first matched row must be discarded.
    ///
    /// The snapshot pages' row selector also matches the header row.
    #[must_use]
    pub const fn skip_first_row(&self) -> bool {
        !matches!(self, Self::Historical)
    }

    /// Returns the failure handling this endpoint uses by default.
    ///
    /// Index pages are treated as optional and degrade to an empty list;
    /// latest prices and the archive surface their errors.
    #[must_use]
    pub const fn default_failure_policy(&self) -> FailurePolicy {
        match self {
            Self::Latest | Self::Historical => FailurePolicy::Propagate,
            Self::Index | Self::TopMovers => FailurePolicy::Degrade,
        }
    }

    /// Returns whether this endpoint takes query parameters.
    #[must_use]
    pub const fn has_query(&self) -> bool {
        matches!(self, Self::Historical)
    }

    /// Returns the full descriptor for this endpoint.
    #[must_use]
    pub const fn descriptor(&self) -> EndpointDescriptor {
        EndpointDescriptor {
            path: self.path(),
            row_selector: self.row_selector(),
            skip_first_row: self.skip_first_row(),
            failure_policy: self.default_failure_policy(),
        }
    }
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error returned when parsing an unknown endpoint name.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown endpoint: {0}. Valid options: latest, index, top30, historical")]
pub struct EndpointParseError(String);

impl FromStr for Endpoint {
    type Err = EndpointParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "latest" => Ok(Self::Latest),
            "index" | "dsex" => Ok(Self::Index),
            "top30" | "dse30" | "top_movers" => Ok(Self::TopMovers),
            "historical" | "archive" => Ok(Self::Historical),
            _ => Err(EndpointParseError(s.to_string())),
        }
    }
}
