//! Day-end archive query parameters.

use serde::{Deserialize, Serialize};

/// Instrument value the archive uses to mean "every instrument".
pub const DEFAULT_INSTRUMENT: &str = "All Instrument";

/// Parameters for the day-end price archive.
///
/// Dates are passed to the exchange as given; the site expects `YYYY-MM-DD`
/// but nothing here validates that.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoricalQuery {
    /// First day of the range.
    pub start: String,
    /// Last day of the range.
    pub end: String,
    /// Trading code to restrict to, or [`DEFAULT_INSTRUMENT`].
    pub instrument: String,
}

impl HistoricalQuery {
    /// Creates a query covering every instrument.
    #[must_use]
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
            instrument: DEFAULT_INSTRUMENT.to_string(),
        }
    }

    /// Restricts the query to one trading code.
    #[must_use]
    pub fn with_instrument(mut self, instrument: impl Into<String>) -> Self {
        self.instrument = instrument.into();
        self
    }

    /// Returns the query-string pairs in the order the archive form sends them.
    #[must_use]
    pub fn params(&self) -> [(&'static str, &str); 4] {
        [
            ("startDate", self.start.as_str()),
            ("endDate", self.end.as_str()),
            ("inst", self.instrument.as_str()),
            ("archive", "data"),
        ]
    }
}

impl std::fmt::Display for HistoricalQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} to {}", self.instrument, self.start, self.end)
    }
}
