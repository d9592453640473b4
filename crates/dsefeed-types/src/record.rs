//! Scraped table records.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Column header carrying the instrument symbol on index pages.
pub const TRADING_CODE: &str = "TRADING CODE";

/// One table row keyed by column header.
///
/// Keys keep the order of the table's header row. Headers are stored exactly
/// as scraped and values have thousands separators removed. Inserting a
/// header that already exists keeps its original position and replaces the
/// value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(IndexMap<String, String>);

impl Record {
    /// Creates an empty record.
    #[must_use]
    pub fn new() -> Self {
        Self(IndexMap::new())
    }

    /// Creates an empty record with room for `capacity` columns.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self(IndexMap::with_capacity(capacity))
    }

    /// Sets the value for a column.
    pub fn insert(&mut self, header: impl Into<String>, value: impl Into<String>) {
        self.0.insert(header.into(), value.into());
    }

    /// Returns the value for a column, if present.
    #[must_use]
    pub fn get(&self, header: &str) -> Option<&str> {
        self.0.get(header).map(String::as_str)
    }

    /// Returns the trading code of this row, if the table has that column.
    #[must_use]
    pub fn trading_code(&self) -> Option<&str> {
        self.get(TRADING_CODE)
    }

    /// Returns true if `code` matches this row's trading code, ignoring case.
    ///
    /// A missing or blank trading code never matches.
    #[must_use]
    pub fn matches_trading_code(&self, code: &str) -> bool {
        self.trading_code()
            .filter(|value| !value.is_empty())
            .is_some_and(|value| value.to_uppercase() == code.to_uppercase())
    }

    /// Iterates over column headers in table order.
    pub fn headers(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Iterates over `(header, value)` pairs in table order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Returns the number of columns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the record has no columns.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Consumes the record, returning the underlying ordered map.
    #[must_use]
    pub fn into_inner(self) -> IndexMap<String, String> {
        self.0
    }
}

impl From<IndexMap<String, String>> for Record {
    fn from(map: IndexMap<String, String>) -> Self {
        Self(map)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}
