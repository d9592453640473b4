//! JSON output format.

use chrono::{DateTime, FixedOffset, Offset, Utc};
use dsefeed_types::Record;
use serde::Serialize;
use std::io::Write;

use crate::{FormatError, Formatter};

/// UTC offset of Bangladesh Standard Time in seconds.
const DHAKA_OFFSET_SECS: i32 = 6 * 3600;

/// JSON output style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonStyle {
    /// JSON array (standard JSON).
    #[default]
    Array,
    /// Newline-delimited JSON (NDJSON/JSONL).
    Ndjson,
}

/// Response envelope wrapping a record array.
#[derive(Debug, Serialize)]
struct Envelope<'a> {
    success: bool,
    data: &'a [Record],
    timestamp: String,
}

/// Returns the current time in Dhaka as `YYYY-MM-DDTHH:MM:SS+06:00`.
#[must_use]
pub fn dhaka_timestamp() -> String {
    format_timestamp(Utc::now())
}

fn format_timestamp(at: DateTime<Utc>) -> String {
    let offset = FixedOffset::east_opt(DHAKA_OFFSET_SECS).unwrap_or_else(|| Utc.fix());
    at.with_timezone(&offset)
        .format("%Y-%m-%dT%H:%M:%S%:z")
        .to_string()
}

/// JSON formatter.
#[derive(Debug, Clone, Default)]
pub struct JsonFormatter {
    /// Output style.
    style: JsonStyle,
    /// Whether to pretty-print (only for array style).
    pretty: bool,
    /// Whether to wrap the array in a response envelope (array style only).
    envelope: bool,
}

impl JsonFormatter {
    /// Creates a new JSON formatter with default settings (array style).
    #[must_use]
    pub const fn new() -> Self {
        Self {
            style: JsonStyle::Array,
            pretty: false,
            envelope: false,
        }
    }

    /// Creates a new NDJSON formatter.
    #[must_use]
    pub const fn ndjson() -> Self {
        Self {
            style: JsonStyle::Ndjson,
            pretty: false,
            envelope: false,
        }
    }

    /// Sets whether to pretty-print output (array style only).
    #[must_use]
    pub const fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Sets whether to wrap output in `{"success", "data", "timestamp"}`.
    #[must_use]
    pub const fn with_envelope(mut self, envelope: bool) -> Self {
        self.envelope = envelope;
        self
    }

    /// Sets the output style.
    #[must_use]
    pub const fn with_style(mut self, style: JsonStyle) -> Self {
        self.style = style;
        self
    }

    fn write_value<W: Write, T: Serialize + ?Sized>(
        &self,
        value: &T,
        writer: &mut W,
    ) -> Result<(), FormatError> {
        if self.pretty {
            serde_json::to_writer_pretty(&mut *writer, value)?;
        } else {
            serde_json::to_writer(&mut *writer, value)?;
        }
        writeln!(writer)?;
        Ok(())
    }
}

impl Formatter for JsonFormatter {
    fn write_records<W: Write + Send>(
        &self,
        records: &[Record],
        mut writer: W,
    ) -> Result<(), FormatError> {
        match self.style {
            JsonStyle::Array if self.envelope => {
                let envelope = Envelope {
                    success: true,
                    data: records,
                    timestamp: dhaka_timestamp(),
                };
                self.write_value(&envelope, &mut writer)?;
            }
            JsonStyle::Array => self.write_value(records, &mut writer)?,
            JsonStyle::Ndjson => {
                for record in records {
                    serde_json::to_writer(&mut writer, record)?;
                    writeln!(writer)?;
                }
            }
        }
        Ok(())
    }

    fn extension(&self) -> &str {
        match self.style {
            JsonStyle::Array => "json",
            JsonStyle::Ndjson => "ndjson",
        }
    }
}
