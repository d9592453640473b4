//! Output destinations and formatting for the dsefeed CLI.

use anyhow::{Context, Result};
use clap::ValueEnum;
use dsefeed_lib::prelude::*;
use dsefeed_lib::dhaka_timestamp;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use tracing::info;

/// Output format for scraped tables.
#[derive(Clone, Copy, ValueEnum)]
pub(crate) enum Format {
    Table,
    Csv,
    Json,
    Ndjson,
}

impl Format {
    const fn output_format(self) -> OutputFormat {
        match self {
            Self::Table => OutputFormat::Table,
            Self::Csv => OutputFormat::Csv,
            Self::Json => OutputFormat::Json,
            Self::Ndjson => OutputFormat::Ndjson,
        }
    }
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.output_format())
    }
}

/// Where and how command results are written.
pub(crate) struct Output {
    format: Format,
    path: Option<PathBuf>,
    envelope: bool,
}

impl Output {
    pub(crate) const fn new(format: Format, path: Option<PathBuf>, envelope: bool) -> Self {
        Self {
            format,
            path,
            envelope,
        }
    }

    fn writer(&self) -> Result<Box<dyn Write + Send>> {
        Ok(match &self.path {
            Some(path) => {
                let file = File::create(path)
                    .with_context(|| format!("Cannot create {}", path.display()))?;
                Box::new(BufWriter::new(file))
            }
            None => Box::new(BufWriter::new(std::io::stdout())),
        })
    }

    fn finish(&self, mut writer: Box<dyn Write + Send>) -> Result<()> {
        writer.flush()?;
        if let Some(path) = &self.path {
            info!(path = %path.display(), format = %self.format, "output written");
        }
        Ok(())
    }

    /// Writes one table.
    pub(crate) fn write(&self, records: &[Record]) -> Result<()> {
        let mut writer = self.writer()?;

        match self.format {
            Format::Table => TableFormatter::new().write_records(records, &mut writer)?,
            Format::Csv => CsvFormatter::new().write_records(records, &mut writer)?,
            Format::Json => JsonFormatter::new()
                .with_envelope(self.envelope)
                .write_records(records, &mut writer)?,
            Format::Ndjson => JsonFormatter::ndjson().write_records(records, &mut writer)?,
        }

        self.finish(writer)
    }

    /// Writes several named tables to one destination.
    ///
    /// JSON output is a single object keyed by endpoint name; NDJSON tags each
    /// line with its endpoint; text formats print each table under a heading.
    pub(crate) fn write_sections(&self, sections: &[(Endpoint, Vec<Record>)]) -> Result<()> {
        let mut writer = self.writer()?;

        match self.format {
            Format::Table => {
                for (endpoint, records) in sections {
                    writeln!(writer, "== {endpoint} ({} records) ==", records.len())?;
                    TableFormatter::new()
                        .with_total(false)
                        .write_records(records, &mut writer)?;
                    writeln!(writer)?;
                }
            }
            Format::Csv => {
                for (endpoint, records) in sections {
                    writeln!(writer, "# {endpoint}")?;
                    CsvFormatter::new().write_records(records, &mut writer)?;
                }
            }
            Format::Json => {
                let data: serde_json::Map<String, serde_json::Value> = sections
                    .iter()
                    .map(|(endpoint, records)| {
                        serde_json::to_value(records).map(|value| (endpoint.to_string(), value))
                    })
                    .collect::<serde_json::Result<_>>()?;

                let value = if self.envelope {
                    serde_json::json!({
                        "success": true,
                        "data": data,
                        "timestamp": dhaka_timestamp(),
                    })
                } else {
                    serde_json::Value::Object(data)
                };
                serde_json::to_writer(&mut writer, &value)?;
                writeln!(writer)?;
            }
            Format::Ndjson => {
                for (endpoint, records) in sections {
                    for record in records {
                        let line = serde_json::json!({
                            "endpoint": endpoint.as_str(),
                            "record": record,
                        });
                        serde_json::to_writer(&mut writer, &line)?;
                        writeln!(writer)?;
                    }
                }
            }
        }

        self.finish(writer)
    }
}
