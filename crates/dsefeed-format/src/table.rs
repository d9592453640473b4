//! Aligned plain-text table output.

use dsefeed_types::Record;
use std::io::Write;

use crate::formatter::columns;
use crate::{FormatError, Formatter};

/// Plain-text formatter that pads every column to its widest value.
#[derive(Debug, Clone)]
pub struct TableFormatter {
    /// Whether to print a trailing record count.
    show_total: bool,
}

impl Default for TableFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl TableFormatter {
    /// Creates a table formatter that prints a total line.
    #[must_use]
    pub const fn new() -> Self {
        Self { show_total: true }
    }

    /// Sets whether to print the trailing total line.
    #[must_use]
    pub const fn with_total(mut self, show_total: bool) -> Self {
        self.show_total = show_total;
        self
    }
}

fn width(s: &str) -> usize {
    s.chars().count()
}

impl Formatter for TableFormatter {
    fn write_records<W: Write + Send>(
        &self,
        records: &[Record],
        mut writer: W,
    ) -> Result<(), FormatError> {
        if records.is_empty() {
            writeln!(writer, "No records found.")?;
            return Ok(());
        }

        let columns = columns(records);
        let widths: Vec<usize> = columns
            .iter()
            .map(|column| {
                records
                    .iter()
                    .map(|r| r.get(column).map_or(0, width))
                    .fold(width(column), usize::max)
            })
            .collect();

        let line = |cells: Vec<&str>| -> String {
            cells
                .iter()
                .zip(&widths)
                .map(|(cell, &w)| format!("{cell:<w$}"))
                .collect::<Vec<_>>()
                .join("  ")
                .trim_end()
                .to_string()
        };

        writeln!(writer, "{}", line(columns.clone()))?;
        let total_width = widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1);
        writeln!(writer, "{}", "-".repeat(total_width))?;

        for record in records {
            let cells = columns
                .iter()
                .map(|c| record.get(c).unwrap_or_default())
                .collect();
            writeln!(writer, "{}", line(cells))?;
        }

        if self.show_total {
            writeln!(writer, "\nTotal: {} records", records.len())?;
        }

        Ok(())
    }

    fn extension(&self) -> &str {
        "txt"
    }
}
