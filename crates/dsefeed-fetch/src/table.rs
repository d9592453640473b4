//! Header-driven HTML table parsing.
//!
//! Exchange pages carry no fixed schema: column names come from the first
//! row of the `table.shares-table` element, and every data row is zipped
//! against those names by position.

use dsefeed_types::{Endpoint, Record};
use scraper::{ElementRef, Html, Selector};
use thiserror::Error;

/// Selector for the table whose first row supplies column headers.
pub const HEADER_TABLE_SELECTOR: &str = "table.shares-table";

/// Errors that can occur during table parsing.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A CSS selector could not be parsed.
    #[error("Invalid CSS selector: {selector}")]
    InvalidSelector {
        /// The rejected selector.
        selector: String,
    },
}

/// Which rows of a document hold data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableSpec<'a> {
    /// CSS selector matching candidate rows, in document order.
    pub row_selector: &'a str,
    /// Discard the first matched row before looking at cells.
    pub skip_first_row: bool,
}

impl<'a> TableSpec<'a> {
    /// Creates a table spec.
    #[must_use]
    pub const fn new(row_selector: &'a str, skip_first_row: bool) -> Self {
        Self {
            row_selector,
            skip_first_row,
        }
    }
}

impl TableSpec<'static> {
    /// Returns the table spec an endpoint's page is read with.
    #[must_use]
    pub const fn for_endpoint(endpoint: Endpoint) -> Self {
        Self::new(endpoint.row_selector(), endpoint.skip_first_row())
    }
}

fn selector(css: &str) -> Result<Selector, ParseError> {
    Selector::parse(css).map_err(|_| ParseError::InvalidSelector {
        selector: css.to_string(),
    })
}

/// Returns the text of an element: each text node trimmed, then joined.
fn cell_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Extracts column headers from the first row of the shares table.
///
/// Returns an empty list if the document has no shares table or its first
/// row has no `<th>` cells.
///
/// # Errors
///
/// Returns an error only if a built-in selector fails to parse.
pub fn header_row(document: &Html) -> Result<Vec<String>, ParseError> {
    let table = selector(HEADER_TABLE_SELECTOR)?;
    let row = selector("tr")?;
    let heading = selector("th")?;

    Ok(document
        .select(&table)
        .next()
        .and_then(|table| table.select(&row).next())
        .map(|row| row.select(&heading).map(cell_text).collect())
        .unwrap_or_default())
}

/// Parses table rows into records keyed by the shares-table headers.
///
/// Rows are matched with `spec.row_selector`. When `spec.skip_first_row` is
/// set the first match is dropped unconditionally. Rows without `<td>` cells
/// are skipped. Each remaining row becomes one [`Record`]: header `i` maps to
/// the trimmed text of cell `i` with commas removed, or to `""` if the row is
/// short. Rows that produce an empty record (no headers) are dropped.
///
/// # Errors
///
/// Returns an error if `spec.row_selector` is not valid CSS.
pub fn parse_table(document: &Html, spec: &TableSpec<'_>) -> Result<Vec<Record>, ParseError> {
    let headers = header_row(document)?;
    let rows = selector(spec.row_selector)?;
    let data_cell = selector("td")?;

    let records = document
        .select(&rows)
        .skip(usize::from(spec.skip_first_row))
        .filter_map(|row| {
            let cells: Vec<ElementRef<'_>> = row.select(&data_cell).collect();
            if cells.is_empty() {
                return None;
            }
            let record = zip_row(&headers, &cells);
            (!record.is_empty()).then_some(record)
        })
        .collect();

    Ok(records)
}

/// Parses raw HTML and extracts its table rows.
///
/// # Errors
///
/// Returns an error if `spec.row_selector` is not valid CSS.
pub fn parse_table_html(html: &str, spec: &TableSpec<'_>) -> Result<Vec<Record>, ParseError> {
    let document = Html::parse_document(html);
    parse_table(&document, spec)
}

fn zip_row(headers: &[String], cells: &[ElementRef<'_>]) -> Record {
    let mut record = Record::with_capacity(headers.len());
    for (i, header) in headers.iter().enumerate() {
        let value = cells
            .get(i)
            .map(|cell| cell_text(*cell).replace(',', ""))
            .unwrap_or_default();
        record.insert(header.as_str(), value);
    }
    record
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{HISTORICAL_PAGE, INDEX_PAGE, LATEST_PAGE};

    const SNAPSHOT: TableSpec<'static> = TableSpec::for_endpoint(Endpoint::Latest);

    #[test]
    fn test_header_row() {
        let document = Html::parse_document(LATEST_PAGE);
        let headers = header_row(&document).unwrap();
        assert_eq!(headers.len(), 11);
        assert_eq!(headers[1], "TRADING CODE");
        assert_eq!(headers[9], "VALUE (mn)");
    }

    #[test]
    fn test_parse_latest_page() {
        let records = parse_table_html(LATEST_PAGE, &SNAPSHOT).unwrap();
        assert_eq!(records.len(), 2);

        assert_eq!(records[0].trading_code(), Some("1JANATAMF"));
        assert_eq!(records[1].get("LTP*"), Some("286.5"));
        assert_eq!(records[1].get("CHANGE"), Some("-0.7"));

        let headers: Vec<_> = records[0].headers().collect();
        assert_eq!(headers[0], "#");
        assert_eq!(headers[10], "VOLUME");
    }

    #[test]
    fn test_commas_are_stripped() {
        let records = parse_table_html(LATEST_PAGE, &SNAPSHOT).unwrap();
        assert_eq!(records[1].get("VOLUME"), Some("1234567"));
        assert_eq!(records[1].get("TRADE"), Some("1204"));
    }

    #[test]
    fn test_short_row_fills_missing_with_empty() {
        let html = r#"
            <table class="table-bordered shares-table">
              <tr><th>A</th><th>B</th><th>C</th></tr>
              <tr><td>1</td></tr>
            </table>"#;
        let records = parse_table_html(html, &SNAPSHOT).unwrap();
        assert_eq!(records.len(), 1);

        let pairs: Vec<_> = records[0].iter().collect();
        assert_eq!(pairs, vec![("A", "1"), ("B", ""), ("C", "")]);
    }

    #[test]
    fn test_extra_cells_are_ignored() {
        let html = r#"
            <table class="table-bordered shares-table">
              <tr><th>A</th></tr>
              <tr><td>1</td><td>2</td></tr>
            </table>"#;
        let records = parse_table_html(html, &SNAPSHOT).unwrap();
        let headers: Vec<_> = records[0].headers().collect();
        assert_eq!(headers, vec!["A"]);
    }

    #[test]
    fn test_skip_first_row_drops_row_with_cells() {
        let html = r#"
            <table class="table-bordered shares-table">
              <tr><th>CODE</th></tr>
            </table>
            <table class="table-bordered">
              <tr><td>H</td></tr>
              <tr><td>A</td></tr>
              <tr><td>B</td></tr>
            </table>"#;

        let skipped =
            parse_table_html(html, &TableSpec::new("table.table-bordered tr", true)).unwrap();
        let codes: Vec<_> = skipped.iter().filter_map(|r| r.get("CODE")).collect();
        // First matched row is the header row of the shares table
        assert_eq!(codes, vec!["H", "A", "B"]);

        let only_data =
            parse_table_html(html, &TableSpec::new("table:not(.shares-table) tr", true)).unwrap();
        let codes: Vec<_> = only_data.iter().filter_map(|r| r.get("CODE")).collect();
        assert_eq!(codes, vec!["A", "B"]);
    }

    #[test]
    fn test_rows_without_td_are_discarded() {
        let html = r#"
            <table class="table-bordered shares-table">
              <tr><th>A</th></tr>
              <tr><td>1</td></tr>
              <tr><th>spacer</th></tr>
              <tr></tr>
              <tr><td>2</td></tr>
            </table>"#;

        for skip in [true, false] {
            let records =
                parse_table_html(html, &TableSpec::new("table.table-bordered tr", skip)).unwrap();
            let values: Vec<_> = records.iter().filter_map(|r| r.get("A")).collect();
            assert_eq!(values, vec!["1", "2"]);
        }
    }

    #[test]
    fn test_no_headers_yields_nothing() {
        let html = r#"
            <table class="table-bordered shares-table">
              <tr><td>not a header</td></tr>
              <tr><td>1</td></tr>
            </table>"#;
        let records = parse_table_html(html, &SNAPSHOT).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_missing_table_yields_empty() {
        let html = "<html><body><p>maintenance</p></body></html>";
        let records = parse_table_html(html, &SNAPSHOT).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_nested_markup_text_is_joined() {
        let html = r#"
            <table class="table-bordered shares-table">
              <tr><th> Name </th></tr>
              <tr><td>  <a href="x"> Grameen </a> <b>Phone</b> </td></tr>
            </table>"#;
        let records = parse_table_html(html, &SNAPSHOT).unwrap();
        assert_eq!(records[0].get("Name"), Some("GrameenPhone"));
    }

    #[test]
    fn test_historical_page_reads_tbody_without_skipping() {
        let spec = TableSpec::for_endpoint(Endpoint::Historical);
        let records = parse_table_html(HISTORICAL_PAGE, &spec).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].get("DATE"), Some("2024-01-02"));
        assert_eq!(records[1].get("VOLUME"), Some("2750000"));
    }

    #[test]
    fn test_every_record_shares_header_keys() {
        let document = Html::parse_document(INDEX_PAGE);
        let headers = header_row(&document).unwrap();
        let records = parse_table(&document, &SNAPSHOT).unwrap();

        assert_eq!(records.len(), 3);
        for record in &records {
            let keys: Vec<_> = record.headers().collect();
            assert_eq!(keys, headers.iter().map(String::as_str).collect::<Vec<_>>());
        }
    }

    #[test]
    fn test_invalid_selector() {
        let err = parse_table_html("<table></table>", &TableSpec::new("tr[", false)).unwrap_err();
        assert_eq!(
            err,
            ParseError::InvalidSelector {
                selector: "tr[".to_string()
            }
        );
    }
}
