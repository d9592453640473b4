//! Synthetic exchange pages for dsefeed benchmarks.

use std::fmt::Write;

/// Column headers of the latest share price table.
pub const LATEST_HEADERS: [&str; 11] = [
    "#",
    "TRADING CODE",
    "LTP*",
    "HIGH",
    "LOW",
    "CLOSEP*",
    "YCP*",
    "CHANGE",
    "TRADE",
    "VALUE (mn)",
    "VOLUME",
];

/// Builds a latest-price page with `rows` data rows.
///
/// Numeric cells carry thousands separators so the parser's comma stripping
/// is exercised on every row.
#[must_use]
pub fn latest_page(rows: usize) -> String {
    let mut html = String::with_capacity(rows * 400 + 512);
    html.push_str("<html><body><table class=\"table table-bordered shares-table\"><tr>");
    for header in LATEST_HEADERS {
        write!(html, "<th>{header}</th>").expect("write to String");
    }
    html.push_str("</tr>");

    for i in 0..rows {
        write!(
            html,
            "<tr><td>{}</td><td><a href=\"displayCompany.php?name=CO{i}\">CO{i}</a></td>\
             <td>{}.5</td><td>{}.9</td><td>{}.1</td><td>{}.5</td><td>{}.0</td>\
             <td>-0.5</td><td>1,{:03}</td><td>51.712</td><td>1,234,{:03}</td></tr>",
            i + 1,
            100 + i,
            101 + i,
            99 + i,
            100 + i,
            101 + i,
            i % 1000,
            i % 1000,
        )
        .expect("write to String");
    }

    html.push_str("</table></body></html>");
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use dsefeed_lib::{Endpoint, TableSpec, parse_table_html};

    #[test]
    fn test_latest_page_shape() {
        let html = latest_page(3);
        assert_eq!(html.matches("<th>").count(), LATEST_HEADERS.len());
        assert_eq!(html.matches("<tr>").count(), 4);
        assert!(html.ends_with("</table></body></html>"));
    }

    #[test]
    fn test_latest_page_parses() {
        let html = latest_page(5);
        let records = parse_table_html(&html, &TableSpec::for_endpoint(Endpoint::Latest)).unwrap();
        assert_eq!(records.len(), 5);
        assert_eq!(records[4].trading_code(), Some("CO4"));
        assert_eq!(records[0].get("VOLUME"), Some("1234000"));
    }
}
