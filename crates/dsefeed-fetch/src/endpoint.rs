//! Exchange URL construction.

use dsefeed_types::{Endpoint, HistoricalQuery};
use url::Url;

/// Builds the URL for an endpoint under `base`.
///
/// Query parameters are only appended for endpoints that take them; a query
/// passed for any other endpoint is ignored.
///
/// # Example
///
/// ```
/// use dsefeed_fetch::endpoint_url;
/// use dsefeed_types::{Endpoint, HistoricalQuery};
/// use url::Url;
///
/// let base = Url::parse("https://dsebd.org").unwrap();
/// let query = HistoricalQuery::new("2024-01-01", "2024-01-31");
/// let url = endpoint_url(&base, Endpoint::Historical, Some(&query)).unwrap();
/// assert_eq!(
///     url.as_str(),
///     "https://dsebd.org/day_end_archive.php?startDate=2024-01-01&endDate=2024-01-31&inst=All+Instrument&archive=data"
/// );
/// ```
///
/// # Errors
///
/// Returns an error if the endpoint path cannot be joined onto `base`.
pub fn endpoint_url(
    base: &Url,
    endpoint: Endpoint,
    query: Option<&HistoricalQuery>,
) -> Result<Url, url::ParseError> {
    let mut url = base.join(endpoint.path())?;

    if let Some(query) = query.filter(|_| endpoint.has_query()) {
        url.query_pairs_mut().extend_pairs(query.params());
    }

    Ok(url)
}
