//! URL helpers for linking into the main map.

use url::form_urlencoded;

/// Query parameter carrying the country to open the main map on.
pub const COUNTRY_PARAM: &str = "country";

/// Percent-decoded value of the first `country` parameter.
///
/// Accepts the query with or without its leading `?`. Empty values count as
/// absent.
pub fn country_param(query: &str) -> Option<String> {
    let query = query.strip_prefix('?').unwrap_or(query);
    form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == COUNTRY_PARAM)
        .map(|(_, value)| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Main map link that opens on `code`.
pub fn country_link(code: &str) -> String {
    let encoded: String = form_urlencoded::byte_serialize(code.as_bytes()).collect();
    format!("/?{COUNTRY_PARAM}={encoded}")
}
