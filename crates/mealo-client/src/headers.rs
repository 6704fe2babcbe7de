//! Browser-impersonation headers sent with every platform call.
//!
//! Pure configuration: the platform rejects traffic that does not look like
//! its own web frontend, so every request carries this fixed table. Nothing
//! here influences control flow.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ORIGIN, REFERER};

const STATIC_HEADERS: &[(&str, &str)] = &[
    ("accept", "application/json, text/plain, */*"),
    ("accept-language", "en-US,en;q=0.9"),
    ("cache-control", "no-cache"),
    (
        "sec-ch-ua",
        "\"Chromium\";v=\"124\", \"Google Chrome\";v=\"124\", \"Not-A.Brand\";v=\"99\"",
    ),
    ("sec-ch-ua-mobile", "?0"),
    ("sec-ch-ua-platform", "\"Linux\""),
    ("sec-fetch-dest", "empty"),
    ("sec-fetch-mode", "cors"),
    ("sec-fetch-site", "same-origin"),
    ("x-requested-with", "XMLHttpRequest"),
];

/// Builds the per-request header table. `origin` is the configured platform
/// origin (scheme + host, no trailing slash); it feeds the `Origin` and
/// `Referer` headers so calls appear same-origin.
pub(crate) fn browser_headers(origin: &str) -> HeaderMap {
    let mut headers = HeaderMap::with_capacity(STATIC_HEADERS.len() + 2);
    for (name, value) in STATIC_HEADERS {
        headers.insert(
            HeaderName::from_static(name),
            HeaderValue::from_static(value),
        );
    }
    if let Ok(value) = HeaderValue::from_str(origin) {
        headers.insert(ORIGIN, value);
    }
    if let Ok(value) = HeaderValue::from_str(&format!("{origin}/")) {
        headers.insert(REFERER, value);
    }
    headers
}
