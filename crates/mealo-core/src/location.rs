//! Location selection and the platform's cookie-embedded location encoding.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A free-text address resolved to a platform place id and provider, plus the
/// raw detail payload the platform returned for it.
///
/// Transient: consumed by the set-location step and not retained once the
/// response cookies have been merged into the session jar.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationSelection {
    pub place_id: String,
    pub provider: String,
    pub detail: Value,
}

/// Encodes a location payload into the token format the platform expects
/// embedded in a single cookie value.
///
/// This is the platform's own reduced escaping, not URL-encoding: the JSON is
/// compacted (tab, newline and space characters stripped, including inside
/// string values), literal `"` becomes `%22`, and backslashes are removed
/// entirely. A fixed external-protocol requirement — do not "improve" it.
#[must_use]
pub fn encode_location_value(location: &Value) -> String {
    let json = location.to_string();
    let mut out = String::with_capacity(json.len());
    for ch in json.chars() {
        match ch {
            '\t' | '\n' | ' ' | '\\' => {}
            '"' => out.push_str("%22"),
            _ => out.push(ch),
        }
    }
    out
}
