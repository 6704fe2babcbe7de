//! Cookie jar primitives for the platform's cookie-carried session state.
//!
//! The platform has no session-token endpoint; the `Set-Cookie` headers on
//! each response ARE the session. These helpers convert between the three
//! representations a workflow threads around: raw `Set-Cookie` lines, the
//! name→value jar, and the single `Cookie` request header.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CookieError {
    /// A `Set-Cookie` line carried no `name=value` pair before the first `;`.
    #[error("malformed Set-Cookie line: {line:?}")]
    MalformedSetCookie { line: String },
}

/// Accumulated session cookies, keyed by cookie name.
///
/// Keys are unique; a later write for the same key replaces the earlier value.
/// Backed by a `BTreeMap` so header rendering is deterministic. Serializes
/// transparently as a JSON object so jars can ride inside request and response
/// bodies between this service and its callers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CookieJar(BTreeMap<String, String>);

impl CookieJar {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses raw `Set-Cookie` header lines into a jar.
    ///
    /// Only the `name=value` pair before the first `;` is kept; attributes
    /// (`Path`, `Domain`, `Expires`, ...) are dropped. Later lines overwrite
    /// earlier ones for the same name. Zero lines is a valid, empty jar.
    ///
    /// # Errors
    ///
    /// Returns [`CookieError::MalformedSetCookie`] if a line has no `=` in its
    /// leading pair.
    pub fn from_set_cookie_lines<S: AsRef<str>>(lines: &[S]) -> Result<Self, CookieError> {
        let mut jar = Self::new();
        for line in lines {
            let line = line.as_ref();
            let pair = line.split(';').next().unwrap_or(line);
            let (name, value) =
                pair.split_once('=')
                    .ok_or_else(|| CookieError::MalformedSetCookie {
                        line: line.to_owned(),
                    })?;
            jar.insert(name.trim(), value);
        }
        Ok(jar)
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), value.into());
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// Folds `other` into this jar, last write wins per key.
    ///
    /// Every jar-returning workflow step's response must be merged this way —
    /// replacing the jar wholesale drops unrelated cookies (CSRF, anti-bot)
    /// and breaks later steps.
    pub fn merge(&mut self, other: CookieJar) {
        self.0.extend(other.0);
    }

    /// Renders the jar as a `Cookie` request-header value: `name=value; `
    /// pairs concatenated in iteration order, trailing separator included.
    /// The platform's cookie parser tolerates the trailing `; `.
    #[must_use]
    pub fn header_string(&self) -> String {
        let mut out = String::new();
        for (name, value) in &self.0 {
            out.push_str(name);
            out.push('=');
            out.push_str(value);
            out.push_str("; ");
        }
        out
    }

    /// Inverse of [`CookieJar::from_set_cookie_lines`]: one bare `name=value`
    /// line per entry.
    #[must_use]
    pub fn to_set_cookie_lines(&self) -> Vec<String> {
        self.0
            .iter()
            .map(|(name, value)| format!("{name}={value}"))
            .collect()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Rewrites the authority domain inside each `Set-Cookie` line, so cookies
/// minted for the platform's domain become valid for this service's own
/// domain when handed back to an external caller.
#[must_use]
pub fn rewrite_domain(lines: &[String], from: &str, to: &str) -> Vec<String> {
    lines.iter().map(|line| line.replace(from, to)).collect()
}
