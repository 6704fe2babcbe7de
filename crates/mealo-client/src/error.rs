use thiserror::Error;

/// Errors returned by the Mealo platform client.
#[derive(Debug, Error)]
pub enum PlatformError {
    /// Network or TLS failure from the underlying HTTP client. Not classified
    /// further; propagated as-is.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The platform answered with a non-2xx status. The body is carried
    /// verbatim (best-effort text); platform-specific business errors inside a
    /// 2xx body are NOT mapped here — those stay in `data` for the caller.
    #[error("platform returned HTTP {status} {status_text}: {body}")]
    Status {
        status: u16,
        status_text: String,
        body: String,
    },

    /// A `Set-Cookie` line in the platform's response could not be split into
    /// name/value. A data-integrity fault on the platform side; propagated,
    /// never silently dropped.
    #[error(transparent)]
    Cookie(#[from] mealo_core::CookieError),

    /// A 2xx response body (or an embedded payload) did not match the
    /// expected shape.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid base URL \"{base_url}\": {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },

    /// Location autocomplete returned an empty candidate list.
    #[error("no location candidates for query {query:?}")]
    NoCandidates { query: String },
}
