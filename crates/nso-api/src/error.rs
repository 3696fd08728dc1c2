use thiserror::Error;

/// Top-level error type for the `nso-api` crate.
///
/// Non-2xx responses to mutating calls are *not* errors: they come back as
/// a [`RestconfResponse`](crate::RestconfResponse) for the caller to inspect.
/// Only calls that must decode a body (the list endpoints, operation output)
/// turn a bad status or an unexpected body into an `Error`.
#[derive(Debug, Error)]
pub enum Error {
    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, timeout, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ── RESTCONF ────────────────────────────────────────────────────
    /// A data-retrieving call got a non-success status it can't decode.
    #[error("RESTCONF request failed (HTTP {status})")]
    Status { status: u16, body: String },

    /// The body was valid JSON but lacked the keys the endpoint promises.
    #[error("Unexpected schema from {endpoint}: {message}")]
    UnexpectedSchema {
        endpoint: &'static str,
        message: String,
        body: String,
    },

    // ── Data ────────────────────────────────────────────────────────
    /// Body was not JSON at all, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },

    /// Request payload could not be encoded.
    #[error("Serialization error: {0}")]
    Serialization(#[source] serde_json::Error),
}

impl Error {
    /// Returns `true` if the orchestrator could not be reached at all.
    pub fn is_connect(&self) -> bool {
        matches!(self, Self::Transport(e) if e.is_connect())
    }

    /// Returns `true` if the request timed out.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Transport(e) if e.is_timeout())
    }

    /// The HTTP status attached to this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Returns `true` if the orchestrator rejected our credentials.
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }
}
