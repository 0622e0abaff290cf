use thiserror::Error;

/// Top-level error type for the `shield-api` crate.
///
/// Covers every failure mode of both API surfaces: HTTP transport to the
/// routing service, its status envelope, and the AWS WAF control plane.
/// `shield-core` maps these into domain errors.
#[derive(Debug, Error)]
pub enum Error {
    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, timeout, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Non-success HTTP status from the routing service.
    #[error("unknown error, status code: {status}")]
    HttpStatus { status: u16, body: String },

    /// Building the HTTP client failed (TLS backend, proxy settings).
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(String),

    // ── Routing API ─────────────────────────────────────────────────
    /// The `{status, status_message, data}` envelope reported a failure,
    /// even though the HTTP exchange itself succeeded.
    #[error("API error, message: {message}")]
    RoutingApi { message: String },

    // ── Firewall ────────────────────────────────────────────────────
    /// An AWS WAF operation failed.
    #[error("WAF {operation} failed: {message}")]
    Firewall {
        operation: &'static str,
        message: String,
    },

    /// A WAF response was missing a field the protocol guarantees.
    #[error("WAF {operation} response is missing {field}")]
    MissingField {
        operation: &'static str,
        field: &'static str,
    },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Returns `true` if this error is worth another attempt under the
    /// routing client's backoff schedule.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::HttpStatus { .. })
    }
}
