// ── Core error types ──
//
// User-facing errors from shield-core. Consumers never match on HTTP
// statuses or SDK error shapes; the `From<shield_api::Error>` impl folds
// transport-layer failures into the categories below.

use thiserror::Error;

use crate::model::Asn;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Input errors ─────────────────────────────────────────────────
    /// Rejected before any network call.
    #[error("{message}")]
    Validation { message: String },

    // ── Not found ────────────────────────────────────────────────────
    #[error("Could not find a WAF Classic IP Set for ASN {asn}")]
    IpSetNotFound { asn: Asn },

    #[error("No routed prefixes found for {record}")]
    NoPrefixes { record: String },

    // ── Upstream errors (wrapped, not exposed raw) ───────────────────
    /// Routing service unreachable or returning garbage, after retries.
    #[error("Routing lookup failed: {message}")]
    Routing {
        message: String,
        /// HTTP status code (if the service answered at all).
        status: Option<u16>,
    },

    /// The routing service answered with a non-"ok" envelope.
    #[error("Routing API error: {message}")]
    RoutingApi { message: String },

    #[error("Firewall operation {operation} failed: {message}")]
    Firewall {
        operation: &'static str,
        message: String,
    },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<shield_api::Error> for CoreError {
    fn from(err: shield_api::Error) -> Self {
        match err {
            shield_api::Error::Transport(ref e) => CoreError::Routing {
                message: e.to_string(),
                status: e.status().map(|s| s.as_u16()),
            },
            shield_api::Error::HttpStatus { status, .. } => CoreError::Routing {
                message: err.to_string(),
                status: Some(status),
            },
            shield_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            shield_api::Error::ClientBuild(msg) => CoreError::Config {
                message: format!("Cannot build HTTP client: {msg}"),
            },
            shield_api::Error::RoutingApi { message } => CoreError::RoutingApi { message },
            shield_api::Error::Firewall { operation, message } => {
                CoreError::Firewall { operation, message }
            }
            shield_api::Error::MissingField { operation, field } => CoreError::Firewall {
                operation,
                message: format!("response is missing {field}"),
            },
            shield_api::Error::Deserialization { message, body: _ } => CoreError::Routing {
                message: format!("unexpected response body: {message}"),
                status: None,
            },
        }
    }
}

impl CoreError {
    /// Returns `true` for the "nothing there" family of errors.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::IpSetNotFound { .. } | Self::NoPrefixes { .. })
    }
}
