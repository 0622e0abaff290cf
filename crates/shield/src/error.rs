//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` into user-facing errors with
//! actionable help text. Every error exits the process with status 1.

use miette::Diagnostic;
use thiserror::Error;

use shield_config::ConfigError;
use shield_core::CoreError;

/// Process exit status for any failure.
pub const EXIT_FAILURE: i32 = 1;

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Input ────────────────────────────────────────────────────────
    #[error("{message}")]
    #[diagnostic(
        code(shield::invalid_input),
        help(
            "Pass an ASN such as 20473 or AS20473.\n\
             To find the ASN announcing an IP, run: koala-shield lookup <ip>"
        )
    )]
    InvalidInput { message: String },

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(shield::validation))]
    Validation { field: String, reason: String },

    // ── Not found ────────────────────────────────────────────────────
    #[error("Could not find a WAF Classic IP Set for ASN {asn}")]
    #[diagnostic(
        code(shield::ip_set_not_found),
        help("Create it with: koala-shield block {asn}\nList existing sets with: koala-shield ipsets")
    )]
    IpSetNotFound { asn: String },

    #[error("No routed prefixes found for {record}")]
    #[diagnostic(
        code(shield::no_prefixes),
        help("The address is not covered by any announced prefix (private or unrouted space?)")
    )]
    NoPrefixes { record: String },

    // ── Upstream ─────────────────────────────────────────────────────
    #[error("Routing lookup failed: {message}")]
    #[diagnostic(
        code(shield::routing),
        help(
            "bgpview.io may be rate limiting or unavailable; retry later.\n\
             Retries are configured with routing.backoff in the config file."
        )
    )]
    Routing { message: String },

    #[error("API error, message: {message}")]
    #[diagnostic(code(shield::routing_api))]
    RoutingApi { message: String },

    #[error("AWS WAF {operation} failed: {message}")]
    #[diagnostic(
        code(shield::firewall),
        help(
            "Check your AWS credentials (AWS_PROFILE / AWS_ACCESS_KEY_ID) and that\n\
             WAF Classic Regional is available in the selected --aws-region."
        )
    )]
    Firewall {
        operation: &'static str,
        message: String,
    },

    // ── Interactive ──────────────────────────────────────────────────
    #[error("Canceling block. IP Set exists but is not enabled.")]
    #[diagnostic(
        code(shield::cancelled),
        help("Enable it later with: koala-shield block -y {asn}")
    )]
    BlockCancelled { asn: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Configuration error: {message}")]
    #[diagnostic(code(shield::config), help("Config file: {path}"))]
    Config { message: String, path: String },

    // ── Internal / IO ────────────────────────────────────────────────
    #[error("Internal error: {0}")]
    #[diagnostic(code(shield::internal))]
    Internal(String),

    #[error("Failed to render output: {0}")]
    #[diagnostic(code(shield::render))]
    Render(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation { message } => CliError::InvalidInput { message },
            CoreError::IpSetNotFound { asn } => CliError::IpSetNotFound {
                asn: asn.to_string(),
            },
            CoreError::NoPrefixes { record } => CliError::NoPrefixes { record },
            CoreError::Routing { message, status: _ } => CliError::Routing { message },
            CoreError::RoutingApi { message } => CliError::RoutingApi { message },
            CoreError::Firewall { operation, message } => {
                CliError::Firewall { operation, message }
            }
            CoreError::Config { message } => CliError::Config {
                message,
                path: shield_config::config_path().display().to_string(),
            },
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => CliError::Validation { field, reason },
            other => CliError::Config {
                message: other.to_string(),
                path: shield_config::config_path().display().to_string(),
            },
        }
    }
}
