// ── Runtime configuration ──
//
// Describes where the routing service lives and how patient to be with
// it and with AWS. Never touches disk: the CLI resolves file, env and
// flags into a `ShieldConfig` and hands it in.

use std::path::PathBuf;
use std::time::Duration;

/// Everything [`Shield::connect`](crate::Shield::connect) needs to build
/// the production clients.
#[derive(Debug, Clone, PartialEq)]
pub struct ShieldConfig {
    /// AWS region hosting the WAF Classic Regional resources.
    pub aws_region: String,
    /// Routing-data API base URL, validated when the client is built.
    pub routing_base_url: String,
    /// Sleep before each retry of a failed routing request.
    pub backoff: Vec<Duration>,
    /// Per-request timeout for routing lookups.
    pub routing_timeout: Duration,
    /// Extra CA certificate (PEM) trusted for routing requests.
    pub routing_ca_cert: Option<PathBuf>,
    /// Per-operation timeout for WAF calls (SDK retries included).
    pub firewall_timeout: Duration,
}

impl Default for ShieldConfig {
    fn default() -> Self {
        Self {
            aws_region: "us-east-1".into(),
            routing_base_url: shield_api::DEFAULT_BASE_URL.into(),
            backoff: shield_api::DEFAULT_BACKOFF_SCHEDULE.to_vec(),
            routing_timeout: Duration::from_secs(300),
            routing_ca_cert: None,
            firewall_timeout: Duration::from_secs(30),
        }
    }
}
