// shield-api: async clients for the bgpview.io routing API and AWS WAF Classic Regional

pub mod error;
pub mod routing;
pub mod transport;
pub mod waf;

pub use error::Error;
pub use routing::{DEFAULT_BACKOFF_SCHEDULE, DEFAULT_BASE_URL, RoutingClient};
pub use transport::TransportConfig;
pub use waf::{IpSetResponse, MAX_BATCH_SIZE, RuleResponse, WafClient};

// Raw response types, re-exported for downstream crates.
pub use routing::models as routing_types;
