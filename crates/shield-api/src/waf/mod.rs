// AWS WAF Classic Regional: IP sets, rules and the limits the service imposes.

pub mod client;

pub use client::WafClient;

use serde::{Deserialize, Serialize};

/// Most descriptors a single `UpdateIPSet` call is allowed to carry.
pub const MAX_BATCH_SIZE: usize = 900;

/// An IP set as reported by WAF.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IpSetResponse {
    pub id: String,
    pub name: String,
    pub ips_count: usize,
}

/// A rule as reported by WAF.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleResponse {
    pub id: String,
    pub name: String,
    pub metric_name: String,
    pub predicates_count: usize,
}

/// WAF Classic accepts /8 and /16 through /32 IPv4 blocks only.
pub fn is_supported_cidr(cidr: u8) -> bool {
    cidr == 8 || (16..=32).contains(&cidr)
}

/// CloudWatch metric name for a rule: alphanumerics only, lowercased.
pub fn metric_name(name: &str) -> String {
    name.chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}
