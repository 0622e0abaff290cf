// ── Firewall domain types ──

use serde::{Deserialize, Serialize};

/// A WAF Classic IP set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IpSet {
    pub id: String,
    pub name: String,
    /// CIDR descriptors currently held by the set.
    pub member_count: usize,
}

/// A WAF Classic rule matching against IP sets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    pub id: String,
    pub name: String,
    pub metric_name: String,
    pub predicate_count: usize,
}

/// What `create_block_list` did to an IP set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockListSummary {
    pub ip_set: IpSet,
    /// Prefixes sent to the firewall.
    pub accepted: usize,
    /// Prefixes dropped for an unsupported CIDR length.
    pub discarded: usize,
    /// `UpdateIPSet` calls issued.
    pub batches: usize,
}
