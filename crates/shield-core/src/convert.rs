// ── API-to-domain type conversions ──
//
// Bridges raw `shield_api` response types into `shield_core::model`.
// Missing descriptive fields become empty strings so that consumers can
// render them without juggling options.

use shield_api::routing_types::{AsnPrefixEntry, AsnResponse, IpPrefixEntry, PrefixAsn};
use shield_api::{IpSetResponse, RuleResponse};

use crate::model::{AsnInfo, AsnPrefix, IpPrefix, IpSet, Rule};

// ── Routing ────────────────────────────────────────────────────────

impl From<PrefixAsn> for AsnInfo {
    fn from(raw: PrefixAsn) -> Self {
        Self {
            number: raw.asn,
            name: raw.name.unwrap_or_default(),
            description: raw.description.unwrap_or_default(),
            country_code: raw.country_code.unwrap_or_default(),
            website: None,
        }
    }
}

impl From<AsnResponse> for AsnInfo {
    fn from(raw: AsnResponse) -> Self {
        Self {
            number: raw.asn,
            name: raw.name.unwrap_or_default(),
            description: raw.description_short.unwrap_or_default(),
            country_code: raw.country_code.unwrap_or_default(),
            website: raw.website.filter(|w| !w.is_empty()),
        }
    }
}

impl From<IpPrefixEntry> for IpPrefix {
    fn from(raw: IpPrefixEntry) -> Self {
        Self {
            prefix: raw.prefix,
            cidr: raw.cidr,
            asn: raw.asn.into(),
        }
    }
}

impl From<AsnPrefixEntry> for AsnPrefix {
    fn from(raw: AsnPrefixEntry) -> Self {
        Self {
            prefix: raw.prefix,
            cidr: raw.cidr,
            description: raw.description.unwrap_or_default(),
            country_code: raw.country_code.unwrap_or_default(),
        }
    }
}

// ── Firewall ───────────────────────────────────────────────────────

impl From<IpSetResponse> for IpSet {
    fn from(raw: IpSetResponse) -> Self {
        Self {
            id: raw.id,
            name: raw.name,
            member_count: raw.ips_count,
        }
    }
}

impl From<RuleResponse> for Rule {
    fn from(raw: RuleResponse) -> Self {
        Self {
            id: raw.id,
            name: raw.name,
            metric_name: raw.metric_name,
            predicate_count: raw.predicates_count,
        }
    }
}
