// ── Routing facts ──
//
// Immutable snapshots of what the routing service reported. Optional
// upstream fields collapse to empty strings here; the CLI renders them
// as blanks.

use serde::{Deserialize, Serialize};
use strum::Display;

/// Autonomous system metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AsnInfo {
    pub number: u32,
    pub name: String,
    pub description: String,
    pub country_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
}

/// A routed prefix covering a looked-up IP, with its owning ASN.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IpPrefix {
    pub prefix: String,
    pub cidr: u8,
    pub asn: AsnInfo,
}

/// A prefix announced by an ASN.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AsnPrefix {
    pub prefix: String,
    pub cidr: u8,
    pub description: String,
    pub country_code: String,
}

/// Whether a lookup was answered for an IP or an ASN.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[strum(serialize_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum RecordKind {
    Ip,
    Asn,
}

/// Result of [`Shield::lookup`](crate::Shield::lookup).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupResult {
    pub kind: RecordKind,
    /// The record as the routing service echoed it (IP mode) or as given.
    pub record: String,
    pub asn_name: String,
    pub asn_number: u32,
    pub asn_description: String,
    pub asn_country: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asn_website: Option<String>,
    pub asn_ipv4_count: usize,
}
