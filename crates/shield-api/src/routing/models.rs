// ── bgpview.io response types ──
//
// Shapes of the `data` payload for each read path. The service returns
// `null` for many descriptive fields, so anything that is not an identifier
// is optional.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The `{status, status_message, data}` envelope wrapping every response.
///
/// `data` stays untyped until the status has been checked: failed queries
/// carry an arbitrary (often empty) payload that would not decode into the
/// success shape.
#[derive(Debug, Deserialize)]
pub struct Envelope {
    pub status: String,
    #[serde(default)]
    pub status_message: Option<String>,
    #[serde(default)]
    pub data: Value,
}

/// `GET /ip/{ip}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IpLookupResponse {
    pub ip: String,
    #[serde(default)]
    pub prefixes: Vec<IpPrefixEntry>,
}

/// One routed prefix containing the queried IP.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IpPrefixEntry {
    pub prefix: String,
    #[serde(default)]
    pub ip: Option<String>,
    pub cidr: u8,
    pub asn: PrefixAsn,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub country_code: Option<String>,
}

/// The ASN announcing an [`IpPrefixEntry`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrefixAsn {
    pub asn: u32,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub country_code: Option<String>,
}

/// `GET /asn/{asn}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AsnResponse {
    pub asn: u32,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description_short: Option<String>,
    #[serde(default)]
    pub country_code: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
}

/// `GET /asn/{asn}/prefixes`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AsnPrefixesResponse {
    #[serde(default)]
    pub ipv4_prefixes: Vec<AsnPrefixEntry>,
    #[serde(default)]
    pub ipv6_prefixes: Vec<AsnPrefixEntry>,
}

/// A prefix originated by an ASN.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AsnPrefixEntry {
    pub prefix: String,
    #[serde(default)]
    pub ip: Option<String>,
    pub cidr: u8,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub country_code: Option<String>,
}
