// Deterministic names for the WAF objects this tool owns.

use crate::model::Asn;

/// The single rule every block list is attached to.
pub const RULE_NAME: &str = "KOALA-SHIELD-BLOCK-LIST";

/// Name of the IP set holding an ASN's prefixes.
///
/// A block list for an ASN exists exactly when a set with this name does.
pub fn ip_set_name(asn: Asn) -> String {
    format!("SHIELD-ASN{asn}-IPs")
}
