// ── Domain model ──
//
// Canonical shapes the CLI depends on. Routing facts are re-fetched on
// every invocation; firewall objects live only in AWS.

pub mod asn;
pub mod firewall;
pub mod routing;

// ── Re-exports ──────────────────────────────────────────────────────

pub use asn::Asn;
pub use firewall::{BlockListSummary, IpSet, Rule};
pub use routing::{AsnInfo, AsnPrefix, IpPrefix, LookupResult, RecordKind};
