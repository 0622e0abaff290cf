//! Block-list orchestration between `shield-api` and the CLI.
//!
//! This crate owns the domain model and the reconciliation logic of the
//! workspace:
//!
//! - **[`Shield`]**: the orchestrator. Turns an ASN into a WAF IP set
//!   ([`create_block_list`](Shield::create_block_list)), wires that set into
//!   or out of the shared block rule
//!   ([`enable_block_list`](Shield::enable_block_list) /
//!   [`disable_block_list`](Shield::disable_block_list)) and answers
//!   [`lookup`](Shield::lookup) queries for IPs and ASNs.
//!
//! - **[`RoutingSource`] / [`Firewall`]**: the two seams `Shield` talks
//!   through. Production adapters wrap [`shield_api::RoutingClient`] and
//!   [`shield_api::WafClient`]; tests substitute in-memory doubles.
//!
//! - **Domain model** ([`model`]): [`Asn`], [`IpSet`], [`Rule`], routing
//!   facts and command results.
//!
//! Nothing here touches disk. The CLI builds a [`ShieldConfig`] and hands
//! it to [`Shield::connect`].

pub mod config;
pub mod convert;
pub mod error;
pub mod model;
pub mod naming;
pub mod shield;
pub mod source;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::ShieldConfig;
pub use error::CoreError;
pub use naming::{RULE_NAME, ip_set_name};
pub use shield::{ProductionShield, Shield, batch_prefixes};
pub use source::{Firewall, RoutingSource};

pub use model::{
    Asn, AsnInfo, AsnPrefix, BlockListSummary, IpPrefix, IpSet, LookupResult, RecordKind, Rule,
};
