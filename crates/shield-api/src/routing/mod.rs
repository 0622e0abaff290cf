// Read-only client for the bgpview.io routing-data API.
//
// Three read paths under the base URL: `/ip/{ip}`, `/asn/{asn}` and
// `/asn/{asn}/prefixes`, all wrapped in a `{status, status_message, data}`
// envelope.

pub mod client;
pub mod models;

pub use client::{DEFAULT_BACKOFF_SCHEDULE, DEFAULT_BASE_URL, RoutingClient};
