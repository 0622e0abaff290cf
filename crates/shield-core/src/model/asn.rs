// ── Autonomous system numbers ──

use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::IpAddr;
use std::str::FromStr;

use crate::error::CoreError;

/// An autonomous system number.
///
/// Parses from `20473` or `AS20473` (prefix case-insensitive). Displays
/// as the bare number, which is the form the IP-set naming scheme uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Asn(u32);

impl Asn {
    pub const fn new(number: u32) -> Self {
        Self(number)
    }

    pub const fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for Asn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for Asn {
    fn from(number: u32) -> Self {
        Self(number)
    }
}

impl FromStr for Asn {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim();

        if raw.parse::<IpAddr>().is_ok() {
            return Err(CoreError::Validation {
                message: format!(
                    "{raw} is an IP address; block lists can only be created for ASNs"
                ),
            });
        }

        let digits = match raw.get(..2) {
            Some(prefix) if prefix.eq_ignore_ascii_case("AS") => &raw[2..],
            _ => raw,
        };

        let invalid = || CoreError::Validation {
            message: format!("invalid ASN '{raw}': expected a number such as 20473 or AS20473"),
        };

        // u32::from_str would accept a leading '+'
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        digits.parse::<u32>().map(Self).map_err(|_| invalid())
    }
}
