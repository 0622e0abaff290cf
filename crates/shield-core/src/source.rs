// ── Seams between the orchestrator and the outside world ──
//
// `Shield` only ever talks to routing data and the firewall through these
// traits. Each has one production adapter below; the integration tests
// provide in-memory doubles.

use std::net::IpAddr;

use async_trait::async_trait;

use shield_api::{RoutingClient, WafClient};

use crate::error::CoreError;
use crate::model::{Asn, AsnInfo, AsnPrefix, IpPrefix, IpSet, Rule};

/// Read-only source of routing facts.
#[async_trait]
pub trait RoutingSource: Send + Sync {
    /// The IP as echoed by the source, plus every routed prefix containing it.
    async fn ip_prefixes(&self, ip: IpAddr) -> Result<(String, Vec<IpPrefix>), CoreError>;

    async fn asn_info(&self, asn: Asn) -> Result<AsnInfo, CoreError>;

    /// IPv4 prefixes announced by `asn`.
    async fn asn_prefixes(&self, asn: Asn) -> Result<Vec<AsnPrefix>, CoreError>;
}

/// IP sets and rules in a web application firewall.
#[async_trait]
pub trait Firewall: Send + Sync {
    async fn list_ip_sets(&self) -> Result<Vec<IpSet>, CoreError>;

    /// ID of the IP set called `name`, if one exists.
    async fn find_ip_set(&self, name: &str) -> Result<Option<String>, CoreError>;

    async fn get_or_create_ip_set(&self, name: &str) -> Result<IpSet, CoreError>;

    /// Whether a prefix of this length can be stored in an IP set.
    fn supports_cidr(&self, cidr: u8) -> bool {
        shield_api::waf::is_supported_cidr(cidr)
    }

    /// Insert CIDR blocks into an IP set in one update.
    async fn add_members(&self, ip_set_id: &str, members: &[String]) -> Result<(), CoreError>;

    /// Batch threshold for [`add_members`](Firewall::add_members).
    fn max_batch_size(&self) -> usize {
        shield_api::MAX_BATCH_SIZE
    }

    async fn find_rule(&self, name: &str) -> Result<Option<String>, CoreError>;

    async fn get_or_create_rule(&self, name: &str) -> Result<Rule, CoreError>;

    async fn add_set_to_rule(&self, rule_id: &str, ip_set_id: &str) -> Result<(), CoreError>;

    async fn remove_set_from_rule(&self, rule_id: &str, ip_set_id: &str)
    -> Result<(), CoreError>;
}

// ── Production adapters ──────────────────────────────────────────────

#[async_trait]
impl RoutingSource for RoutingClient {
    async fn ip_prefixes(&self, ip: IpAddr) -> Result<(String, Vec<IpPrefix>), CoreError> {
        let response = self.ip_lookup(ip).await?;
        let prefixes = response.prefixes.into_iter().map(IpPrefix::from).collect();
        Ok((response.ip, prefixes))
    }

    async fn asn_info(&self, asn: Asn) -> Result<AsnInfo, CoreError> {
        Ok(self.asn_lookup(asn.get()).await?.into())
    }

    async fn asn_prefixes(&self, asn: Asn) -> Result<Vec<AsnPrefix>, CoreError> {
        let response = self.asn_prefixes_lookup(asn.get()).await?;
        Ok(response
            .ipv4_prefixes
            .into_iter()
            .map(AsnPrefix::from)
            .collect())
    }
}

#[async_trait]
impl Firewall for WafClient {
    async fn list_ip_sets(&self) -> Result<Vec<IpSet>, CoreError> {
        let sets = WafClient::list_ip_sets(self).await?;
        Ok(sets.into_iter().map(IpSet::from).collect())
    }

    async fn find_ip_set(&self, name: &str) -> Result<Option<String>, CoreError> {
        Ok(WafClient::find_ip_set(self, name).await?)
    }

    async fn get_or_create_ip_set(&self, name: &str) -> Result<IpSet, CoreError> {
        Ok(WafClient::get_or_create_ip_set(self, name).await?.into())
    }

    async fn add_members(&self, ip_set_id: &str, members: &[String]) -> Result<(), CoreError> {
        Ok(self.add_ips_to_ip_set(ip_set_id, members).await?)
    }

    async fn find_rule(&self, name: &str) -> Result<Option<String>, CoreError> {
        Ok(WafClient::find_rule(self, name).await?)
    }

    async fn get_or_create_rule(&self, name: &str) -> Result<Rule, CoreError> {
        Ok(WafClient::get_or_create_rule(self, name).await?.into())
    }

    async fn add_set_to_rule(&self, rule_id: &str, ip_set_id: &str) -> Result<(), CoreError> {
        Ok(self.add_ip_set_to_rule(rule_id, ip_set_id).await?)
    }

    async fn remove_set_from_rule(
        &self,
        rule_id: &str,
        ip_set_id: &str,
    ) -> Result<(), CoreError> {
        Ok(self.remove_ip_set_from_rule(rule_id, ip_set_id).await?)
    }
}
