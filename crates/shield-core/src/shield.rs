// ── Shield: the block-list orchestrator ──
//
// Composes routing facts with firewall mutations. One record at a time,
// sequentially; the first error stops the operation and nothing already
// applied is rolled back.

use std::net::IpAddr;

use tracing::{debug, info, warn};
use url::Url;

use shield_api::{RoutingClient, TransportConfig, WafClient};

use crate::config::ShieldConfig;
use crate::error::CoreError;
use crate::model::{Asn, BlockListSummary, IpSet, LookupResult, RecordKind};
use crate::naming::{RULE_NAME, ip_set_name};
use crate::source::{Firewall, RoutingSource};

/// `Shield` wired to bgpview.io and AWS WAF Classic Regional.
pub type ProductionShield = Shield<RoutingClient, WafClient>;

/// Block-list orchestrator over a routing source and a firewall.
pub struct Shield<R, F> {
    routing: R,
    firewall: F,
}

impl ProductionShield {
    /// Build the production clients from runtime configuration.
    ///
    /// Loads AWS credentials from the default provider chain; nothing is
    /// sent until the first operation.
    pub async fn connect(config: &ShieldConfig) -> Result<Self, CoreError> {
        let base_url = Url::parse(&config.routing_base_url).map_err(|e| CoreError::Config {
            message: format!("invalid routing base URL '{}': {e}", config.routing_base_url),
        })?;
        let transport = TransportConfig {
            timeout: config.routing_timeout,
            ca_cert: config.routing_ca_cert.clone(),
        };
        let routing = RoutingClient::new(base_url, &transport)?.with_backoff(config.backoff.clone());

        let firewall = WafClient::from_region(&config.aws_region, config.firewall_timeout).await;
        debug!(region = %config.aws_region, "WAF client ready");

        Ok(Self::new(routing, firewall))
    }
}

impl<R, F> Shield<R, F>
where
    R: RoutingSource,
    F: Firewall,
{
    pub fn new(routing: R, firewall: F) -> Self {
        Self { routing, firewall }
    }

    pub fn routing(&self) -> &R {
        &self.routing
    }

    pub fn firewall(&self) -> &F {
        &self.firewall
    }

    // ── Block lists ──────────────────────────────────────────────────

    /// Load every supported IPv4 prefix of an ASN into its IP set,
    /// creating the set if needed.
    ///
    /// Prefixes with a CIDR length the firewall cannot store are dropped
    /// and counted. A failing batch aborts the call; batches already
    /// written stay written. The returned `ip_set` reflects the set as it
    /// was before this call added anything.
    pub async fn create_block_list(&self, asn: &str) -> Result<BlockListSummary, CoreError> {
        let asn: Asn = asn.parse()?;

        let prefixes = self.routing.asn_prefixes(asn).await?;
        let ip_set = self.firewall.get_or_create_ip_set(&ip_set_name(asn)).await?;

        let total = prefixes.len();
        let accepted: Vec<String> = prefixes
            .into_iter()
            .filter(|p| self.firewall.supports_cidr(p.cidr))
            .map(|p| p.prefix)
            .collect();
        let accepted_count = accepted.len();
        let discarded = total - accepted_count;
        if discarded > 0 {
            debug!(%asn, discarded, "skipping prefixes with unsupported CIDR lengths");
        }

        let batches = batch_prefixes(accepted, self.firewall.max_batch_size());
        for (index, batch) in batches.iter().enumerate() {
            debug!(%asn, batch = index + 1, of = batches.len(), size = batch.len(), "adding prefixes");
            self.firewall.add_members(&ip_set.id, batch).await?;
        }

        info!(
            %asn,
            ip_set = %ip_set.name,
            accepted = accepted_count,
            discarded,
            batches = batches.len(),
            "block list populated"
        );

        Ok(BlockListSummary {
            ip_set,
            accepted: accepted_count,
            discarded,
            batches: batches.len(),
        })
    }

    /// Attach an ASN's IP set to the block rule, creating the rule if needed.
    ///
    /// Never creates the IP set. When it does not exist the rule update is
    /// still attempted with an empty set ID, which the firewall rejects.
    pub async fn enable_block_list(&self, asn: &str) -> Result<(), CoreError> {
        let asn: Asn = asn.parse()?;
        let name = ip_set_name(asn);

        let ip_set_id = match self.firewall.find_ip_set(&name).await? {
            Some(id) => id,
            None => {
                warn!(%asn, ip_set = %name, "no IP set found; enabling with an empty IP set ID");
                String::new()
            }
        };

        let rule = self.firewall.get_or_create_rule(RULE_NAME).await?;
        self.firewall.add_set_to_rule(&rule.id, &ip_set_id).await?;
        info!(%asn, rule = %rule.name, "block list enabled");
        Ok(())
    }

    /// Detach an ASN's IP set from the block rule.
    ///
    /// Fails with [`CoreError::IpSetNotFound`] (leaving the rule alone)
    /// when the ASN has no IP set.
    pub async fn disable_block_list(&self, asn: &str) -> Result<(), CoreError> {
        let asn: Asn = asn.parse()?;

        let Some(ip_set_id) = self.firewall.find_ip_set(&ip_set_name(asn)).await? else {
            return Err(CoreError::IpSetNotFound { asn });
        };

        let rule = self.firewall.get_or_create_rule(RULE_NAME).await?;
        self.firewall.remove_set_from_rule(&rule.id, &ip_set_id).await?;
        info!(%asn, rule = %rule.name, "block list disabled");
        Ok(())
    }

    /// Every IP set in the firewall, block lists or not.
    pub async fn list_ip_sets(&self) -> Result<Vec<IpSet>, CoreError> {
        self.firewall.list_ip_sets().await
    }

    // ── Lookups ──────────────────────────────────────────────────────

    /// Describe the ASN behind an IP address, or an ASN itself.
    ///
    /// For an IP the most specific covering prefix wins (highest CIDR
    /// length; on a tie, whichever the routing source listed first).
    pub async fn lookup(&self, record: &str) -> Result<LookupResult, CoreError> {
        let record = record.trim();
        match record.parse::<IpAddr>() {
            Ok(ip) => self.lookup_ip(ip).await,
            Err(_) => self.lookup_asn(record).await,
        }
    }

    async fn lookup_ip(&self, ip: IpAddr) -> Result<LookupResult, CoreError> {
        let (echoed, mut prefixes) = self.routing.ip_prefixes(ip).await?;

        // Stable: equal CIDR lengths keep their upstream order.
        prefixes.sort_by(|a, b| b.cidr.cmp(&a.cidr));
        let Some(best) = prefixes.into_iter().next() else {
            return Err(CoreError::NoPrefixes {
                record: ip.to_string(),
            });
        };
        debug!(%ip, prefix = %best.prefix, asn = best.asn.number, "most specific prefix");

        let owned = self.routing.asn_prefixes(Asn::new(best.asn.number)).await?;

        Ok(LookupResult {
            kind: RecordKind::Ip,
            record: if echoed.is_empty() { ip.to_string() } else { echoed },
            asn_name: best.asn.name,
            asn_number: best.asn.number,
            asn_description: best.asn.description,
            asn_country: best.asn.country_code,
            asn_website: best.asn.website,
            asn_ipv4_count: owned.len(),
        })
    }

    async fn lookup_asn(&self, record: &str) -> Result<LookupResult, CoreError> {
        let asn: Asn = record.parse()?;

        let info = self.routing.asn_info(asn).await?;
        let owned = self.routing.asn_prefixes(asn).await?;

        Ok(LookupResult {
            kind: RecordKind::Asn,
            record: record.to_owned(),
            asn_name: info.name,
            asn_number: info.number,
            asn_description: info.description,
            asn_country: info.country_code,
            asn_website: info.website,
            asn_ipv4_count: owned.len(),
        })
    }
}

// ── Batching ─────────────────────────────────────────────────────────

/// Split prefixes into update batches, preserving order.
///
/// A batch is closed once it grows past `max_batch_size`, so every batch
/// but the last holds exactly `max_batch_size + 1` entries. Empty batches
/// are never produced.
pub fn batch_prefixes(prefixes: Vec<String>, max_batch_size: usize) -> Vec<Vec<String>> {
    let mut batches = Vec::new();
    let mut current = Vec::new();

    for prefix in prefixes {
        current.push(prefix);
        if current.len() > max_batch_size {
            batches.push(std::mem::take(&mut current));
        }
    }

    if !current.is_empty() {
        batches.push(current);
    }
    batches
}
