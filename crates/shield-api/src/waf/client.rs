// AWS WAF Classic (regional) client
//
// Wraps `aws_sdk_wafregional::Client` with the find-or-create helpers,
// marker pagination and the change-token dance every mutation needs.

use std::future::Future;
use std::time::Duration;

use aws_config::BehaviorVersion;
use aws_config::timeout::TimeoutConfig;
use aws_sdk_wafregional::config::Region;
use aws_sdk_wafregional::error::DisplayErrorContext;
use aws_sdk_wafregional::types::{
    ChangeAction, IpSet, IpSetDescriptor, IpSetDescriptorType, IpSetUpdate, Predicate,
    PredicateType, Rule, RuleUpdate,
};
use tracing::{debug, info};

use super::{IpSetResponse, RuleResponse, metric_name};
use crate::error::Error;

/// `Limit` used for every List* call (the service maximum).
const PAGE_SIZE: i32 = 100;

/// One page of `{id, name}` summaries from a List* call.
struct Page {
    items: Vec<Summary>,
    next_marker: Option<String>,
}

struct Summary {
    id: String,
    name: String,
}

/// Client for IP sets and rules in AWS WAF Classic Regional.
pub struct WafClient {
    waf: aws_sdk_wafregional::Client,
}

impl WafClient {
    /// Load the default AWS credential chain for `region`, with `timeout`
    /// bounding every operation (retries included).
    pub async fn from_region(region: impl Into<String>, timeout: Duration) -> Self {
        let timeouts = TimeoutConfig::builder().operation_timeout(timeout).build();
        let config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(region.into()))
            .timeout_config(timeouts)
            .load()
            .await;
        Self::with_client(aws_sdk_wafregional::Client::new(&config))
    }

    /// Wrap a pre-configured SDK client.
    pub fn with_client(waf: aws_sdk_wafregional::Client) -> Self {
        Self { waf }
    }

    // ── IP sets ──────────────────────────────────────────────────────

    /// Every IP set in the region, with its current descriptor count.
    ///
    /// Costs one `ListIPSets` per page plus one `GetIPSet` per set.
    pub async fn list_ip_sets(&self) -> Result<Vec<IpSetResponse>, Error> {
        let summaries = drain_pages(|marker| self.ip_set_page(marker)).await?;

        let mut sets = Vec::with_capacity(summaries.len());
        for summary in summaries {
            sets.push(self.get_ip_set(&summary.id).await?);
        }
        Ok(sets)
    }

    /// Search for an IP set by name and return its ID if it exists.
    pub async fn find_ip_set(&self, name: &str) -> Result<Option<String>, Error> {
        find_by_name(name, |marker| self.ip_set_page(marker)).await
    }

    /// Fetch a single IP set.
    pub async fn get_ip_set(&self, id: &str) -> Result<IpSetResponse, Error> {
        let out = self
            .waf
            .get_ip_set()
            .ip_set_id(id)
            .send()
            .await
            .map_err(sdk_error("GetIPSet"))?;

        let ip_set = out.ip_set().ok_or(Error::MissingField {
            operation: "GetIPSet",
            field: "IPSet",
        })?;
        Ok(ip_set_response(ip_set))
    }

    /// Return the IP set called `name`, creating an empty one if none exists.
    ///
    /// Find and create are two separate calls; concurrent callers can race
    /// and end up with two sets of the same name.
    pub async fn get_or_create_ip_set(&self, name: &str) -> Result<IpSetResponse, Error> {
        if let Some(id) = self.find_ip_set(name).await? {
            return self.get_ip_set(&id).await;
        }

        let token = self.change_token().await?;
        info!(name, "creating WAF IP set");
        let out = self
            .waf
            .create_ip_set()
            .name(name)
            .change_token(token)
            .send()
            .await
            .map_err(sdk_error("CreateIPSet"))?;

        let ip_set = out.ip_set().ok_or(Error::MissingField {
            operation: "CreateIPSet",
            field: "IPSet",
        })?;
        Ok(ip_set_response(ip_set))
    }

    /// Insert IPv4 CIDR blocks into an IP set with a single `UpdateIPSet`.
    pub async fn add_ips_to_ip_set(&self, ip_set_id: &str, ips: &[String]) -> Result<(), Error> {
        if ips.is_empty() {
            return Ok(());
        }

        let updates = ips
            .iter()
            .map(|ip| {
                let descriptor = IpSetDescriptor::builder()
                    .r#type(IpSetDescriptorType::Ipv4)
                    .value(ip)
                    .build()
                    .map_err(sdk_error("UpdateIPSet"))?;
                IpSetUpdate::builder()
                    .action(ChangeAction::Insert)
                    .ip_set_descriptor(descriptor)
                    .build()
                    .map_err(sdk_error("UpdateIPSet"))
            })
            .collect::<Result<Vec<_>, Error>>()?;

        let token = self.change_token().await?;
        info!(ip_set_id, count = updates.len(), "inserting IPs into WAF IP set");
        self.waf
            .update_ip_set()
            .ip_set_id(ip_set_id)
            .change_token(token)
            .set_updates(Some(updates))
            .send()
            .await
            .map_err(sdk_error("UpdateIPSet"))?;
        Ok(())
    }

    // ── Rules ────────────────────────────────────────────────────────

    /// Search for a rule by name and return its ID if it exists.
    pub async fn find_rule(&self, name: &str) -> Result<Option<String>, Error> {
        find_by_name(name, |marker| self.rule_page(marker)).await
    }

    /// Fetch a single rule.
    pub async fn get_rule(&self, id: &str) -> Result<RuleResponse, Error> {
        let out = self
            .waf
            .get_rule()
            .rule_id(id)
            .send()
            .await
            .map_err(sdk_error("GetRule"))?;

        let rule = out.rule().ok_or(Error::MissingField {
            operation: "GetRule",
            field: "Rule",
        })?;
        Ok(rule_response(rule))
    }

    /// Return the rule called `name`, creating it (with a derived metric
    /// name) if none exists.
    pub async fn get_or_create_rule(&self, name: &str) -> Result<RuleResponse, Error> {
        if let Some(id) = self.find_rule(name).await? {
            return self.get_rule(&id).await;
        }

        let token = self.change_token().await?;
        let metric = metric_name(name);
        info!(name, metric = %metric, "creating WAF rule");
        let out = self
            .waf
            .create_rule()
            .name(name)
            .metric_name(metric)
            .change_token(token)
            .send()
            .await
            .map_err(sdk_error("CreateRule"))?;

        let rule = out.rule().ok_or(Error::MissingField {
            operation: "CreateRule",
            field: "Rule",
        })?;
        Ok(rule_response(rule))
    }

    /// Reference an IP set from a rule through an IPMatch predicate.
    pub async fn add_ip_set_to_rule(&self, rule_id: &str, ip_set_id: &str) -> Result<(), Error> {
        self.modify_rule(ChangeAction::Insert, rule_id, ip_set_id)
            .await
    }

    /// Drop the IPMatch predicate referencing an IP set from a rule.
    pub async fn remove_ip_set_from_rule(
        &self,
        rule_id: &str,
        ip_set_id: &str,
    ) -> Result<(), Error> {
        self.modify_rule(ChangeAction::Delete, rule_id, ip_set_id)
            .await
    }

    async fn modify_rule(
        &self,
        action: ChangeAction,
        rule_id: &str,
        ip_set_id: &str,
    ) -> Result<(), Error> {
        let predicate = Predicate::builder()
            .negated(false)
            .r#type(PredicateType::IpMatch)
            .data_id(ip_set_id)
            .build()
            .map_err(sdk_error("UpdateRule"))?;
        let update = RuleUpdate::builder()
            .action(action.clone())
            .predicate(predicate)
            .build()
            .map_err(sdk_error("UpdateRule"))?;

        let token = self.change_token().await?;
        info!(rule_id, ip_set_id, action = action.as_str(), "updating WAF rule");
        self.waf
            .update_rule()
            .rule_id(rule_id)
            .change_token(token)
            .updates(update)
            .send()
            .await
            .map_err(sdk_error("UpdateRule"))?;
        Ok(())
    }

    // ── Helpers ──────────────────────────────────────────────────────

    /// Acquire a fresh change token for the next mutation.
    async fn change_token(&self) -> Result<String, Error> {
        let out = self
            .waf
            .get_change_token()
            .send()
            .await
            .map_err(sdk_error("GetChangeToken"))?;

        out.change_token()
            .map(str::to_owned)
            .ok_or(Error::MissingField {
                operation: "GetChangeToken",
                field: "ChangeToken",
            })
    }

    async fn ip_set_page(&self, marker: Option<String>) -> Result<Page, Error> {
        debug!(?marker, "ListIPSets");
        let out = self
            .waf
            .list_ip_sets()
            .limit(PAGE_SIZE)
            .set_next_marker(marker)
            .send()
            .await
            .map_err(sdk_error("ListIPSets"))?;

        Ok(Page {
            items: out
                .ip_sets()
                .iter()
                .map(|s| Summary {
                    id: s.ip_set_id().owned_text(),
                    name: s.name().owned_text(),
                })
                .collect(),
            next_marker: out.next_marker().map(str::to_owned),
        })
    }

    async fn rule_page(&self, marker: Option<String>) -> Result<Page, Error> {
        debug!(?marker, "ListRules");
        let out = self
            .waf
            .list_rules()
            .limit(PAGE_SIZE)
            .set_next_marker(marker)
            .send()
            .await
            .map_err(sdk_error("ListRules"))?;

        Ok(Page {
            items: out
                .rules()
                .iter()
                .map(|r| Summary {
                    id: r.rule_id().owned_text(),
                    name: r.name().owned_text(),
                })
                .collect(),
            next_marker: out.next_marker().map(str::to_owned),
        })
    }
}

// ── Pagination ───────────────────────────────────────────────────────

/// Collect every page into a single `Vec`.
async fn drain_pages<F, Fut>(fetch: F) -> Result<Vec<Summary>, Error>
where
    F: Fn(Option<String>) -> Fut,
    Fut: Future<Output = Result<Page, Error>>,
{
    let mut all = Vec::new();
    let mut marker = None;

    loop {
        let page = fetch(marker).await?;
        let received = page.items.len();
        all.extend(page.items);

        // WAF can hand back a marker alongside an empty final page.
        match page.next_marker {
            Some(next) if received > 0 => marker = Some(next),
            _ => break,
        }
    }

    Ok(all)
}

/// Walk pages until a summary named `name` turns up.
async fn find_by_name<F, Fut>(name: &str, fetch: F) -> Result<Option<String>, Error>
where
    F: Fn(Option<String>) -> Fut,
    Fut: Future<Output = Result<Page, Error>>,
{
    let mut marker = None;

    loop {
        let page = fetch(marker).await?;
        let received = page.items.len();
        if let Some(found) = page.items.into_iter().find(|s| s.name == name) {
            return Ok(Some(found.id));
        }

        match page.next_marker {
            Some(next) if received > 0 => marker = Some(next),
            _ => return Ok(None),
        }
    }
}

// ── Conversions ──────────────────────────────────────────────────────

fn ip_set_response(ip_set: &IpSet) -> IpSetResponse {
    IpSetResponse {
        id: ip_set.ip_set_id().owned_text(),
        name: ip_set.name().owned_text(),
        ips_count: ip_set.ip_set_descriptors().len(),
    }
}

fn rule_response(rule: &Rule) -> RuleResponse {
    RuleResponse {
        id: rule.rule_id().owned_text(),
        name: rule.name().owned_text(),
        metric_name: rule.metric_name().owned_text(),
        predicates_count: rule.predicates().len(),
    }
}

/// SDK getters return `&str` for required members and `Option<&str>` for
/// optional ones; normalize both into an owned `String`.
trait OwnedText {
    fn owned_text(self) -> String;
}

impl OwnedText for &str {
    fn owned_text(self) -> String {
        self.to_owned()
    }
}

impl OwnedText for Option<&str> {
    fn owned_text(self) -> String {
        self.unwrap_or_default().to_owned()
    }
}

/// Map an SDK (or builder) failure into `Error::Firewall`, keeping the full
/// source chain in the message.
fn sdk_error<E: std::error::Error>(operation: &'static str) -> impl Fn(E) -> Error {
    move |err| Error::Firewall {
        operation,
        message: DisplayErrorContext(err).to_string(),
    }
}
