// In-memory `RoutingSource` / `Firewall` doubles that record every call.

#![allow(dead_code, clippy::unwrap_used)]

use std::collections::HashMap;
use std::net::IpAddr;
use std::sync::Mutex;

use async_trait::async_trait;

use shield_core::{
    Asn, AsnInfo, AsnPrefix, CoreError, Firewall, IpPrefix, IpSet, RoutingSource, Rule,
};

// ── Routing ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoutingCall {
    IpPrefixes(IpAddr),
    AsnInfo(u32),
    AsnPrefixes(u32),
}

#[derive(Default)]
pub struct FakeRouting {
    ips: HashMap<IpAddr, (String, Vec<IpPrefix>)>,
    infos: HashMap<u32, AsnInfo>,
    prefixes: HashMap<u32, Vec<AsnPrefix>>,
    calls: Mutex<Vec<RoutingCall>>,
}

impl FakeRouting {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ip(mut self, ip: &str, prefixes: Vec<IpPrefix>) -> Self {
        self.ips
            .insert(ip.parse().unwrap(), (ip.to_owned(), prefixes));
        self
    }

    pub fn with_asn(mut self, info: AsnInfo) -> Self {
        self.infos.insert(info.number, info);
        self
    }

    pub fn with_asn_prefixes(mut self, asn: u32, prefixes: Vec<AsnPrefix>) -> Self {
        self.prefixes.insert(asn, prefixes);
        self
    }

    pub fn calls(&self) -> Vec<RoutingCall> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: RoutingCall) {
        self.calls.lock().unwrap().push(call);
    }
}

fn malformed() -> CoreError {
    CoreError::RoutingApi {
        message: "Malformed input".into(),
    }
}

#[async_trait]
impl RoutingSource for FakeRouting {
    async fn ip_prefixes(&self, ip: IpAddr) -> Result<(String, Vec<IpPrefix>), CoreError> {
        self.record(RoutingCall::IpPrefixes(ip));
        self.ips.get(&ip).cloned().ok_or_else(malformed)
    }

    async fn asn_info(&self, asn: Asn) -> Result<AsnInfo, CoreError> {
        self.record(RoutingCall::AsnInfo(asn.get()));
        self.infos.get(&asn.get()).cloned().ok_or_else(malformed)
    }

    async fn asn_prefixes(&self, asn: Asn) -> Result<Vec<AsnPrefix>, CoreError> {
        self.record(RoutingCall::AsnPrefixes(asn.get()));
        self.prefixes.get(&asn.get()).cloned().ok_or_else(malformed)
    }
}

// ── Firewall ────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FirewallCall {
    ListIpSets,
    FindIpSet(String),
    GetOrCreateIpSet(String),
    CreateIpSet(String),
    AddMembers { ip_set_id: String, members: Vec<String> },
    FindRule(String),
    GetOrCreateRule(String),
    CreateRule(String),
    AddSetToRule { rule_id: String, ip_set_id: String },
    RemoveSetFromRule { rule_id: String, ip_set_id: String },
}

/// Firewall operations that can be made to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FirewallOp {
    FindIpSet,
    GetOrCreateRule,
    AddSetToRule,
    RemoveSetFromRule,
}

impl FirewallOp {
    fn operation(self) -> &'static str {
        match self {
            Self::FindIpSet => "ListIPSets",
            Self::GetOrCreateRule => "CreateRule",
            Self::AddSetToRule | Self::RemoveSetFromRule => "UpdateRule",
        }
    }
}

#[derive(Default)]
struct FirewallState {
    ip_sets: Vec<IpSet>,
    rules: Vec<Rule>,
    calls: Vec<FirewallCall>,
    add_members_seen: usize,
}

pub struct FakeFirewall {
    state: Mutex<FirewallState>,
    max_batch_size: usize,
    /// 1-based `add_members` call that fails.
    fail_add_members_at: Option<usize>,
    failing_ops: Vec<FirewallOp>,
}

impl Default for FakeFirewall {
    fn default() -> Self {
        Self {
            state: Mutex::default(),
            max_batch_size: shield_api::MAX_BATCH_SIZE,
            fail_add_members_at: None,
            failing_ops: Vec::new(),
        }
    }
}

impl FakeFirewall {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ip_set(self, id: &str, name: &str, member_count: usize) -> Self {
        self.state.lock().unwrap().ip_sets.push(IpSet {
            id: id.into(),
            name: name.into(),
            member_count,
        });
        self
    }

    pub fn with_rule(self, id: &str, name: &str, predicate_count: usize) -> Self {
        self.state.lock().unwrap().rules.push(Rule {
            id: id.into(),
            name: name.into(),
            metric_name: shield_api::waf::metric_name(name),
            predicate_count,
        });
        self
    }

    pub fn with_max_batch_size(mut self, max: usize) -> Self {
        self.max_batch_size = max;
        self
    }

    pub fn failing_add_members_at(mut self, call: usize) -> Self {
        self.fail_add_members_at = Some(call);
        self
    }

    /// Make every call of `op` fail with a WAF error.
    pub fn failing(mut self, op: FirewallOp) -> Self {
        self.failing_ops.push(op);
        self
    }

    fn check(&self, op: FirewallOp) -> Result<(), CoreError> {
        if self.failing_ops.contains(&op) {
            return Err(CoreError::Firewall {
                operation: op.operation(),
                message: "WAFInternalErrorException: injected".into(),
            });
        }
        Ok(())
    }

    pub fn calls(&self) -> Vec<FirewallCall> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn ip_sets(&self) -> Vec<IpSet> {
        self.state.lock().unwrap().ip_sets.clone()
    }

    /// Every `add_members` batch, in call order.
    pub fn batches(&self) -> Vec<Vec<String>> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                FirewallCall::AddMembers { members, .. } => Some(members),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, pred: impl Fn(&FirewallCall) -> bool) -> usize {
        self.calls().iter().filter(|c| pred(*c)).count()
    }
}

#[async_trait]
impl Firewall for FakeFirewall {
    async fn list_ip_sets(&self) -> Result<Vec<IpSet>, CoreError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(FirewallCall::ListIpSets);
        Ok(state.ip_sets.clone())
    }

    async fn find_ip_set(&self, name: &str) -> Result<Option<String>, CoreError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(FirewallCall::FindIpSet(name.into()));
        self.check(FirewallOp::FindIpSet)?;
        Ok(state
            .ip_sets
            .iter()
            .find(|s| s.name == name)
            .map(|s| s.id.clone()))
    }

    async fn get_or_create_ip_set(&self, name: &str) -> Result<IpSet, CoreError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(FirewallCall::GetOrCreateIpSet(name.into()));
        if let Some(existing) = state.ip_sets.iter().find(|s| s.name == name) {
            return Ok(existing.clone());
        }

        state.calls.push(FirewallCall::CreateIpSet(name.into()));
        let created = IpSet {
            id: format!("ipset-{}", state.ip_sets.len() + 1),
            name: name.into(),
            member_count: 0,
        };
        state.ip_sets.push(created.clone());
        Ok(created)
    }

    async fn add_members(&self, ip_set_id: &str, members: &[String]) -> Result<(), CoreError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(FirewallCall::AddMembers {
            ip_set_id: ip_set_id.into(),
            members: members.to_vec(),
        });
        state.add_members_seen += 1;

        if self.fail_add_members_at == Some(state.add_members_seen) {
            return Err(CoreError::Firewall {
                operation: "UpdateIPSet",
                message: "WAFLimitsExceededException".into(),
            });
        }

        if let Some(set) = state.ip_sets.iter_mut().find(|s| s.id == ip_set_id) {
            set.member_count += members.len();
        }
        Ok(())
    }

    fn max_batch_size(&self) -> usize {
        self.max_batch_size
    }

    async fn find_rule(&self, name: &str) -> Result<Option<String>, CoreError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(FirewallCall::FindRule(name.into()));
        Ok(state
            .rules
            .iter()
            .find(|r| r.name == name)
            .map(|r| r.id.clone()))
    }

    async fn get_or_create_rule(&self, name: &str) -> Result<Rule, CoreError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(FirewallCall::GetOrCreateRule(name.into()));
        self.check(FirewallOp::GetOrCreateRule)?;
        if let Some(existing) = state.rules.iter().find(|r| r.name == name) {
            return Ok(existing.clone());
        }

        state.calls.push(FirewallCall::CreateRule(name.into()));
        let created = Rule {
            id: format!("rule-{}", state.rules.len() + 1),
            name: name.into(),
            metric_name: shield_api::waf::metric_name(name),
            predicate_count: 0,
        };
        state.rules.push(created.clone());
        Ok(created)
    }

    async fn add_set_to_rule(&self, rule_id: &str, ip_set_id: &str) -> Result<(), CoreError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(FirewallCall::AddSetToRule {
            rule_id: rule_id.into(),
            ip_set_id: ip_set_id.into(),
        });
        self.check(FirewallOp::AddSetToRule)
    }

    async fn remove_set_from_rule(
        &self,
        rule_id: &str,
        ip_set_id: &str,
    ) -> Result<(), CoreError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(FirewallCall::RemoveSetFromRule {
            rule_id: rule_id.into(),
            ip_set_id: ip_set_id.into(),
        });
        self.check(FirewallOp::RemoveSetFromRule)
    }
}

// ── Fixtures ────────────────────────────────────────────────────────

pub fn asn_info(number: u32, name: &str, description: &str, country: &str) -> AsnInfo {
    AsnInfo {
        number,
        name: name.into(),
        description: description.into(),
        country_code: country.into(),
        website: None,
    }
}

pub fn ip_prefix(prefix: &str, cidr: u8, asn: AsnInfo) -> IpPrefix {
    IpPrefix {
        prefix: prefix.into(),
        cidr,
        asn,
    }
}

pub fn asn_prefix(prefix: &str, cidr: u8) -> AsnPrefix {
    AsnPrefix {
        prefix: prefix.into(),
        cidr,
        description: String::new(),
        country_code: "US".into(),
    }
}
