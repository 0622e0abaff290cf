//! `ipsets`: every WAF Classic IP set in the region.

use tabled::Tabled;

use shield_core::{Firewall, IpSet, RoutingSource, Shield};

use crate::cli::OutputFormat;
use crate::config::Settings;
use crate::error::CliError;
use crate::output;

#[derive(Tabled)]
struct IpSetRow {
    #[tabled(rename = "WAF Type")]
    waf_type: &'static str,
    #[tabled(rename = "IP Set Name")]
    name: String,
    #[tabled(rename = "IP Set ID")]
    id: String,
    #[tabled(rename = "IP Set Count")]
    count: usize,
}

impl From<&IpSet> for IpSetRow {
    fn from(s: &IpSet) -> Self {
        Self {
            waf_type: "WAF Classic",
            name: s.name.clone(),
            id: s.id.clone(),
            count: s.member_count,
        }
    }
}

pub async fn handle<R, F>(shield: &Shield<R, F>, settings: &Settings) -> Result<(), CliError>
where
    R: RoutingSource,
    F: Firewall,
{
    let sets = shield.list_ip_sets().await?;
    let rendered = render(settings.output, &sets)?;
    output::print_output(&rendered, settings.quiet);
    Ok(())
}

fn render(format: OutputFormat, sets: &[IpSet]) -> Result<String, CliError> {
    output::render_list(format, sets, |s| IpSetRow::from(s), |s| s.id.clone())
}
