//! `lookup`: describe IP addresses and ASNs.

use tabled::Tabled;

use shield_core::{Firewall, LookupResult, RoutingSource, Shield};

use crate::cli::{LookupArgs, OutputFormat};
use crate::config::Settings;
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Tabled)]
struct LookupRow {
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Record")]
    record: String,
    #[tabled(rename = "ASN Name")]
    asn_name: String,
    #[tabled(rename = "ASN Number")]
    asn_number: u32,
    #[tabled(rename = "ASN Description")]
    asn_description: String,
    #[tabled(rename = "ASN IPv4 Prefixes")]
    asn_ipv4_count: usize,
    #[tabled(rename = "ASN Country")]
    asn_country: String,
}

impl From<&LookupResult> for LookupRow {
    fn from(r: &LookupResult) -> Self {
        Self {
            kind: r.kind.to_string(),
            record: r.record.clone(),
            asn_name: r.asn_name.clone(),
            asn_number: r.asn_number,
            asn_description: r.asn_description.clone(),
            asn_ipv4_count: r.asn_ipv4_count,
            asn_country: util::country_flag(&r.asn_country),
        }
    }
}

pub async fn handle<R, F>(
    shield: &Shield<R, F>,
    args: &LookupArgs,
    settings: &Settings,
) -> Result<(), CliError>
where
    R: RoutingSource,
    F: Firewall,
{
    let mut results = Vec::with_capacity(args.records.len());
    for record in &args.records {
        results.push(shield.lookup(record).await?);
    }

    let rendered = render(settings.output, &results)?;
    output::print_output(&rendered, settings.quiet);
    Ok(())
}

fn render(format: OutputFormat, results: &[LookupResult]) -> Result<String, CliError> {
    output::render_list(format, results, |r| LookupRow::from(r), |r| {
        r.asn_number.to_string()
    })
}
