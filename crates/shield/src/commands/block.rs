//! `block`: create an ASN's IP set, confirm, then attach it to the rule.

use shield_core::{BlockListSummary, Firewall, RoutingSource, Shield};

use crate::cli::AsnArgs;
use crate::config::Settings;
use crate::error::CliError;
use crate::output::{self, Status};

use super::util;

fn summary_detail(s: &BlockListSummary) -> String {
    let updates = if s.batches == 1 { "update" } else { "updates" };
    let mut line = format!(
        "IP Set {} ({}): {} prefixes added in {} {updates}",
        s.ip_set.name, s.ip_set.id, s.accepted, s.batches
    );
    if s.discarded > 0 {
        line.push_str(&format!(", {} with unsupported CIDR lengths skipped", s.discarded));
    }
    line
}

pub async fn handle<R, F>(
    shield: &Shield<R, F>,
    args: &AsnArgs,
    settings: &Settings,
) -> Result<(), CliError>
where
    R: RoutingSource,
    F: Firewall,
{
    for asn in &args.asns {
        let summary = shield.create_block_list(asn).await?;
        let rendered = output::render_single(
            settings.output,
            &summary,
            summary_detail,
            |s| s.ip_set.id.clone(),
        )?;
        output::print_output(&rendered, settings.quiet);

        if !util::confirm(&format!("Block IP Set for ASN {asn}"), settings.yes)? {
            return Err(CliError::BlockCancelled { asn: asn.clone() });
        }

        util::print_status(settings, Status::Progress, "Enabling block in AWS WAF...");
        shield.enable_block_list(asn).await?;
        util::print_status(
            settings,
            Status::Success,
            &format!("Done! ASN {asn} has been blocked!"),
        );
    }
    Ok(())
}
