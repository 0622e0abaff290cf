//! `un-block`: detach an ASN's IP set from the rule.

use shield_core::{Firewall, RoutingSource, Shield};

use crate::cli::AsnArgs;
use crate::config::Settings;
use crate::error::CliError;
use crate::output::Status;

use super::util;

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
        shield.disable_block_list(asn).await?;
        util::print_status(
            settings,
            Status::Success,
            &format!("Done! {asn} has been un-blocked!"),
        );
    }
    Ok(())
}
