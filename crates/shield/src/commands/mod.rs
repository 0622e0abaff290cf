//! Command dispatch: bridges CLI args -> `Shield` operations -> output formatting.

pub mod block;
pub mod config_cmd;
pub mod ipsets;
pub mod lookup;
pub mod unblock;
pub mod util;

use shield_core::{Firewall, RoutingSource, Shield};

use crate::cli::Command;
use crate::config::Settings;
use crate::error::CliError;

/// Dispatch a command that needs routing data or the firewall.
pub async fn dispatch<R, F>(
    cmd: Command,
    shield: &Shield<R, F>,
    settings: &Settings,
) -> Result<(), CliError>
where
    R: RoutingSource,
    F: Firewall,
{
    match cmd {
        Command::Block(args) => block::handle(shield, &args, settings).await,
        Command::UnBlock(args) => unblock::handle(shield, &args, settings).await,
        Command::Ipsets => ipsets::handle(shield, settings).await,
        Command::Lookup(args) => lookup::handle(shield, &args, settings).await,
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => Err(CliError::Internal(
            "configuration commands do not need a Shield".into(),
        )),
    }
}
