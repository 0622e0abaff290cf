mod cli;
mod commands;
mod config;
mod error;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use shield_core::ProductionShield;

use crate::cli::{Cli, ColorMode, Command};
use crate::error::{CliError, EXIT_FAILURE};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_tracing(cli.global.verbose);
    init_miette(output::should_color(cli.global.color.unwrap_or(ColorMode::Auto)));

    // Failures are reported on stdout next to the status lines they interrupt
    if let Err(err) = run(cli).await {
        println!("{:?}", miette::Report::new(err));
        std::process::exit(EXIT_FAILURE);
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn init_miette(color: bool) {
    // Only fails if a hook is already installed
    let _ = miette::set_hook(Box::new(move |_| {
        Box::new(miette::MietteHandlerOpts::new().color(color).build())
    }));
}

async fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::Completions(args) => {
            use clap::CommandFactory;
            use clap_complete::generate;

            let mut cmd = Cli::command();
            generate(args.shell, &mut cmd, "koala-shield", &mut std::io::stdout());
            Ok(())
        }

        // Config commands never touch AWS or the routing service
        Command::Config(args) => commands::config_cmd::handle(&args, &cli.global),

        cmd => {
            let (_, settings) = config::resolve(&cli.global)?;
            let shield = ProductionShield::connect(&settings.shield).await?;

            tracing::debug!(command = ?cmd, region = %settings.shield.aws_region, "dispatching command");
            commands::dispatch(cmd, &shield, &settings).await
        }
    }
}
