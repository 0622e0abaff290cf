//! Config subcommand handlers.

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts, OutputFormat};
use crate::config;
use crate::error::CliError;
use crate::output;

pub fn handle(args: &ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Path => {
            output::print_output(&config::config_path().display().to_string(), global.quiet);
            Ok(())
        }

        ConfigCommand::Show => {
            let (file, settings) = config::resolve(global)?;
            let rendered = match settings.output {
                OutputFormat::Table | OutputFormat::Plain => config::to_toml(&file)?,
                format => output::render_single(format, &file, |_| String::new(), |_| String::new())?,
            };
            output::print_output(rendered.trim_end(), settings.quiet);
            Ok(())
        }
    }
}
