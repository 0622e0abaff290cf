//! CLI configuration: `shield_config` file values with `GlobalOpts` on top.

use std::time::Duration;

use clap::ValueEnum;

use shield_core::ShieldConfig;

use crate::cli::{ColorMode, GlobalOpts, OutputFormat};
use crate::error::CliError;
use crate::output;

pub use shield_config::{Config, config_path, load_config, to_toml};

/// Everything a command handler needs besides the `Shield` itself.
#[derive(Debug, Clone)]
pub struct Settings {
    pub shield: ShieldConfig,
    pub output: OutputFormat,
    pub color: bool,
    pub quiet: bool,
    pub yes: bool,
}

/// Load the config file and apply CLI flag overrides.
///
/// Flags (and their environment variables) win over file values, which
/// win over built-in defaults.
pub fn resolve(global: &GlobalOpts) -> Result<(Config, Settings), CliError> {
    let file = load_config()?;
    let settings = apply_overrides(&file, global)?;
    Ok((file, settings))
}

fn apply_overrides(file: &Config, global: &GlobalOpts) -> Result<Settings, CliError> {
    let mut shield = file.to_shield_config()?;

    if let Some(ref region) = global.aws_region {
        if region.trim().is_empty() {
            return Err(CliError::Validation {
                field: "aws-region".into(),
                reason: "must not be empty".into(),
            });
        }
        shield.aws_region.clone_from(region);
    }
    if let Some(secs) = global.timeout {
        if secs == 0 {
            return Err(CliError::Validation {
                field: "timeout".into(),
                reason: "must be at least 1 second".into(),
            });
        }
        shield.firewall_timeout = Duration::from_secs(secs);
    }

    let output = match global.output {
        Some(format) => format,
        None => parse_choice::<OutputFormat>("output", &file.output)?,
    };
    let color_mode = match global.color {
        Some(mode) => mode,
        None => parse_choice::<ColorMode>("color", &file.color)?,
    };

    Ok(Settings {
        shield,
        output,
        color: output::should_color(color_mode),
        quiet: global.quiet,
        yes: global.yes,
    })
}

/// Parse a config-file string into one of the CLI's `ValueEnum` choices.
fn parse_choice<T: ValueEnum>(field: &str, raw: &str) -> Result<T, CliError> {
    T::from_str(raw, true).map_err(|reason| CliError::Validation {
        field: field.into(),
        reason,
    })
}
