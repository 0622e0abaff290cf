//! Shared helpers for command handlers.

use crate::cli::OutputFormat;
use crate::config::Settings;
use crate::error::CliError;
use crate::output::{self, Status};

/// Prompt for confirmation, auto-approving if `--yes` was passed.
pub fn confirm(message: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    let confirmed = dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(|e| CliError::Io(std::io::Error::other(e)))?;
    Ok(confirmed)
}

/// Print a colored status line. Only table output gets status lines so
/// structured formats stay machine-readable.
pub fn print_status(settings: &Settings, status: Status, message: &str) {
    if settings.output != OutputFormat::Table {
        return;
    }
    output::print_output(
        &output::status_line(status, message, settings.color),
        settings.quiet,
    );
}

/// Render an ISO 3166 alpha-2 country code as a flag emoji.
///
/// Anything that is not exactly two ASCII letters is returned unchanged.
pub fn country_flag(code: &str) -> String {
    const REGIONAL_INDICATOR_A: u32 = 0x1F1E6;

    let code = code.trim();
    if code.len() != 2 || !code.bytes().all(|b| b.is_ascii_alphabetic()) {
        return code.to_owned();
    }

    code.bytes()
        .map(|b| u32::from(b.to_ascii_uppercase() - b'A') + REGIONAL_INDICATOR_A)
        .filter_map(char::from_u32)
        .collect()
}
