//! Error handling and display for the CLI.

use bcid::{BcidError, ErrorKind};
use colored::Colorize;
use thiserror::Error;

/// Usage summary printed when generation is requested without a prefix.
pub const USAGE: &str = "\
Usage:
  Generate: bcid -p PREFIX [-m MACHINE_ID] [-t DATETIME] [-r] [-n COUNT]
  Decode:   bcid -d IDENTIFIER

Examples:
  bcid -p TEST
  bcid -p TEST -m 2 -t '2023-12-25T10:30:00'
  bcid -p TEST -r
  bcid -d TESTjqEmXg1pkaabnxcdodododododod";

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Prefix is required when generating an identifier")]
    MissingPrefix,

    #[error("Failed to render output: {0}")]
    Output(#[from] serde_json::Error),
}

/// Print an error in a user-friendly format.
pub fn print_error(err: &anyhow::Error) {
    eprintln!("{} {}", "Error:".red().bold(), err);

    if let Some(hint) = hint_for(err) {
        eprintln!("\n{}", hint.yellow());
    }
}

/// Returns a follow-up hint for errors the user can fix.
fn hint_for(err: &anyhow::Error) -> Option<&'static str> {
    if let Some(CliError::MissingPrefix) = err.downcast_ref::<CliError>() {
        return Some(USAGE);
    }

    let bcid_err = err.downcast_ref::<BcidError>()?;
    match bcid_err {
        BcidError::InvalidPrefixLength { .. } => {
            Some("Hint: Prefixes are exactly 4 characters, e.g. `-p USER`.")
        }
        BcidError::MachineIdOutOfRange { .. } => {
            Some("Hint: Machine IDs are 16-bit values between 0 and 65535.")
        }
        BcidError::InvalidLength { .. } => {
            Some("Hint: Identifiers are exactly 32 characters (4 prefix + 28 payload).")
        }
        _ => match bcid_err.kind() {
            ErrorKind::Format => Some(
                "Hint: Use ISO 8601 (e.g. '2023-12-25T10:30:00Z') or 'YYYY-MM-DD [HH:MM[:SS]]'.",
            ),
            ErrorKind::Decoding => {
                Some("Hint: The payload after the prefix may only contain a-z, A-Z and 0-9.")
            }
            ErrorKind::Validation => None,
        },
    }
}
