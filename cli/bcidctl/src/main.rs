//! bcidctl (bcid) - CLI for generating and decoding BCIDs.
//!
//! Generate mode prints new identifiers; decode mode prints the fields of
//! an existing one. Conflicting flags produce warnings, not failures.

use anyhow::Result;
use clap::Parser;

mod commands;
mod config;
mod error;
mod logging;
mod output;

use commands::Cli;
use config::Config;

fn main() -> Result<()> {
    let config = Config::from_env();
    logging::init(&config);

    let cli = Cli::parse();

    if let Err(e) = cli.run() {
        error::print_error(&e);
        std::process::exit(1);
    }

    Ok(())
}
