//! Command-line interface.

use anyhow::Result;
use bcid::{Bcid, Generator, MachineId, Prefix, TimeInput};
use clap::Parser;
use tracing::warn;

use crate::error::CliError;
use crate::output::{self, OutputFormat};

const DEFAULT_MACHINE_ID: i64 = 1;

/// bcid - Generate and decode 32-character prefixed identifiers.
#[derive(Debug, Parser)]
#[command(name = "bcid")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// 4-character prefix (required for generation).
    #[arg(short, long)]
    prefix: Option<String>,

    /// Machine ID (0-65535).
    #[arg(
        short,
        long,
        env = "BCID_MACHINE_ID",
        default_value_t = DEFAULT_MACHINE_ID,
        allow_negative_numbers = true
    )]
    machine_id: i64,

    /// Timestamp to embed, e.g. '2023-12-25T10:30:00' or '2023-12-25 10:30'.
    #[arg(short, long)]
    time: Option<String>,

    /// Generate a random-layout identifier instead of a chronological one.
    #[arg(short, long)]
    random: bool,

    /// Decode an existing identifier instead of generating one.
    #[arg(short, long, value_name = "IDENTIFIER")]
    decode: Option<String>,

    /// Number of identifiers to generate.
    #[arg(
        short = 'n',
        long,
        default_value_t = 1,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    count: u32,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

impl Cli {
    /// Run the selected mode and print its result to stdout.
    pub fn run(self) -> Result<()> {
        let rendered = self.execute()?;
        println!("{rendered}");
        Ok(())
    }

    fn execute(self) -> Result<String> {
        match &self.decode {
            Some(identifier) => self.decode_identifier(identifier),
            None => self.generate(),
        }
    }

    fn decode_identifier(&self, identifier: &str) -> Result<String> {
        for flag in self.ignored_in_decode_mode() {
            warn!(flag, "option is ignored when decoding");
        }

        let decoded = bcid::decode(identifier)?;
        Ok(output::render_decoded(&decoded, self.format)?)
    }

    fn generate(&self) -> Result<String> {
        let prefix = self.prefix.as_deref().ok_or(CliError::MissingPrefix)?;
        let prefix = Prefix::new(prefix)?;
        let machine_id = MachineId::try_from(self.machine_id)?;

        let timestamp = match (&self.time, self.random) {
            (Some(_), true) => {
                warn!("--time is ignored when generating random identifiers");
                None
            }
            (Some(text), false) => {
                // Parse once up front so a bad value fails before any output.
                Some(TimeInput::from(bcid::parse_timestamp(text)?))
            }
            (None, _) => None,
        };

        let mut generator = Generator::new();
        let ids = (0..self.count)
            .map(|_| generator.generate(&prefix, machine_id, timestamp.as_ref(), self.random))
            .collect::<Result<Vec<Bcid>, _>>()?;

        Ok(output::render_generated(&ids, self.format)?)
    }

    /// Flags that were set but have no effect in decode mode.
    fn ignored_in_decode_mode(&self) -> Vec<&'static str> {
        let mut ignored = Vec::new();
        if self.prefix.is_some() {
            ignored.push("--prefix");
        }
        if self.machine_id != DEFAULT_MACHINE_ID {
            ignored.push("--machine-id");
        }
        if self.time.is_some() {
            ignored.push("--time");
        }
        if self.random {
            ignored.push("--random");
        }
        if self.count != 1 {
            ignored.push("--count");
        }
        ignored
    }
}
