//! Configuration for the CLI.
//!
//! Only logging is configured here; the machine ID default is read by clap
//! from `BCID_MACHINE_ID`.

/// Log level used when neither `RUST_LOG` nor `BCID_LOG_LEVEL` is set.
const DEFAULT_LOG_LEVEL: &str = "warn";

/// CLI configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let log_level = lookup("BCID_LOG_LEVEL")
            .filter(|level| !level.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string());

        Self { log_level }
    }
}
