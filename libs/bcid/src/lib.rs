//! # bcid
//!
//! Fixed-length, prefixed, base62 identifiers.
//!
//! ## ID Format
//!
//! A BCID is exactly 32 characters: a caller-chosen 4-character prefix
//! followed by a 28-character payload in one of two layouts.
//!
//! - **Chronological**: base62 `YYYYMMDDHHMMSSff` timestamp (UTC), a
//!   3-character machine ID, a base62 16-bit random value, then random
//!   padding. Identifiers with the same prefix sort by creation time.
//! - **Random**: a 3-character machine ID followed by 25 random symbols.
//!
//! Examples:
//! - `TESTjqEmXg1pkaabnxcdodododododod` (chronological)
//! - `TESTaab9xQ3mZkLp0wYe7RtUvBn2Hc4s` (random)
//!
//! The layouts carry no tag. The decoder reads the leading timestamp
//! numeral and treats the identifier as chronological when its year falls
//! in 1970..=2100.
//!
//! The chronological machine ID is always 3 characters wide. Generators
//! that write it as a variable-length numeral produce identifiers whose
//! machine ID and random value do not decode field-exactly here.
//!
//! ## Alphabet
//!
//! `a-z`, `A-Z`, `0-9`, in that order; `a` is the zero digit.

pub mod base62;
mod decoder;
mod error;
mod generator;
mod macros;
mod timestamp;
mod types;

pub use decoder::Decoded;
pub use error::{BcidError, ErrorKind};
pub use generator::Generator;
pub use timestamp::{
    parse_timestamp, Clock, CompactTimestamp, FixedClock, SystemClock, TimeInput, MAX_TIMESTAMP,
};
pub use types::*;

#[doc(hidden)]
pub use serde;

/// Generates an identifier with the system clock and thread RNG.
///
/// `timestamp` is ignored, with a warning, when `random` is set.
///
/// # Errors
///
/// Fails on a prefix that is not 4 characters, a machine ID outside
/// `0..=65535`, or timestamp text that does not parse.
pub fn generate(
    prefix: &str,
    machine_id: i64,
    timestamp: Option<TimeInput>,
    random: bool,
) -> Result<Bcid, BcidError> {
    let prefix = Prefix::new(prefix)?;
    let machine_id = MachineId::try_from(machine_id)?;
    Generator::new().generate(&prefix, machine_id, timestamp.as_ref(), random)
}

/// Generates a random-layout identifier with the thread RNG.
///
/// # Errors
///
/// Fails on a prefix that is not 4 characters or a machine ID outside
/// `0..=65535`.
pub fn generate_random(prefix: &str, machine_id: i64) -> Result<Bcid, BcidError> {
    generate(prefix, machine_id, None, true)
}

/// Decodes an identifier into its fields.
///
/// # Errors
///
/// Fails on an identifier that is not 32 characters, or whose scanned
/// payload characters fall outside the alphabet. Any other payload decodes;
/// see [`Decoded::valid_machine_id`] for machine IDs past 16 bits.
pub fn decode(identifier: &str) -> Result<Decoded, BcidError> {
    Bcid::parse(identifier)?.decode()
}
