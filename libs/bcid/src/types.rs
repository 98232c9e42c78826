//! Identifier value types.
//!
//! A BCID is 32 characters: a 4-character prefix followed by a
//! 28-character base62 payload in either the chronological or the random
//! layout. Lengths are counted in characters, not bytes.

use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::base62;
use crate::error::BcidError;
use crate::timestamp::CompactTimestamp;

/// Number of characters in a prefix.
pub const PREFIX_LEN: usize = 4;

/// Number of characters in the encoded payload.
pub const PAYLOAD_LEN: usize = 28;

/// Number of characters in a complete identifier.
pub const BCID_LEN: usize = PREFIX_LEN + PAYLOAD_LEN;

/// Width of the zero-padded machine ID field.
pub const MACHINE_ID_WIDTH: usize = 3;

/// Years that mark a decoded timestamp as chronological.
pub const PLAUSIBLE_YEARS: RangeInclusive<u32> = 1970..=2100;

// =============================================================================
// Machine ID
// =============================================================================

/// A 16-bit identifier for the source that generated an identifier.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct MachineId(u16);

impl MachineId {
    /// Creates a machine ID from a 16-bit value.
    #[must_use]
    pub const fn new(id: u16) -> Self {
        Self(id)
    }

    /// Returns the underlying value.
    #[must_use]
    pub const fn value(&self) -> u16 {
        self.0
    }

    /// Renders the fixed-width 3-character base62 field.
    pub(crate) fn encode_field(&self) -> Result<String, BcidError> {
        base62::encode_padded(u64::from(self.0), MACHINE_ID_WIDTH)
    }
}

impl fmt::Display for MachineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u16> for MachineId {
    fn from(id: u16) -> Self {
        Self(id)
    }
}

impl From<MachineId> for u16 {
    fn from(id: MachineId) -> Self {
        id.0
    }
}

impl TryFrom<i64> for MachineId {
    type Error = BcidError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        u16::try_from(value)
            .map(Self)
            .map_err(|_| BcidError::MachineIdOutOfRange { value })
    }
}

impl TryFrom<u64> for MachineId {
    type Error = BcidError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        u16::try_from(value)
            .map(Self)
            .map_err(|_| BcidError::MachineIdOutOfRange {
                value: i64::try_from(value).unwrap_or(i64::MAX),
            })
    }
}

// =============================================================================
// Prefix
// =============================================================================

/// The 4-character caller-chosen head of an identifier.
///
/// The content is opaque; only its length is checked.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Prefix(String);

impl Prefix {
    /// Validates and wraps a prefix.
    pub fn new(prefix: &str) -> Result<Self, BcidError> {
        let actual = prefix.chars().count();
        if actual != PREFIX_LEN {
            return Err(BcidError::InvalidPrefixLength { actual });
        }
        Ok(Self(prefix.to_string()))
    }

    /// Returns the prefix text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Prefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Prefix {
    type Err = BcidError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

// =============================================================================
// Layout
// =============================================================================

/// Which of the two payload layouts an identifier uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Layout {
    /// Timestamp, machine ID, random value, random padding.
    Chronological,
    /// Fixed-width machine ID followed by random symbols.
    Random,
}

impl Layout {
    /// Classifies a payload by the year of its leading timestamp numeral.
    ///
    /// The layouts carry no tag, so this is a heuristic: a year inside
    /// [`PLAUSIBLE_YEARS`] means chronological.
    #[must_use]
    pub fn classify(timestamp: CompactTimestamp) -> Self {
        if PLAUSIBLE_YEARS.contains(&timestamp.year()) {
            Layout::Chronological
        } else {
            Layout::Random
        }
    }

    /// Returns the lower-case layout name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Layout::Chronological => "chronological",
            Layout::Random => "random",
        }
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Identifier
// =============================================================================

/// A 32-character identifier.
///
/// Holding a `Bcid` guarantees the length only; the payload is checked when
/// it is decoded.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Bcid(String);

impl Bcid {
    /// Parses an identifier, checking its length.
    pub fn parse(s: &str) -> Result<Self, BcidError> {
        let actual = s.chars().count();
        if actual != BCID_LEN {
            return Err(BcidError::InvalidLength { actual });
        }
        Ok(Self(s.to_string()))
    }

    pub(crate) fn from_parts(prefix: &Prefix, payload: &str) -> Self {
        debug_assert_eq!(payload.len(), PAYLOAD_LEN);
        let mut s = String::with_capacity(prefix.0.len() + payload.len());
        s.push_str(&prefix.0);
        s.push_str(payload);
        Self(s)
    }

    /// Returns the first 4 characters.
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.0[..self.payload_start()]
    }

    /// Returns the 28 characters after the prefix.
    #[must_use]
    pub fn payload(&self) -> &str {
        &self.0[self.payload_start()..]
    }

    /// Returns the identifier text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the identifier, returning its text.
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }

    fn payload_start(&self) -> usize {
        self.0
            .char_indices()
            .nth(PREFIX_LEN)
            .map_or(self.0.len(), |(idx, _)| idx)
    }
}

impl fmt::Display for Bcid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Bcid {
    type Err = BcidError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for Bcid {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<Bcid> for String {
    fn from(id: Bcid) -> Self {
        id.0
    }
}

impl Serialize for Bcid {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Bcid {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

// =============================================================================
// Tests
// =============================================================================
