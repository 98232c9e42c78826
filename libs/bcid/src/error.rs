//! Error types for identifier generation and decoding.

use thiserror::Error;

/// Broad category of a [`BcidError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// An argument or identifier violates a length or range constraint.
    Validation,
    /// Timestamp text or value cannot be represented.
    Format,
    /// The payload contains characters or values that do not decode.
    Decoding,
}

/// Errors that can occur when generating or decoding identifiers.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BcidError {
    /// The prefix is not exactly 4 characters.
    #[error("prefix must be exactly 4 characters long, got {actual}")]
    InvalidPrefixLength { actual: usize },

    /// The machine ID is outside `0..=65535`.
    #[error("machine ID must be between 0 and 65535, got {value}")]
    MachineIdOutOfRange { value: i64 },

    /// The identifier is not exactly 32 characters.
    #[error("identifier must be exactly 32 characters long, got {actual}")]
    InvalidLength { actual: usize },

    /// A typed identifier carries a different prefix.
    #[error("invalid identifier prefix: expected '{expected}', got '{actual}'")]
    PrefixMismatch {
        expected: &'static str,
        actual: String,
    },

    /// A numeral does not fit its fixed-width field.
    #[error("encoded value '{encoded}' does not fit in {width} characters")]
    FieldTooWide { encoded: String, width: usize },

    /// Timestamp text matched none of the accepted formats.
    #[error("invalid date format: '{input}'. Use ISO 8601 format (e.g., '2023-12-25T10:30:00')")]
    InvalidTimestamp { input: String },

    /// The instant has a year that cannot be written as 4 digits.
    #[error("timestamp year {year} is outside 0..=9999")]
    TimestampOutOfRange { year: i32 },

    /// A character outside the base62 alphabet.
    #[error("invalid base62 character '{character}'")]
    InvalidCharacter { character: char },

    /// A base62 numeral is too large for 64 bits.
    #[error("base62 value overflows 64 bits")]
    Overflow,
}

impl BcidError {
    /// Returns the category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            BcidError::InvalidPrefixLength { .. }
            | BcidError::MachineIdOutOfRange { .. }
            | BcidError::InvalidLength { .. }
            | BcidError::PrefixMismatch { .. }
            | BcidError::FieldTooWide { .. } => ErrorKind::Validation,
            BcidError::InvalidTimestamp { .. } | BcidError::TimestampOutOfRange { .. } => {
                ErrorKind::Format
            }
            BcidError::InvalidCharacter { .. } | BcidError::Overflow => ErrorKind::Decoding,
        }
    }

    /// Returns true if this error is a length or range violation.
    pub fn is_validation(&self) -> bool {
        self.kind() == ErrorKind::Validation
    }

    /// Returns true if this error comes from timestamp handling.
    pub fn is_format(&self) -> bool {
        self.kind() == ErrorKind::Format
    }

    /// Returns true if this error comes from decoding payload characters.
    pub fn is_decoding(&self) -> bool {
        self.kind() == ErrorKind::Decoding
    }
}
