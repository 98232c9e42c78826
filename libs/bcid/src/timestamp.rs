//! Compact 16-digit timestamps and instant resolution.
//!
//! A compact timestamp is the integer value of the decimal digits
//! `YYYYMMDDHHMMSSff` in UTC, where `ff` is hundredths of a second.

use std::fmt;

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, NaiveDateTime, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::error::BcidError;

/// Largest value a 16-digit timestamp can hold.
pub const MAX_TIMESTAMP: u64 = 9_999_999_999_999_999;

/// Number of decimal digits in a compact timestamp.
pub const TIMESTAMP_DIGITS: usize = 16;

const YEAR: u64 = 1_000_000_000_000;
const MONTH: u64 = 10_000_000_000;
const DAY: u64 = 100_000_000;
const HOUR: u64 = 1_000_000;
const MINUTE: u64 = 10_000;
const SECOND: u64 = 100;

/// Naive ISO-8601 forms, tried after RFC 3339.
const ISO_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
];

/// ISO-8601 offset forms that RFC 3339 rejects: compact `+hhmm` offsets
/// and times without seconds.
const ISO_OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%#z",
    "%Y-%m-%dT%H:%M:%S%.f%#z",
    "%Y-%m-%dT%H:%M%:z",
    "%Y-%m-%dT%H:%M%#z",
];

/// Space-separated forms.
const PLAIN_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"];

const DATE_FORMAT: &str = "%Y-%m-%d";

/// A `YYYYMMDDHHMMSSff` timestamp stored as its integer value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompactTimestamp(u64);

impl CompactTimestamp {
    /// Wraps a raw value, rejecting anything above 16 digits.
    #[must_use]
    pub const fn new(value: u64) -> Option<Self> {
        if value > MAX_TIMESTAMP {
            None
        } else {
            Some(Self(value))
        }
    }

    /// Formats a UTC instant, truncating to hundredths of a second.
    pub fn from_datetime(dt: &DateTime<Utc>) -> Result<Self, BcidError> {
        let year = dt.year();
        let Ok(year_digits) = u64::try_from(year) else {
            return Err(BcidError::TimestampOutOfRange { year });
        };
        if year_digits > 9999 {
            return Err(BcidError::TimestampOutOfRange { year });
        }

        // Leap seconds report nanoseconds past 1e9; clamp into the same second.
        let hundredths = u64::from(dt.nanosecond() / 10_000_000).min(99);

        Ok(Self(
            year_digits * YEAR
                + u64::from(dt.month()) * MONTH
                + u64::from(dt.day()) * DAY
                + u64::from(dt.hour()) * HOUR
                + u64::from(dt.minute()) * MINUTE
                + u64::from(dt.second()) * SECOND
                + hundredths,
        ))
    }

    /// Returns the raw integer value.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }

    /// Returns the first four of the sixteen zero-padded digits.
    #[must_use]
    pub const fn year(self) -> u32 {
        (self.0 / YEAR) as u32
    }

    /// Returns the value as exactly 16 zero-padded digits.
    #[must_use]
    pub fn digits(self) -> String {
        format!("{:0width$}", self.0, width = TIMESTAMP_DIGITS)
    }

    /// Converts back to an instant, if the digits form a valid date and time.
    #[must_use]
    pub fn to_datetime(self) -> Option<DateTime<Utc>> {
        let v = self.0;
        let field = |unit: u64| ((v / unit) % 100) as u32;

        NaiveDate::from_ymd_opt(self.year() as i32, field(MONTH), field(DAY))?
            .and_hms_milli_opt(
                field(HOUR),
                field(MINUTE),
                field(SECOND),
                (v % SECOND) as u32 * 10,
            )
            .map(|naive| naive.and_utc())
    }
}

impl fmt::Display for CompactTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:0width$}", self.0, width = TIMESTAMP_DIGITS)
    }
}

/// A caller-supplied point in time: a structured instant or text to parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimeInput {
    /// An instant, already in UTC.
    Instant(DateTime<Utc>),
    /// Text in one of the accepted formats.
    Text(String),
}

impl TimeInput {
    /// Resolves the input to a UTC instant.
    pub fn resolve(&self) -> Result<DateTime<Utc>, BcidError> {
        match self {
            TimeInput::Instant(dt) => Ok(*dt),
            TimeInput::Text(text) => parse_timestamp(text),
        }
    }
}

impl From<DateTime<Utc>> for TimeInput {
    fn from(dt: DateTime<Utc>) -> Self {
        TimeInput::Instant(dt)
    }
}

impl From<DateTime<FixedOffset>> for TimeInput {
    fn from(dt: DateTime<FixedOffset>) -> Self {
        TimeInput::Instant(dt.with_timezone(&Utc))
    }
}

/// Naive values are taken as UTC.
impl From<NaiveDateTime> for TimeInput {
    fn from(naive: NaiveDateTime) -> Self {
        TimeInput::Instant(naive.and_utc())
    }
}

impl From<&str> for TimeInput {
    fn from(text: &str) -> Self {
        TimeInput::Text(text.to_string())
    }
}

impl From<String> for TimeInput {
    fn from(text: String) -> Self {
        TimeInput::Text(text)
    }
}

/// Parses timestamp text into a UTC instant.
///
/// Text containing `T` is read as ISO-8601 (with `Z`, an offset, or no
/// offset). Other text must be `date time`, `date hour:minute`, or a bare
/// `date`. Values without an offset are UTC.
pub fn parse_timestamp(input: &str) -> Result<DateTime<Utc>, BcidError> {
    let text = input.trim();

    let parsed = if text.contains('T') {
        parse_iso(text)
    } else {
        parse_plain(text)
    };

    parsed.ok_or_else(|| BcidError::InvalidTimestamp {
        input: input.to_string(),
    })
}

fn parse_iso(text: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc));
    }

    ISO_OFFSET_FORMATS
        .iter()
        .find_map(|fmt| DateTime::parse_from_str(text, fmt).ok())
        .map(|dt| dt.with_timezone(&Utc))
        .or_else(|| {
            ISO_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
                .map(|naive| naive.and_utc())
        })
}

fn parse_plain(text: &str) -> Option<DateTime<Utc>> {
    PLAIN_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(text, DATE_FORMAT)
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
        .map(|naive| naive.and_utc())
}

/// Source of the current time for chronological identifiers.
pub trait Clock {
    /// Returns the current instant in UTC.
    fn now(&self) -> DateTime<Utc>;
}

/// The system wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock that always reports the same instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
