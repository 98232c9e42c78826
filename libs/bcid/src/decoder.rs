//! Identifier decoding.
//!
//! The payload carries no layout tag and no field delimiters. The decoder
//! reads the longest leading numeral that fits in 16 decimal digits and
//! classifies the identifier by that value's year; see [`Layout::classify`].

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::base62;
use crate::error::BcidError;
use crate::timestamp::{CompactTimestamp, MAX_TIMESTAMP};
use crate::types::{Bcid, Layout, MachineId, MACHINE_ID_WIDTH};

/// Ceiling for 16-bit numeric fields.
const MAX_RANDOM_VALUE: u64 = u16::MAX as u64;

/// Fields recovered from an identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Decoded {
    /// A timestamped identifier. Trailing random padding is not recoverable.
    Chronological {
        prefix: String,
        timestamp: CompactTimestamp,
        machine_id: u32,
        random_value: u16,
    },
    /// A random identifier.
    Random {
        prefix: String,
        machine_id: u32,
        random_part: String,
    },
}

impl Decoded {
    /// Returns the layout the identifier was classified as.
    #[must_use]
    pub fn layout(&self) -> Layout {
        match self {
            Decoded::Chronological { .. } => Layout::Chronological,
            Decoded::Random { .. } => Layout::Random,
        }
    }

    /// Returns the 4-character prefix.
    #[must_use]
    pub fn prefix(&self) -> &str {
        match self {
            Decoded::Chronological { prefix, .. } | Decoded::Random { prefix, .. } => prefix,
        }
    }

    /// Returns the raw machine ID field value.
    ///
    /// Identifiers this crate generates always carry a 16-bit value; other
    /// payloads may decode up to 238327.
    #[must_use]
    pub fn machine_id(&self) -> u32 {
        match self {
            Decoded::Chronological { machine_id, .. } | Decoded::Random { machine_id, .. } => {
                *machine_id
            }
        }
    }

    /// Returns the machine ID if it is in the 16-bit range.
    #[must_use]
    pub fn valid_machine_id(&self) -> Option<MachineId> {
        u16::try_from(self.machine_id()).ok().map(MachineId::new)
    }

    /// Returns the timestamp of a chronological identifier.
    #[must_use]
    pub fn timestamp(&self) -> Option<CompactTimestamp> {
        match self {
            Decoded::Chronological { timestamp, .. } => Some(*timestamp),
            Decoded::Random { .. } => None,
        }
    }
}

impl Bcid {
    /// Decodes the payload into its fields.
    pub fn decode(&self) -> Result<Decoded, BcidError> {
        let prefix = self.prefix().to_string();
        let encoded = self.payload();

        let (value, consumed) = base62::longest_prefix_within(encoded, MAX_TIMESTAMP)?;
        let timestamp = CompactTimestamp::new(value).ok_or(BcidError::Overflow)?;
        let layout = Layout::classify(timestamp);

        debug!(
            identifier = %self,
            year = timestamp.year(),
            layout = %layout,
            "classified identifier"
        );

        match layout {
            // Scanned characters are ASCII, so `consumed` is a byte offset.
            Layout::Chronological => {
                decode_chronological(prefix, timestamp, &encoded[consumed..])
            }
            Layout::Random => decode_random(prefix, encoded),
        }
    }
}

fn decode_chronological(
    prefix: String,
    timestamp: CompactTimestamp,
    rest: &str,
) -> Result<Decoded, BcidError> {
    let (machine_id, rest) = machine_id_field(rest)?;

    let (random_value, _) = base62::longest_prefix_within(rest, MAX_RANDOM_VALUE)?;
    let random_value = u16::try_from(random_value).map_err(|_| BcidError::Overflow)?;

    Ok(Decoded::Chronological {
        prefix,
        timestamp,
        machine_id,
        random_value,
    })
}

fn decode_random(prefix: String, encoded: &str) -> Result<Decoded, BcidError> {
    let (machine_id, random_part) = machine_id_field(encoded)?;

    Ok(Decoded::Random {
        prefix,
        machine_id,
        random_part: random_part.to_string(),
    })
}

/// Splits the fixed-width machine ID field off the front of `s`.
///
/// The raw field value is returned unchecked: three symbols reach 238327,
/// past the 16-bit range the generator writes. A short field decodes the
/// symbols that remain, so an empty one reads as zero.
fn machine_id_field(s: &str) -> Result<(u32, &str), BcidError> {
    let end = s
        .char_indices()
        .nth(MACHINE_ID_WIDTH)
        .map_or(s.len(), |(idx, _)| idx);

    let value = base62::decode(&s[..end])?;
    let machine_id = u32::try_from(value).map_err(|_| BcidError::Overflow)?;
    Ok((machine_id, &s[end..]))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(s: &str) -> Result<Decoded, BcidError> {
        Bcid::parse(s)?.decode()
    }

    #[test]
    fn test_decode_chronological_fields() {
        // timestamp 2023122510300000, machine "aab", random "rdb" (65535)
        let id = format!("TEST{}aab{}", "jqEmXg1pk", "rdb9999999999999");
        let decoded = decode(&id).unwrap();

        assert_eq!(
            decoded,
            Decoded::Chronological {
                prefix: "TEST".to_string(),
                timestamp: CompactTimestamp::new(2023122510300000).unwrap(),
                machine_id: 1,
                random_value: 65535,
            }
        );
        assert_eq!(decoded.layout(), Layout::Chronological);
        assert_eq!(decoded.valid_machine_id(), Some(MachineId::new(1)));
    }

    #[test]
    fn test_decode_random_value_absorbs_small_padding() {
        // "b" followed by "a" digits stays under the ceiling until 4 digits.
        let id = format!("TEST{}rdb{}", "jqEmXg1pk", "baaa999999999999");
        let Decoded::Chronological {
            machine_id,
            random_value,
            ..
        } = decode(&id).unwrap()
        else {
            panic!("expected chronological layout");
        };
        assert_eq!(machine_id, 65535);
        assert_eq!(random_value, 62 * 62);
    }

    #[test]
    fn test_decode_random_fields() {
        let id = format!("TEST{}", "aab9999999999999999999999999");
        let decoded = decode(&id).unwrap();

        assert_eq!(
            decoded,
            Decoded::Random {
                prefix: "TEST".to_string(),
                machine_id: 1,
                random_part: "9".repeat(25),
            }
        );
        assert_eq!(decoded.timestamp(), None);
    }

    #[test]
    fn test_decode_year_outside_window_is_random() {
        // 1969123123595900 encodes as "jbjGcTuhc"
        let id = format!("TEST{}", "jbjGcTuhcaab9999999999999999");
        let decoded = decode(&id).unwrap();
        assert_eq!(decoded.layout(), Layout::Random);
        assert_eq!(
            u64::from(decoded.machine_id()),
            base62::decode("jbj").unwrap()
        );
    }

    #[test]
    fn test_decode_rejects_wrong_length() {
        assert_eq!(
            decode("TESTabc").unwrap_err(),
            BcidError::InvalidLength { actual: 7 }
        );
    }

    #[test]
    fn test_decode_reports_invalid_character() {
        let id = format!("TEST{}", "jqEmX-1pkaab9999999999999999");
        assert_eq!(
            decode(&id).unwrap_err(),
            BcidError::InvalidCharacter { character: '-' }
        );
    }

    #[test]
    fn test_decode_random_machine_field_above_16_bits() {
        // "999" is 238327; the timestamp scan reads year 218, so random.
        let id = format!("TEST{}", "9".repeat(28));
        let decoded = decode(&id).unwrap();
        assert_eq!(decoded.layout(), Layout::Random);
        assert_eq!(decoded.machine_id(), 238327);
        assert_eq!(decoded.valid_machine_id(), None);
    }

    #[test]
    fn test_decode_arbitrary_payloads() {
        let decoded = decode("TESTsomeRandomLookingPayload1234").unwrap();
        assert_eq!(decoded.layout(), Layout::Random);
        assert_eq!(decoded.machine_id(), 70072);

        let decoded = decode("TESTZZZZZZZZZZZZZZZZZZZZZZZZZZZZ").unwrap();
        assert_eq!(decoded.machine_id(), 199257);
    }

    #[test]
    fn test_decode_empty_machine_field_reads_zero() {
        // Leading zero digits let the timestamp scan swallow the payload.
        let id = format!("TEST{}{}", "a".repeat(19), "jqEmXg1pk");
        assert_eq!(
            decode(&id).unwrap(),
            Decoded::Chronological {
                prefix: "TEST".to_string(),
                timestamp: CompactTimestamp::new(2023122510300000).unwrap(),
                machine_id: 0,
                random_value: 0,
            }
        );
    }

    #[test]
    fn test_decode_short_machine_field() {
        // The timestamp scan takes 27 symbols; the last one is all that is
        // left for the machine field.
        let id = format!("TEST{}{}", "a".repeat(18), "jqEmXg1pkb");
        let decoded = decode(&id).unwrap();
        assert_eq!(decoded.machine_id(), 1);
        assert_eq!(decoded.timestamp().map(CompactTimestamp::value), Some(2023122510300000));
    }

    #[test]
    fn test_decoded_json_is_tagged() {
        let decoded = Decoded::Random {
            prefix: "TEST".to_string(),
            machine_id: 1,
            random_part: "abc".to_string(),
        };
        let json = serde_json::to_value(&decoded).unwrap();
        assert_eq!(json["type"], "random");
        assert_eq!(json["machine_id"], 1);

        let parsed: Decoded = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, decoded);
    }
}
