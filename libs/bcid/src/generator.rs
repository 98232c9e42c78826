//! Identifier generation.
//!
//! Chronological payload: base62 timestamp, 3-character machine ID field,
//! base62 16-bit random value, then each of 21 random bytes as its own
//! base62 numeral, all cut to 28 characters.
//!
//! Random payload: 3-character machine ID field followed by 25 symbols
//! picked as `ALPHABET[byte % 62]`.

use chrono::{DateTime, Utc};
use rand::rngs::ThreadRng;
use rand::{Rng, RngCore};
use tracing::{debug, warn};

use crate::base62;
use crate::error::BcidError;
use crate::timestamp::{Clock, CompactTimestamp, SystemClock, TimeInput};
use crate::types::{Bcid, Layout, MachineId, Prefix, MACHINE_ID_WIDTH, PAYLOAD_LEN};

/// Random bytes appended after the chronological fields.
const PADDING_BYTES: usize = 21;

/// Random symbols after the machine ID field in the random layout.
const RANDOM_SYMBOLS: usize = PAYLOAD_LEN - MACHINE_ID_WIDTH;

/// Builds identifiers from an injected clock and random source.
///
/// [`Generator::new`] uses the system clock and the thread-local RNG; tests
/// pass a [`FixedClock`](crate::FixedClock) and a seeded RNG through
/// [`Generator::with_sources`].
#[derive(Debug)]
pub struct Generator<C = SystemClock, R = ThreadRng> {
    clock: C,
    rng: R,
}

impl Generator {
    /// Creates a generator over the system clock and thread RNG.
    #[must_use]
    pub fn new() -> Self {
        Self {
            clock: SystemClock,
            rng: rand::rng(),
        }
    }
}

impl Default for Generator {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock, R: RngCore> Generator<C, R> {
    /// Creates a generator over the given clock and random source.
    pub fn with_sources(clock: C, rng: R) -> Self {
        Self { clock, rng }
    }

    /// Generates an identifier in the requested layout.
    ///
    /// In random mode a supplied timestamp is ignored with a warning.
    pub fn generate(
        &mut self,
        prefix: &Prefix,
        machine_id: MachineId,
        timestamp: Option<&TimeInput>,
        random: bool,
    ) -> Result<Bcid, BcidError> {
        if random {
            if timestamp.is_some() {
                warn!("timestamp is ignored when generating random identifiers");
            }
            self.random(prefix, machine_id)
        } else {
            self.chronological(prefix, machine_id, timestamp)
        }
    }

    /// Generates a chronological identifier at `timestamp`, or now.
    pub fn chronological(
        &mut self,
        prefix: &Prefix,
        machine_id: MachineId,
        timestamp: Option<&TimeInput>,
    ) -> Result<Bcid, BcidError> {
        let at = match timestamp {
            Some(input) => input.resolve()?,
            None => self.clock.now(),
        };
        let payload = self.chronological_payload(machine_id, &at)?;

        debug!(
            prefix = %prefix,
            machine_id = machine_id.value(),
            layout = %Layout::Chronological,
            at = %at,
            "generated identifier"
        );
        Ok(Bcid::from_parts(prefix, &payload))
    }

    /// Generates a random identifier.
    pub fn random(&mut self, prefix: &Prefix, machine_id: MachineId) -> Result<Bcid, BcidError> {
        let mut payload = machine_id.encode_field()?;

        let mut bytes = [0u8; RANDOM_SYMBOLS];
        self.rng.fill_bytes(&mut bytes);
        payload.extend(bytes.iter().map(|&b| base62::symbol_for_byte(b)));

        debug!(
            prefix = %prefix,
            machine_id = machine_id.value(),
            layout = %Layout::Random,
            "generated identifier"
        );
        Ok(Bcid::from_parts(prefix, &payload))
    }

    fn chronological_payload(
        &mut self,
        machine_id: MachineId,
        at: &DateTime<Utc>,
    ) -> Result<String, BcidError> {
        let timestamp = CompactTimestamp::from_datetime(at)?;
        let random_value: u16 = self.rng.random();
        let mut padding = [0u8; PADDING_BYTES];
        self.rng.fill_bytes(&mut padding);

        let mut payload = base62::encode(timestamp.value());
        payload.push_str(&machine_id.encode_field()?);
        payload.push_str(&base62::encode(u64::from(random_value)));
        payload.extend(padding.iter().map(|&b| base62::encode(u64::from(b))));

        // Years 0..=9999 keep the timestamp within 9 characters, so the cut
        // only ever lands in the padding.
        payload.truncate(PAYLOAD_LEN);
        Ok(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base62::ALPHABET;
    use crate::timestamp::FixedClock;
    use chrono::TimeZone;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// Fills every byte with the same value.
    struct ConstantRng(u8);

    impl RngCore for ConstantRng {
        fn next_u32(&mut self) -> u32 {
            u32::from_ne_bytes([self.0; 4])
        }

        fn next_u64(&mut self) -> u64 {
            u64::from_ne_bytes([self.0; 8])
        }

        fn fill_bytes(&mut self, dst: &mut [u8]) {
            dst.fill(self.0);
        }
    }

    fn christmas() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2023, 12, 25, 10, 30, 0).unwrap()
    }

    fn prefix() -> Prefix {
        Prefix::new("TEST").unwrap()
    }

    fn seeded(seed: u64) -> Generator<FixedClock, StdRng> {
        Generator::with_sources(FixedClock(christmas()), StdRng::seed_from_u64(seed))
    }

    #[test]
    fn test_chronological_layout() {
        let mut generator = seeded(7);
        let id = generator
            .chronological(&prefix(), MachineId::new(1), None)
            .unwrap();

        assert_eq!(id.as_str().len(), 32);
        assert!(id.as_str().starts_with("TEST"));

        let timestamp = base62::encode(2023122510300000);
        assert_eq!(timestamp.len(), 9);
        assert_eq!(&id.payload()[..9], timestamp);
        assert_eq!(&id.payload()[9..12], "aab");
    }

    #[test]
    fn test_chronological_prefers_supplied_timestamp() {
        let mut generator = seeded(7);
        let input = TimeInput::from("1999-01-01");
        let id = generator
            .chronological(&prefix(), MachineId::new(1), Some(&input))
            .unwrap();
        assert_eq!(
            &id.payload()[..9],
            base62::encode(1999010100000000)
        );
    }

    #[test]
    fn test_chronological_padding_encodes_each_byte() {
        // 0xC8 == 200 encodes as "do", u16 0xC8C8 == 51400 as "nxc".
        let mut generator = Generator::with_sources(FixedClock(christmas()), ConstantRng(200));
        let id = generator
            .chronological(&prefix(), MachineId::new(0), None)
            .unwrap();

        assert_eq!(base62::encode(200), "do");
        assert_eq!(base62::encode(51400), "nxc");
        let expected = format!(
            "{}aaa{}{}",
            base62::encode(2023122510300000),
            "nxc",
            "do".repeat(PADDING_BYTES)
        );
        assert_eq!(id.payload(), &expected[..PAYLOAD_LEN]);
    }

    #[test]
    fn test_same_instant_shares_leading_fields() {
        let a = seeded(1)
            .chronological(&prefix(), MachineId::new(42), None)
            .unwrap();
        let b = seeded(2)
            .chronological(&prefix(), MachineId::new(42), None)
            .unwrap();

        assert_eq!(&a.as_str()[..16], &b.as_str()[..16]);
        assert_ne!(a, b);
    }

    #[test]
    fn test_random_layout() {
        let mut generator = seeded(3);
        let id = generator.random(&prefix(), MachineId::new(1)).unwrap();

        assert_eq!(id.as_str().len(), 32);
        assert_eq!(&id.as_str()[4..7], "aab");
        assert!(id
            .payload()
            .bytes()
            .all(|b| ALPHABET.contains(&b)));
    }

    #[test]
    fn test_random_layout_uses_byte_modulo() {
        // 61 -> '9', 62 -> 'a', 255 % 62 == 7 -> 'h'
        let id = Generator::with_sources(SystemClock, ConstantRng(61))
            .random(&prefix(), MachineId::new(0))
            .unwrap();
        assert_eq!(id.payload(), format!("aaa{}", "9".repeat(25)));

        let id = Generator::with_sources(SystemClock, ConstantRng(62))
            .random(&prefix(), MachineId::new(0))
            .unwrap();
        assert_eq!(id.payload(), "a".repeat(28));

        let id = Generator::with_sources(SystemClock, ConstantRng(255))
            .random(&prefix(), MachineId::new(0))
            .unwrap();
        assert_eq!(id.payload(), format!("aaa{}", "h".repeat(25)));
    }

    #[test]
    fn test_random_mode_ignores_timestamp() {
        let input = TimeInput::from("not a date at all");
        let id = seeded(5)
            .generate(&prefix(), MachineId::new(9), Some(&input), true)
            .unwrap();
        assert_eq!(&id.as_str()[4..7], "aaj");
    }

    #[test]
    fn test_chronological_rejects_bad_text() {
        let input = TimeInput::from("not a date at all");
        let err = seeded(5)
            .generate(&prefix(), MachineId::new(9), Some(&input), false)
            .unwrap_err();
        assert!(err.is_format());
    }

    #[test]
    fn test_system_generator_differs_between_calls() {
        let mut generator = Generator::new();
        let a = generator.random(&prefix(), MachineId::new(5)).unwrap();
        let b = generator.random(&prefix(), MachineId::new(5)).unwrap();
        assert_ne!(a, b);
    }
}
