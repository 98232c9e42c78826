//! Base62 numerals over the identifier alphabet.
//!
//! The alphabet order is part of the wire format: `a` is the zero digit,
//! `9` is the digit 61. Numerals are written most-significant digit first
//! and carry no leading zero digits, except for the value 0 itself.

use crate::error::BcidError;

/// The 62 digit symbols, in digit-value order.
pub const ALPHABET: &[u8; 62] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// The zero digit.
pub const ZERO: char = ALPHABET[0] as char;

const BASE: u64 = 62;

const INVALID: u8 = u8::MAX;

/// ASCII byte to digit value, `INVALID` for non-alphabet bytes.
const DIGITS: [u8; 128] = {
    let mut table = [INVALID; 128];
    let mut i = 0;
    while i < ALPHABET.len() {
        table[ALPHABET[i] as usize] = i as u8;
        i += 1;
    }
    table
};

/// Returns the digit value of a single alphabet symbol.
pub fn digit_value(c: char) -> Result<u64, BcidError> {
    if c.is_ascii() {
        let digit = DIGITS[c as usize];
        if digit != INVALID {
            return Ok(u64::from(digit));
        }
    }
    Err(BcidError::InvalidCharacter { character: c })
}

/// Maps a raw byte to a symbol by `byte % 62`.
///
/// 256 is not a multiple of 62, so the first 8 symbols are slightly more
/// likely than the rest.
pub(crate) fn symbol_for_byte(byte: u8) -> char {
    ALPHABET[usize::from(byte) % ALPHABET.len()] as char
}

/// Encodes a number as a base62 numeral.
#[must_use]
pub fn encode(mut n: u64) -> String {
    if n == 0 {
        return ZERO.to_string();
    }

    // 62^11 > 2^64, so 11 digits always suffice.
    let mut buf = [0u8; 11];
    let mut i = buf.len();
    while n > 0 {
        i -= 1;
        buf[i] = ALPHABET[(n % BASE) as usize];
        n /= BASE;
    }
    buf[i..].iter().map(|&b| b as char).collect()
}

/// Encodes a number left-padded with the zero digit to exactly `width`
/// characters.
pub fn encode_padded(n: u64, width: usize) -> Result<String, BcidError> {
    let encoded = encode(n);
    if encoded.len() > width {
        return Err(BcidError::FieldTooWide { encoded, width });
    }
    let mut padded: String = std::iter::repeat(ZERO)
        .take(width - encoded.len())
        .collect();
    padded.push_str(&encoded);
    Ok(padded)
}

/// Decodes a base62 numeral.
pub fn decode(s: &str) -> Result<u64, BcidError> {
    s.chars().try_fold(0u64, |num, c| {
        let digit = digit_value(c)?;
        num.checked_mul(BASE)
            .and_then(|n| n.checked_add(digit))
            .ok_or(BcidError::Overflow)
    })
}

/// Scans the longest leading numeral of `s` whose value stays within
/// `ceiling`.
///
/// Characters are taken one at a time; the scan stops before the first
/// character that would push the value past `ceiling`. Returns the value and
/// the number of characters consumed. Every character examined must be an
/// alphabet symbol, including the one that ends the scan.
pub fn longest_prefix_within(s: &str, ceiling: u64) -> Result<(u64, usize), BcidError> {
    let mut value = 0u64;
    let mut consumed = 0;

    for c in s.chars() {
        let digit = digit_value(c)?;
        match value.checked_mul(BASE).and_then(|n| n.checked_add(digit)) {
            Some(next) if next <= ceiling => {
                value = next;
                consumed += 1;
            }
            _ => break,
        }
    }

    Ok((value, consumed))
}
