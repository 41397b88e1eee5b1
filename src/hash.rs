//! Per-field hash functions behind [`ValueRecord::hash_code`](crate::ValueRecord::hash_code).
//!
//! All arithmetic wraps. Unset fields contribute [`UNSET`].

use time::OffsetDateTime;

/// Contribution of a field that holds no value.
pub const UNSET: i32 = 0;

const MULTIPLIER: i32 = 31;

/// Bit pattern every NaN collapses to before hashing or comparing.
const CANONICAL_NAN_BITS: u32 = 0x7fc0_0000;

/// Folds one field hash into the running accumulator.
#[inline]
#[must_use]
pub const fn combine(acc: i32, field_hash: i32) -> i32 {
    acc.wrapping_mul(MULTIPLIER).wrapping_add(field_hash)
}

/// Polynomial hash over the UTF-16 code units of `value`.
#[must_use]
pub fn str_hash(value: &str) -> i32 {
    value
        .encode_utf16()
        .fold(0_i32, |acc, unit| combine(acc, i32::from(unit)))
}

/// Hash of an instant at millisecond resolution: the epoch milliseconds
/// with the high word folded into the low word.
#[must_use]
pub fn instant_hash(value: &OffsetDateTime) -> i32 {
    let millis = epoch_millis(value);
    let folded = millis ^ (millis >> 32);
    i32::from_ne_bytes(low_word(folded).to_ne_bytes())
}

/// Hash of a float from its canonical bit pattern.
#[must_use]
pub const fn float_hash(value: f32) -> i32 {
    i32::from_ne_bytes(canonical_bits(value).to_ne_bytes())
}

/// Raw bits of `value` with every NaN mapped to one pattern. Signed zeros
/// stay distinct.
#[inline]
#[must_use]
pub const fn canonical_bits(value: f32) -> u32 {
    if value.is_nan() {
        CANONICAL_NAN_BITS
    } else {
        value.to_bits()
    }
}

/// Milliseconds since the Unix epoch as an unsigned word, floored.
fn epoch_millis(value: &OffsetDateTime) -> u64 {
    let millis = value.unix_timestamp_nanos().div_euclid(1_000_000);
    // OffsetDateTime spans at most +/-9999 years, well inside i64 millis.
    let millis = i64::try_from(millis).unwrap_or(if millis < 0 { i64::MIN } else { i64::MAX });
    u64::from_ne_bytes(millis.to_ne_bytes())
}

#[allow(clippy::cast_possible_truncation)]
const fn low_word(value: u64) -> u32 {
    value as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn str_hash_matches_known_values() {
        assert_eq!(str_hash(""), 0);
        assert_eq!(str_hash("a"), 97);
        assert_eq!(str_hash("alpha"), 92_909_918);
    }

    #[test]
    fn str_hash_uses_utf16_units() {
        // U+1F600 is a surrogate pair: 0xD83D, 0xDE00.
        assert_eq!(str_hash("\u{1F600}"), 0xD83D * 31 + 0xDE00);
    }

    #[test]
    fn instant_hash_folds_epoch_millis() {
        let epoch = OffsetDateTime::UNIX_EPOCH;
        assert_eq!(instant_hash(&epoch), 0);

        let later = OffsetDateTime::from_unix_timestamp(1).unwrap();
        assert_eq!(instant_hash(&later), 1000);

        let before = OffsetDateTime::from_unix_timestamp_nanos(-1_000_000).unwrap();
        // -1 ms: 0xFFFF_FFFF_FFFF_FFFF ^ 0x0000_0000_FFFF_FFFF
        assert_eq!(instant_hash(&before), 0);
    }

    #[test]
    fn float_hash_canonicalises_nan_only() {
        assert_eq!(float_hash(f32::NAN), float_hash(-f32::NAN));
        assert_ne!(float_hash(0.0), float_hash(-0.0));
        assert_eq!(float_hash(0.5), 0x3f00_0000);
    }

    #[test]
    fn combine_wraps_on_overflow() {
        assert_eq!(combine(i32::MAX, 1), i32::MAX.wrapping_mul(31) + 1);
    }
}
