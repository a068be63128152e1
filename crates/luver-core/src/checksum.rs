//! Content fingerprints and version tags.

use chrono::{DateTime, Utc};

/// CRC-32 of the model bytes as lowercase hex.
///
/// Only used to answer "did the file change since the last sync", so a
/// non-cryptographic checksum is enough.
#[must_use]
pub fn fingerprint(bytes: &[u8]) -> String {
    format!("{:x}", crc32fast::hash(bytes))
}

/// The same CRC read as a signed 32-bit integer, e.g. `-7b2c41d9`.
///
/// Older ledgers carry this rendering. It equals [`fingerprint`] whenever the
/// high bit is clear.
#[must_use]
pub fn legacy_fingerprint(bytes: &[u8]) -> String {
    #[allow(clippy::cast_possible_wrap)]
    let signed = crc32fast::hash(bytes) as i32;
    if signed < 0 {
        format!("-{:x}", signed.unsigned_abs())
    } else {
        format!("{signed:x}")
    }
}

/// Minute-granularity UTC tag, e.g. `2305011200`.
#[must_use]
pub fn tag_for(now: DateTime<Utc>) -> String {
    now.format("%y%m%d%H%M").to_string()
}
