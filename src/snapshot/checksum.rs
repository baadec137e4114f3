//! CRC32 checksums for registry snapshots
//!
//! Format: `crc32:XXXXXXXX` (lowercase hex, zero-padded).

use crc32fast::Hasher;

/// Deterministic CRC32 (IEEE) over `data`.
pub fn compute_checksum(data: &[u8]) -> u32 {
    let mut hasher = Hasher::new();
    hasher.update(data);
    hasher.finalize()
}

/// ```
/// use aeroreg::snapshot::format_checksum;
/// assert_eq!(format_checksum(0xDEADBEEF), "crc32:deadbeef");
/// ```
pub fn format_checksum(checksum: u32) -> String {
    format!("crc32:{:08x}", checksum)
}

/// Inverse of [`format_checksum`]; `None` on malformed input.
pub fn parse_checksum(formatted: &str) -> Option<u32> {
    let stripped = formatted.strip_prefix("crc32:")?;
    if stripped.len() != 8 {
        return None;
    }
    u32::from_str_radix(stripped, 16).ok()
}
