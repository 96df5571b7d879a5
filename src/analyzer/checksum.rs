//! Sampled CRC32 fingerprint
//!
//! A cheap fingerprint over the head of a file, not an integrity check:
//! nothing ever compares it against an authoritative value. It seeds the
//! code samples in string-encryption findings and labels comparisons.

/// How many leading bytes contribute to the fingerprint
pub const FINGERPRINT_WINDOW: usize = 10_000;

/// Standard reflected CRC32 polynomial
const CRC32_POLYNOMIAL: u32 = 0xEDB8_8320;

/// Compute the CRC32 of at most the first 10,000 bytes.
///
/// Seed 0xFFFFFFFF, final XOR 0xFFFFFFFF. Deterministic: the same buffer
/// always yields the same value. An empty buffer yields 0.
///
/// # Examples
///
/// ```
/// use jar_guardian::analyzer::checksum::fingerprint;
///
/// assert_eq!(fingerprint(&[]), 0);
/// assert_eq!(fingerprint(b"abc"), fingerprint(b"abc"));
/// assert_ne!(fingerprint(b"abc"), fingerprint(b"abd"));
/// ```
pub fn fingerprint(bytes: &[u8]) -> u32 {
    let mut crc: u32 = 0xFFFF_FFFF;

    for &byte in bytes.iter().take(FINGERPRINT_WINDOW) {
        crc ^= u32::from(byte);
        for _ in 0..8 {
            // Branchless reflected CRC step
            let mask = (crc & 1).wrapping_neg();
            crc = (crc >> 1) ^ (CRC32_POLYNOMIAL & mask);
        }
    }

    !crc
}

/// Fingerprint rendered as 8 lowercase hex digits
pub fn fingerprint_hex(bytes: &[u8]) -> String {
    format!("{:08x}", fingerprint(bytes))
}
