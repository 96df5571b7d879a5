//! Class-count estimation
//!
//! Counts occurrences of the class-file magic number anywhere in the
//! buffer. This is a heuristic upper bound, not an accurate count: the
//! magic bytes can occur incidentally inside compressed JAR entries, and
//! an accurate count would require walking the ZIP central directory for
//! `.class` entries.

/// The 4-byte class-file magic number, 0xCAFEBABE
pub const CLASS_MAGIC: [u8; 4] = [0xCA, 0xFE, 0xBA, 0xBE];

/// Below this many magic hits the scan is not trusted and the size-based
/// fallback applies
const MAGIC_CONFIDENCE_MIN: usize = 5;

/// Fallback assumes one class per this many bytes
const FALLBACK_BYTES_PER_CLASS: u64 = 2048;

/// Count raw occurrences of the class-file magic in a buffer
pub fn count_magic(bytes: &[u8]) -> usize {
    if bytes.len() < CLASS_MAGIC.len() {
        return 0;
    }
    bytes
        .windows(CLASS_MAGIC.len())
        .filter(|window| *window == CLASS_MAGIC)
        .count()
}

/// Estimate how many classes a JAR holds.
///
/// Uses the magic-number count when at least 5 hits are found, otherwise
/// falls back to `len / 2048`, floored at 1. Always returns at least 1.
///
/// # Examples
///
/// ```
/// use jar_guardian::analyzer::classes::estimate_class_count;
///
/// // No magic bytes, 4096 bytes: size fallback
/// assert_eq!(estimate_class_count(&[0u8; 4096]), 2);
///
/// // Tiny buffer still counts as one class
/// assert_eq!(estimate_class_count(&[1, 2, 3]), 1);
/// ```
pub fn estimate_class_count(bytes: &[u8]) -> u64 {
    let hits = count_magic(bytes);
    if hits >= MAGIC_CONFIDENCE_MIN {
        hits as u64
    } else {
        (bytes.len() as u64 / FALLBACK_BYTES_PER_CLASS).max(1)
    }
}
