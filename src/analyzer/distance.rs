//! Stride-sampled byte distance between two buffers
//!
//! A coarse dissimilarity number, not a content diff: there is no
//! alignment and no awareness that two JARs can differ entirely in ZIP
//! layout while holding the same classes.

/// How many leading bytes are eligible for sampling
pub const SAMPLE_WINDOW: usize = 50_000;

/// Distance between consecutive sampled positions
pub const SAMPLE_STRIDE: usize = 100;

/// Sampled byte distance between two buffers, normalized to 0..=100.
///
/// Positions are sampled at a fixed stride over the first 50,000 bytes
/// of the longer buffer. A position where one buffer has no byte counts
/// as differing. Two empty buffers have distance 0.
///
/// # Examples
///
/// ```
/// use jar_guardian::analyzer::distance::sample_distance;
///
/// let a = vec![0u8; 10_000];
/// assert_eq!(sample_distance(&a, &a), 0);
///
/// let b = vec![1u8; 10_000];
/// assert_eq!(sample_distance(&a, &b), 100);
/// ```
pub fn sample_distance(a: &[u8], b: &[u8]) -> u8 {
    let span = a.len().max(b.len()).min(SAMPLE_WINDOW);
    if span == 0 {
        return 0;
    }

    let mut sampled = 0u32;
    let mut differing = 0u32;
    let mut index = 0;
    while index < span {
        sampled += 1;
        if a.get(index) != b.get(index) {
            differing += 1;
        }
        index += SAMPLE_STRIDE;
    }

    (differing * 100 / sampled) as u8
}
