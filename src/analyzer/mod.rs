//! Byte-level heuristics over JAR contents
//!
//! Everything in this module operates on raw bytes with no ZIP or
//! class-file parsing:
//! - Sampled CRC32 fingerprint
//! - Class-count estimation from class-file magic occurrences
//! - Stride-sampled byte distance between two buffers
//! - Fixed-byte-sequence obfuscation pattern detectors
//! - JAR-to-JAR comparison combining the above with mapping data

pub mod checksum;
pub mod classes;
pub mod comparison;
pub mod distance;
pub mod patterns;

pub use checksum::{fingerprint, fingerprint_hex};
pub use classes::estimate_class_count;
pub use comparison::{compare_jars, ComparisonResult, ComparisonSummary, DiffDetail, DiffKind};
pub use distance::sample_distance;
pub use patterns::{detect_patterns, Finding, PatternKind};
