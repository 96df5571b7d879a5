//! ProGuard mapping-file parsing
//!
//! Line-oriented parsing of `original -> obfuscated` rename records.
//! There is no grammar and no round-trip guarantee: left and right sides
//! are captured as raw text, including return types and line-number
//! prefixes ProGuard writes on member lines.

pub mod parser;

pub use parser::{ClassMapping, FieldMapping, MappingSet, MethodMapping};
