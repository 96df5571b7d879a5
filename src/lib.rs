#![warn(missing_docs)]
#![warn(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

//! jar-guardian library
//!
//! This library provides the core functionality for validating obfuscated
//! Java JAR files. It can be used programmatically in addition to the CLI
//! interface.
//!
//! All analysis here is heuristic: byte-pattern scans, a sampled checksum
//! fingerprint, and ProGuard mapping statistics. No bytecode is decompiled
//! and no class files are structurally parsed. Verdicts are deterministic
//! functions of the input bytes, so repeated runs on the same JAR always
//! produce the same report.
//!
//! # Basic Example
//!
//! Fingerprinting a byte buffer:
//!
//! ```
//! use jar_guardian::analyzer::checksum::fingerprint;
//!
//! let bytes = b"not really a jar, but bytes are bytes";
//! let a = fingerprint(bytes);
//! let b = fingerprint(bytes);
//!
//! // The fingerprint is a pure function of the first 10,000 bytes.
//! assert_eq!(a, b);
//! ```
//!
//! # Advanced Example: Parsing a ProGuard mapping file
//!
//! ```
//! use jar_guardian::mapping::MappingSet;
//!
//! let text = "com.example.Foo -> com.example.a:\n    void bar() -> b\n";
//! let mapping = MappingSet::parse(text);
//!
//! assert_eq!(mapping.classes.len(), 1);
//! assert_eq!(mapping.classes[0].original, "com.example.Foo");
//! assert_eq!(mapping.methods.len(), 1);
//! assert_eq!(mapping.methods[0].class_name, "com.example.Foo");
//! ```
//!
//! # Advanced Example: Running a validation
//!
//! ```
//! use jar_guardian::config::ConfigFile;
//! use jar_guardian::runner::{run_validation, NoOpSink};
//!
//! let config = ConfigFile::default();
//! let bytes = vec![0u8; 4096];
//!
//! // A file without the .jar extension fails the intake step and the run
//! // short-circuits with a single failed result.
//! let report = run_validation("app.zip", &bytes, &config, None, &NoOpSink);
//! assert_eq!(report.results.len(), 1);
//! assert_eq!(report.results[0].id, "file-analysis");
//! ```

/// Byte-level heuristics: checksum, class-count estimation, pattern scans
pub mod analyzer;
/// Command handlers for CLI operations
pub mod cmd;
/// Configuration file and template management
pub mod config;
/// Enhanced error types with contextual suggestions
pub mod error;
/// Shared formatting utilities
pub mod fmt;
/// Infrastructure traits for filesystem access
pub mod infra;
/// File intake and extension validation
pub mod intake;
/// ProGuard mapping-file parsing
pub mod mapping;
/// Report and certificate rendering
pub mod report;
/// Validation run orchestration and progress events
pub mod runner;
/// Insert-only validation history store
pub mod store;
