//! Validation run orchestration
//!
//! A run is a fixed sequence of checks over one JAR. Progress, step
//! changes, and test results stream through a pluggable `ProgressSink`
//! while the run accumulates an explicit `RunReport` it returns to the
//! caller. No randomness anywhere: identical input bytes and config
//! yield an identical report.

pub mod events;
pub mod executor;

pub use events::{
    ConsoleSink, MemorySink, NoOpSink, ProgressSink, RunEvent, TestResult, TestStatus,
};
pub use executor::{run_validation, RunReport};
