//! Common test utilities and helpers
//!
//! This module provides shared functionality for integration tests:
//! fixture byte buffers and on-disk JAR/mapping file creation.

pub mod fixtures;
