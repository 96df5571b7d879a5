//! Command handlers for the jar-guardian CLI
//!
//! This module contains all command implementations, organized by
//! functionality. Each submodule handles a specific CLI command.

pub mod compare;
pub mod completions;
pub mod init;
pub mod mapping;
pub mod validate;

// Re-export command functions for convenient access
pub use compare::cmd_compare;
pub use completions::cmd_completions;
pub use init::cmd_init;
pub use mapping::cmd_mapping;
pub use validate::{cmd_validate, ValidateOptions};
