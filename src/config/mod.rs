//! Configuration file and template management
//!
//! Checks are configured through `.jar-guardian.toml`. The config file is
//! an immutable snapshot per run: whatever was loaded when the command
//! started is what the run and the stored record see.

pub mod file;
pub mod loader;
pub mod template;

pub use file::{
    ConfigFile, FunctionalChecks, ObfuscationChecks, ReportSettings, SecurityChecks,
    CONFIG_FILE_NAME,
};
pub use loader::ConfigLoader;
pub use template::Template;
