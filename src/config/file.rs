//! Configuration file data structures

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration file name
pub const CONFIG_FILE_NAME: &str = ".jar-guardian.toml";

/// jar-guardian configuration file structure
///
/// Doubles as the per-run test configuration snapshot: the loaded value
/// is cloned into every run and stored verbatim in validation records.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigFile {
    /// Obfuscation checks to run
    #[serde(default)]
    pub obfuscation: ObfuscationChecks,

    /// Functional checks (reported, never executed)
    #[serde(default)]
    pub functional: FunctionalChecks,

    /// Security checks to run
    #[serde(default)]
    pub security: SecurityChecks,

    /// Report output settings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<ReportSettings>,
}

/// Obfuscation check toggles
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ObfuscationChecks {
    /// Check that class and method names were renamed
    #[serde(default = "default_true")]
    pub class_name_obfuscation: bool,

    /// Check for string-decryption call patterns
    #[serde(default = "default_true")]
    pub string_encryption: bool,

    /// Check for control-flow scrambling markers
    #[serde(default = "default_true")]
    pub control_flow_obfuscation: bool,

    /// Check for obfuscator watermark markers
    #[serde(default)]
    pub watermark_check: bool,
}

/// Functional check settings
///
/// Functional test execution is out of scope; a configured command is
/// surfaced as a warning in the report, never run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct FunctionalChecks {
    /// Whether the functional section appears in reports
    #[serde(default)]
    pub enabled: bool,

    /// Command the team would run against the obfuscated build
    #[serde(default)]
    pub custom_test_command: String,

    /// Timeout budget the command would run under, in seconds
    #[serde(default = "default_timeout", rename = "timeout-seconds")]
    pub timeout_seconds: u64,
}

/// Security check toggles
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SecurityChecks {
    /// Whether any security checks run
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Check resistance against decompilation tooling
    #[serde(default = "default_true")]
    pub decompilation_protection: bool,

    /// Check for anti-debug protections
    #[serde(default)]
    pub anti_debug: bool,
}

/// Report output settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ReportSettings {
    /// Directory report and certificate files are written into
    #[serde(skip_serializing_if = "Option::is_none")]
    pub out_dir: Option<PathBuf>,
}

fn default_true() -> bool {
    true
}

fn default_timeout() -> u64 {
    60
}

impl ConfigFile {
    /// Validate cross-field constraints.
    ///
    /// # Examples
    ///
    /// ```
    /// use jar_guardian::config::ConfigFile;
    ///
    /// let mut config = ConfigFile::default();
    /// assert!(config.validate().is_ok());
    ///
    /// config.functional.enabled = true;
    /// config.functional.timeout_seconds = 0;
    /// assert!(config.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<()> {
        if self.functional.enabled && self.functional.timeout_seconds == 0 {
            anyhow::bail!("functional.timeout-seconds must be non-zero when functional checks are enabled");
        }
        Ok(())
    }
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            obfuscation: ObfuscationChecks::default(),
            functional: FunctionalChecks::default(),
            security: SecurityChecks::default(),
            report: None,
        }
    }
}

impl Default for ObfuscationChecks {
    fn default() -> Self {
        Self {
            class_name_obfuscation: true,
            string_encryption: true,
            control_flow_obfuscation: true,
            watermark_check: false,
        }
    }
}

impl Default for FunctionalChecks {
    fn default() -> Self {
        Self {
            enabled: false,
            custom_test_command: String::new(),
            timeout_seconds: default_timeout(),
        }
    }
}

impl Default for SecurityChecks {
    fn default() -> Self {
        Self {
            enabled: true,
            decompilation_protection: true,
            anti_debug: false,
        }
    }
}
