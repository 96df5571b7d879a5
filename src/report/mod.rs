//! Report and certificate rendering
//!
//! Validation output is rendered as Markdown (report) and plain text
//! (certificate), with JSON variants available through serde. Both
//! renderers are pure functions over a [`ReportContext`].

mod certificate;
mod text;

pub use certificate::render_certificate;
pub use text::{render_report, test_description};

use std::path::Path;

use serde::Serialize;
use uuid::Uuid;

use crate::fmt::{format_file_size, unix_timestamp};
use crate::runner::RunReport;

/// Everything the renderers need about one completed run
#[derive(Debug, Clone, Serialize)]
pub struct ReportContext {
    /// Report identifier, `CG-` followed by 8 uppercase hex chars
    pub report_id: String,
    /// Unix timestamp (seconds) when the report was generated
    pub generated_at: String,
    /// Name of the validated JAR
    pub file_name: String,
    /// Size of the validated JAR in bytes
    pub file_size: u64,
    /// The accumulated run outcome
    pub report: RunReport,
}

impl ReportContext {
    /// Build a context for a finished run, minting a fresh report id.
    pub fn new(file_name: &str, file_size: u64, report: RunReport) -> Self {
        Self {
            report_id: new_report_id(),
            generated_at: unix_timestamp(),
            file_name: file_name.to_string(),
            file_size,
            report,
        }
    }

    /// Formatted file size, as shown in both artifacts
    pub fn file_size_display(&self) -> String {
        format_file_size(self.file_size)
    }
}

/// Mint a report identifier: `CG-` plus the first 8 hex digits of a
/// v4 UUID, uppercased.
pub fn new_report_id() -> String {
    let simple = Uuid::new_v4().simple().to_string();
    format!("CG-{}", simple[..8].to_uppercase())
}

/// Report artifact file name for a given input, e.g.
/// `validation-report-app.md` for `app.jar`.
pub fn report_file_name(jar_name: &str) -> String {
    format!("validation-report-{}.md", file_stem(jar_name))
}

/// Certificate artifact file name for a given input
pub fn certificate_file_name(jar_name: &str) -> String {
    format!("validation-certificate-{}.txt", file_stem(jar_name))
}

fn file_stem(jar_name: &str) -> String {
    Path::new(jar_name)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| jar_name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_id_shape() {
        let id = new_report_id();
        assert!(id.starts_with("CG-"));
        assert_eq!(id.len(), 11);
        assert!(id[3..].chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(id, id.to_uppercase());
    }

    #[test]
    fn test_report_ids_are_unique() {
        assert_ne!(new_report_id(), new_report_id());
    }

    #[test]
    fn test_artifact_file_names_use_the_stem() {
        assert_eq!(report_file_name("app.jar"), "validation-report-app.md");
        assert_eq!(
            certificate_file_name("my-lib.jar"),
            "validation-certificate-my-lib.txt"
        );
    }

    #[test]
    fn test_extensionless_input_keeps_its_name() {
        assert_eq!(report_file_name("bundle"), "validation-report-bundle.md");
    }
}
