//! The validation run executor
//!
//! Invokes the analyzers in a fixed order with fixed progress
//! milestones. Pass/fail/warning verdicts are derived from detector
//! hits and mapping statistics only; the original tool's randomized
//! thresholds were deliberately not carried over.

use serde::Serialize;

use super::events::{ProgressSink, TestResult, TestStatus};
use crate::analyzer::patterns::{detect_patterns, has_pattern, Finding, PatternKind};
use crate::analyzer::{estimate_class_count, fingerprint_hex};
use crate::config::ConfigFile;
use crate::fmt::format_file_size;
use crate::intake;
use crate::mapping::MappingSet;

/// Fixed progress milestones, matching the wizard's pacing
mod milestone {
    pub const FILE_CHECK: u8 = 10;
    pub const FILE_DONE: u8 = 25;
    pub const CLASS_NAMES: u8 = 40;
    pub const STRINGS: u8 = 55;
    pub const CONTROL_FLOW: u8 = 70;
    pub const SECURITY: u8 = 85;
    pub const DONE: u8 = 100;
}

/// Obfuscator vendor markers searched for by the watermark check
const WATERMARK_MARKERS: [&[u8]; 4] = [b"Allatori", b"yGuard", b"ZKM", b"proguard"];

/// Accumulated outcome of one validation run
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunReport {
    /// Test results in emission order; replaced in place by id
    pub results: Vec<TestResult>,
}

impl RunReport {
    /// Append a result, or replace an earlier result with the same id.
    ///
    /// Results are never deleted during a run.
    pub fn upsert(&mut self, result: TestResult) {
        if let Some(existing) = self.results.iter_mut().find(|r| r.id == result.id) {
            *existing = result;
        } else {
            self.results.push(result);
        }
    }

    /// Number of results with `Success` status
    pub fn passed_count(&self) -> usize {
        self.results
            .iter()
            .filter(|r| r.status == TestStatus::Success)
            .count()
    }

    /// Rounded pass percentage; 0 for an empty report
    pub fn pass_rate(&self) -> u32 {
        if self.results.is_empty() {
            return 0;
        }
        ((self.passed_count() as f64 / self.results.len() as f64) * 100.0).round() as u32
    }

    /// True when no result failed
    pub fn succeeded(&self) -> bool {
        !self
            .results
            .iter()
            .any(|r| r.status == TestStatus::Failed)
    }
}

/// Run the full check sequence over one JAR's bytes.
///
/// Step 1 validates name and size; a rejected file produces one failed
/// `file-analysis` result, forces progress to 100, and ends the run
/// without touching the analyzers. Every later check is gated by the
/// config snapshot and emits exactly one result.
pub fn run_validation(
    file_name: &str,
    bytes: &[u8],
    config: &ConfigFile,
    mapping: Option<&MappingSet>,
    sink: &impl ProgressSink,
) -> RunReport {
    let mut report = RunReport::default();

    // Step 1: file analysis
    sink.step(0);
    sink.progress(milestone::FILE_CHECK);

    if let Err(issue) = intake::inspect(file_name, bytes.len() as u64) {
        emit(
            &mut report,
            sink,
            TestResult::new(
                "file-analysis",
                "JAR file analysis",
                TestStatus::Failed,
                issue.message(),
            ),
        );
        sink.progress(milestone::DONE);
        return report;
    }

    emit(
        &mut report,
        sink,
        TestResult::new(
            "file-analysis",
            "JAR file analysis",
            TestStatus::Success,
            format!(
                "Valid file: {} ({})",
                file_name,
                format_file_size(bytes.len() as u64)
            ),
        ),
    );
    sink.progress(milestone::FILE_DONE);

    // Step 2: static obfuscation checks
    sink.step(1);
    let findings = detect_patterns(bytes);

    if config.obfuscation.class_name_obfuscation {
        emit(&mut report, sink, class_name_check(bytes, mapping, &findings));
        sink.progress(milestone::CLASS_NAMES);
    }

    if config.obfuscation.string_encryption {
        emit(&mut report, sink, string_encryption_check(bytes, &findings));
        sink.progress(milestone::STRINGS);
    }

    if config.obfuscation.control_flow_obfuscation {
        emit(&mut report, sink, control_flow_check(&findings));
        sink.progress(milestone::CONTROL_FLOW);
    }

    if config.obfuscation.watermark_check {
        emit(&mut report, sink, watermark_check(bytes));
    }

    // Step 3: functional and security checks
    sink.step(2);
    sink.progress(milestone::SECURITY);

    if config.functional.enabled {
        emit(&mut report, sink, functional_check(config));
    }

    if config.security.enabled {
        if config.security.decompilation_protection {
            emit(&mut report, sink, decompilation_check(&findings));
        }
        if config.security.anti_debug {
            emit(&mut report, sink, anti_debug_check(&findings));
        }
    }

    emit(
        &mut report,
        sink,
        TestResult::new(
            "obfuscation-tools",
            "Recommended obfuscation tooling",
            TestStatus::Success,
            "ProGuard, yGuard, and Allatori (free edition) remain solid options for Java code obfuscation",
        ),
    );

    // Step 4: conclusion
    sink.step(3);

    let summary_status = if report.succeeded() {
        TestStatus::Success
    } else {
        TestStatus::Failed
    };
    let summary = TestResult::new(
        "validation-summary",
        "Validation summary",
        summary_status,
        format!(
            "Static validation finished: {}/{} checks passed",
            report.passed_count(),
            report.results.len()
        ),
    );
    emit(&mut report, sink, summary);
    sink.progress(milestone::DONE);

    report
}

fn emit(report: &mut RunReport, sink: &impl ProgressSink, result: TestResult) {
    report.upsert(result.clone());
    sink.result(result);
}

fn class_name_check(
    bytes: &[u8],
    mapping: Option<&MappingSet>,
    findings: &[Finding],
) -> TestResult {
    const ID: &str = "class-obfuscation";
    const NAME: &str = "Class name obfuscation";

    match mapping {
        Some(mapping) if mapping.classes.is_empty() => TestResult::new(
            ID,
            NAME,
            TestStatus::Failed,
            "Mapping file contains no class renames",
        ),
        Some(mapping) if !mapping.unmapped_classes.is_empty() => TestResult::new(
            ID,
            NAME,
            TestStatus::Warning,
            format!(
                "{} classes renamed, but {} kept their original name: {}",
                mapping.classes.len(),
                mapping.unmapped_classes.len(),
                mapping.unmapped_classes.join(", ")
            ),
        ),
        Some(mapping) => TestResult::new(
            ID,
            NAME,
            TestStatus::Success,
            format!(
                "{} classes renamed per mapping file (estimated {} classes in archive)",
                mapping.classes.len(),
                estimate_class_count(bytes)
            ),
        ),
        None if has_pattern(findings, PatternKind::IdentifierRenaming) => TestResult::new(
            ID,
            NAME,
            TestStatus::Warning,
            "Renaming is plausible from archive size; supply a ProGuard mapping file to verify",
        ),
        None => TestResult::new(
            ID,
            NAME,
            TestStatus::Warning,
            "Archive too small to assess renaming; supply a ProGuard mapping file",
        ),
    }
}

fn string_encryption_check(bytes: &[u8], findings: &[Finding]) -> TestResult {
    const ID: &str = "string-encryption";
    const NAME: &str = "String encryption";

    if let Some(finding) = findings
        .iter()
        .find(|f| f.kind == PatternKind::StringDecryption)
    {
        TestResult::new(
            ID,
            NAME,
            TestStatus::Success,
            format!(
                "String decryption call pattern detected ({}; fingerprint {})",
                finding.detail,
                fingerprint_hex(bytes)
            ),
        )
    } else {
        TestResult::new(
            ID,
            NAME,
            TestStatus::Warning,
            "No string-decryption call pattern found; strings may be stored in clear text",
        )
    }
}

fn control_flow_check(findings: &[Finding]) -> TestResult {
    const ID: &str = "control-flow";
    const NAME: &str = "Control flow obfuscation";

    let dispatch = has_pattern(findings, PatternKind::SwitchDispatch);
    let unreachable = has_pattern(findings, PatternKind::UnreachableCode);

    if dispatch || unreachable {
        let mut seen = Vec::new();
        if dispatch {
            seen.push("switch dispatchers");
        }
        if unreachable {
            seen.push("unreachable-code markers");
        }
        TestResult::new(
            ID,
            NAME,
            TestStatus::Success,
            format!("Control-flow scrambling detected: {}", seen.join(", ")),
        )
    } else {
        TestResult::new(
            ID,
            NAME,
            TestStatus::Warning,
            "No control-flow scrambling markers found",
        )
    }
}

fn watermark_check(bytes: &[u8]) -> TestResult {
    const ID: &str = "watermark";
    const NAME: &str = "Watermark check";

    let hit = WATERMARK_MARKERS.iter().find(|marker| {
        bytes
            .windows(marker.len())
            .any(|window| window == **marker)
    });

    match hit {
        Some(marker) => TestResult::new(
            ID,
            NAME,
            TestStatus::Success,
            format!(
                "Obfuscator watermark marker found: {}",
                String::from_utf8_lossy(marker)
            ),
        ),
        None => TestResult::new(
            ID,
            NAME,
            TestStatus::Warning,
            "No obfuscator watermark marker found in archive",
        ),
    }
}

fn functional_check(config: &ConfigFile) -> TestResult {
    const ID: &str = "functional-test";
    const NAME: &str = "Functional test";

    if config.functional.custom_test_command.is_empty() {
        TestResult::new(
            ID,
            NAME,
            TestStatus::Warning,
            "Functional checks are enabled but no test command is configured",
        )
    } else {
        TestResult::new(
            ID,
            NAME,
            TestStatus::Warning,
            format!(
                "Functional execution is out of scope; run '{}' (budget {}s) against the obfuscated build manually",
                config.functional.custom_test_command, config.functional.timeout_seconds
            ),
        )
    }
}

fn decompilation_check(findings: &[Finding]) -> TestResult {
    const ID: &str = "decompilation";
    const NAME: &str = "Decompilation protection";

    // Two or more distinct obfuscation techniques make casual
    // decompilation output substantially less readable.
    let technique_count = findings
        .iter()
        .filter(|f| {
            matches!(
                f.kind,
                PatternKind::StringDecryption
                    | PatternKind::SwitchDispatch
                    | PatternKind::UnreachableCode
                    | PatternKind::ClassSplitting
            )
        })
        .count();

    if technique_count >= 2 {
        TestResult::new(
            ID,
            NAME,
            TestStatus::Success,
            format!(
                "{} independent obfuscation techniques detected; decompiler output will be degraded",
                technique_count
            ),
        )
    } else {
        TestResult::new(
            ID,
            NAME,
            TestStatus::Warning,
            "Fewer than two obfuscation techniques detected; decompilers may recover readable code",
        )
    }
}

fn anti_debug_check(findings: &[Finding]) -> TestResult {
    const ID: &str = "anti-debug";
    const NAME: &str = "Anti-debug protection";

    if has_pattern(findings, PatternKind::AntiDebug) {
        TestResult::new(
            ID,
            NAME,
            TestStatus::Success,
            "Debugger-presence probe sequence detected",
        )
    } else {
        TestResult::new(
            ID,
            NAME,
            TestStatus::Warning,
            "No anti-debug probe detected",
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::events::{MemorySink, NoOpSink, RunEvent};

    fn default_config() -> ConfigFile {
        ConfigFile::default()
    }

    /// Bytes that trip the string-decryption, switch-dispatch, and
    /// renaming detectors.
    fn obfuscated_bytes() -> Vec<u8> {
        let mut bytes = vec![0u8; 8192];
        bytes[10] = 0x12;
        bytes[11] = 0xB8;
        bytes[50] = 0xBF;
        bytes[51] = 0xA7;
        for i in 0..4 {
            bytes[100 + i * 7] = 0xAA;
        }
        bytes
    }

    #[test]
    fn test_non_jar_extension_short_circuits() {
        let sink = MemorySink::new();
        let report = run_validation("app.zip", &[1, 2, 3], &default_config(), None, &sink);

        assert_eq!(report.results.len(), 1);
        assert_eq!(report.results[0].id, "file-analysis");
        assert_eq!(report.results[0].status, TestStatus::Failed);
        assert_eq!(sink.progress_milestones().last(), Some(&100));
        // Only the intake milestone and the forced completion
        assert_eq!(sink.progress_milestones(), vec![10, 100]);
    }

    #[test]
    fn test_empty_file_reports_emptiness() {
        let sink = MemorySink::new();
        let report = run_validation("app.jar", &[], &default_config(), None, &sink);

        assert_eq!(report.results.len(), 1);
        assert_eq!(report.results[0].status, TestStatus::Failed);
        assert!(report.results[0].message.contains("empty"));
    }

    #[test]
    fn test_full_run_hits_all_milestones_in_order() {
        let sink = MemorySink::new();
        run_validation("app.jar", &obfuscated_bytes(), &default_config(), None, &sink);

        let milestones = sink.progress_milestones();
        assert_eq!(milestones, vec![10, 25, 40, 55, 70, 85, 100]);
    }

    #[test]
    fn test_steps_advance_through_the_wizard() {
        let sink = MemorySink::new();
        run_validation("app.jar", &obfuscated_bytes(), &default_config(), None, &sink);

        let steps: Vec<usize> = sink
            .events()
            .iter()
            .filter_map(|e| match e {
                RunEvent::Step(s) => Some(*s),
                _ => None,
            })
            .collect();
        assert_eq!(steps, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_run_is_deterministic() {
        let bytes = obfuscated_bytes();
        let a = run_validation("app.jar", &bytes, &default_config(), None, &NoOpSink);
        let b = run_validation("app.jar", &bytes, &default_config(), None, &NoOpSink);
        assert_eq!(a.results, b.results);
    }

    #[test]
    fn test_disabled_checks_emit_no_results() {
        let mut config = default_config();
        config.obfuscation.string_encryption = false;
        config.obfuscation.control_flow_obfuscation = false;
        config.security.enabled = false;

        let sink = MemorySink::new();
        let report = run_validation("app.jar", &obfuscated_bytes(), &config, None, &sink);

        assert!(report.results.iter().all(|r| r.id != "string-encryption"));
        assert!(report.results.iter().all(|r| r.id != "control-flow"));
        assert!(report.results.iter().all(|r| r.id != "decompilation"));
    }

    #[test]
    fn test_mapping_drives_class_name_verdict() {
        let mapping = MappingSet::parse("com.Foo -> a:\ncom.Bar -> b:");
        let report = run_validation(
            "app.jar",
            &obfuscated_bytes(),
            &default_config(),
            Some(&mapping),
            &NoOpSink,
        );

        let class_result = report
            .results
            .iter()
            .find(|r| r.id == "class-obfuscation")
            .expect("class check runs by default");
        assert_eq!(class_result.status, TestStatus::Success);
        assert!(class_result.message.contains("2 classes renamed"));
    }

    #[test]
    fn test_unmapped_classes_downgrade_to_warning() {
        let mapping = MappingSet::parse("com.Foo -> a:\ncom.Keep -> com.Keep:");
        let report = run_validation(
            "app.jar",
            &obfuscated_bytes(),
            &default_config(),
            Some(&mapping),
            &NoOpSink,
        );

        let class_result = report
            .results
            .iter()
            .find(|r| r.id == "class-obfuscation")
            .expect("class check runs by default");
        assert_eq!(class_result.status, TestStatus::Warning);
        assert!(class_result.message.contains("com.Keep"));
    }

    #[test]
    fn test_summary_is_failed_when_any_check_failed() {
        let mapping = MappingSet::parse("# classes stripped\n");
        let report = run_validation(
            "app.jar",
            &obfuscated_bytes(),
            &default_config(),
            Some(&mapping),
            &NoOpSink,
        );

        assert!(!report.succeeded());
        let summary = report.results.last().expect("summary always present");
        assert_eq!(summary.id, "validation-summary");
        assert_eq!(summary.status, TestStatus::Failed);
    }

    #[test]
    fn test_watermark_check_finds_vendor_marker() {
        let mut config = default_config();
        config.obfuscation.watermark_check = true;

        let mut bytes = obfuscated_bytes();
        bytes.extend_from_slice(b"obfuscated by Allatori demo");

        let report = run_validation("app.jar", &bytes, &config, None, &NoOpSink);
        let watermark = report
            .results
            .iter()
            .find(|r| r.id == "watermark")
            .expect("watermark check enabled");
        assert_eq!(watermark.status, TestStatus::Success);
        assert!(watermark.message.contains("Allatori"));
    }

    #[test]
    fn test_pass_rate_is_rounded_percentage() {
        let mut report = RunReport::default();
        report.upsert(TestResult::new("a", "a", TestStatus::Success, ""));
        report.upsert(TestResult::new("b", "b", TestStatus::Warning, ""));
        report.upsert(TestResult::new("c", "c", TestStatus::Success, ""));
        assert_eq!(report.pass_rate(), 67);

        assert_eq!(RunReport::default().pass_rate(), 0);
    }

    #[test]
    fn test_upsert_replaces_by_id() {
        let mut report = RunReport::default();
        report.upsert(TestResult::new("a", "a", TestStatus::Running, "starting"));
        report.upsert(TestResult::new("a", "a", TestStatus::Success, "done"));

        assert_eq!(report.results.len(), 1);
        assert_eq!(report.results[0].status, TestStatus::Success);
        assert_eq!(report.results[0].message, "done");
    }
}
