//! Markdown validation report

use std::fmt::Write as _;

use super::ReportContext;
use crate::runner::TestStatus;

/// Fixed explanatory text for each known check id.
///
/// Unknown ids (future checks) fall back to a neutral description so
/// the report never panics on new result kinds.
pub fn test_description(id: &str) -> &'static str {
    match id {
        "file-analysis" => {
            "Verifies that the submitted file is a non-empty JAR archive before any analysis runs."
        }
        "class-obfuscation" => {
            "Checks whether class names were renamed, using the ProGuard mapping file when supplied \
             and archive-size heuristics otherwise."
        }
        "string-encryption" => {
            "Scans for the invokestatic call pattern typical of string-decryption helpers injected \
             by obfuscators."
        }
        "control-flow" => {
            "Looks for switch-based dispatchers and unreachable-code markers that indicate \
             control-flow scrambling."
        }
        "watermark" => {
            "Searches the archive for known obfuscator vendor watermarks."
        }
        "functional-test" => {
            "Reminds you to run the configured functional test suite against the obfuscated build; \
             the suite itself is not executed here."
        }
        "decompilation" => {
            "Estimates decompilation resistance from the number of independent obfuscation \
             techniques detected."
        }
        "anti-debug" => {
            "Scans for the opcode sequence of a debugger-presence probe."
        }
        "obfuscation-tools" => {
            "Suggests obfuscation tooling appropriate for Java archives."
        }
        "validation-summary" => {
            "Overall verdict aggregated from every executed check."
        }
        _ => "Additional validation check.",
    }
}

fn status_word(status: TestStatus) -> &'static str {
    match status {
        TestStatus::Waiting => "WAITING",
        TestStatus::Running => "RUNNING",
        TestStatus::Success => "PASSED",
        TestStatus::Failed => "FAILED",
        TestStatus::Warning => "WARNING",
    }
}

fn conclusion(pass_rate: u32) -> &'static str {
    if pass_rate == 100 {
        "All validation checks passed. The archive shows the characteristics of a properly \
         obfuscated build and is ready for distribution."
    } else if pass_rate >= 80 {
        "Most validation checks passed. Review the warnings above; the archive is likely \
         acceptable, but individual protections may be weaker than intended."
    } else {
        "A significant number of checks did not pass. The archive should be re-obfuscated with \
         stronger settings before distribution."
    }
}

/// Render the full Markdown report for one completed run.
pub fn render_report(ctx: &ReportContext) -> String {
    let report = &ctx.report;
    let mut out = String::new();

    let _ = writeln!(out, "# JAR Obfuscation Validation Report");
    let _ = writeln!(out);
    let _ = writeln!(out, "- Report ID: {}", ctx.report_id);
    let _ = writeln!(out, "- Generated: {} (unix)", ctx.generated_at);
    let _ = writeln!(out, "- File: {}", ctx.file_name);
    let _ = writeln!(out, "- Size: {}", ctx.file_size_display());
    let _ = writeln!(out);

    let _ = writeln!(out, "## Summary");
    let _ = writeln!(out);
    let _ = writeln!(out, "| Metric | Value |");
    let _ = writeln!(out, "|--------|-------|");
    let _ = writeln!(out, "| Checks executed | {} |", report.results.len());
    let _ = writeln!(out, "| Checks passed | {} |", report.passed_count());
    let _ = writeln!(out, "| Pass rate | {}% |", report.pass_rate());
    let _ = writeln!(out);

    let _ = writeln!(out, "## Detailed results");
    let _ = writeln!(out);
    for result in &report.results {
        let _ = writeln!(
            out,
            "### {} {} — {}",
            result.status.marker(),
            result.name,
            status_word(result.status)
        );
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", test_description(&result.id));
        let _ = writeln!(out);
        let _ = writeln!(out, "> {}", result.message);
        let _ = writeln!(out);
    }

    let _ = writeln!(out, "## Conclusion");
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", conclusion(report.pass_rate()));

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::{RunReport, TestResult};

    fn context(statuses: &[TestStatus]) -> ReportContext {
        let mut report = RunReport::default();
        for (i, status) in statuses.iter().enumerate() {
            report.upsert(TestResult::new(
                format!("check-{i}"),
                format!("Check {i}"),
                *status,
                "detail",
            ));
        }
        ReportContext::new("app.jar", 2048, report)
    }

    #[test]
    fn test_report_carries_metadata_and_results() {
        let ctx = context(&[TestStatus::Success, TestStatus::Warning]);
        let rendered = render_report(&ctx);

        assert!(rendered.contains(&ctx.report_id));
        assert!(rendered.contains("File: app.jar"));
        assert!(rendered.contains("Size: 2 KB"));
        assert!(rendered.contains("Check 0"));
        assert!(rendered.contains("Check 1"));
        assert!(rendered.contains("| Pass rate | 50% |"));
    }

    #[test]
    fn test_conclusion_tiers() {
        let perfect = render_report(&context(&[TestStatus::Success; 4]));
        assert!(perfect.contains("ready for distribution"));

        let good = render_report(&context(&[
            TestStatus::Success,
            TestStatus::Success,
            TestStatus::Success,
            TestStatus::Success,
            TestStatus::Warning,
        ]));
        assert!(good.contains("Review the warnings"));

        let poor = render_report(&context(&[TestStatus::Failed, TestStatus::Success]));
        assert!(poor.contains("re-obfuscated"));
    }

    #[test]
    fn test_unknown_id_has_fallback_description() {
        assert_eq!(test_description("something-new"), "Additional validation check.");
    }

    #[test]
    fn test_known_ids_have_specific_descriptions() {
        for id in [
            "file-analysis",
            "class-obfuscation",
            "string-encryption",
            "control-flow",
            "watermark",
            "functional-test",
            "decompilation",
            "anti-debug",
            "obfuscation-tools",
            "validation-summary",
        ] {
            assert_ne!(test_description(id), test_description("something-new"));
        }
    }
}
