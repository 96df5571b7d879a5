//! Plain-text validation certificate

use std::fmt::Write as _;

use super::ReportContext;

/// Days the certificate remains valid from its generation date
const VALIDITY_DAYS: u64 = 90;

fn verdict(pass_rate: u32) -> &'static str {
    if pass_rate >= 85 {
        "MEETS the obfuscation validation criteria"
    } else if pass_rate >= 70 {
        "PARTIALLY MEETS the obfuscation validation criteria"
    } else {
        "DOES NOT MEET the obfuscation validation criteria"
    }
}

/// Render the fixed-template certificate for one completed run.
pub fn render_certificate(ctx: &ReportContext) -> String {
    let rule = "=".repeat(64);
    let mut out = String::new();

    let _ = writeln!(out, "{rule}");
    let _ = writeln!(out, "            CERTIFICATE OF OBFUSCATION VALIDATION");
    let _ = writeln!(out, "{rule}");
    let _ = writeln!(out);
    let _ = writeln!(out, "This certifies that the archive");
    let _ = writeln!(out);
    let _ = writeln!(out, "    {}  ({})", ctx.file_name, ctx.file_size_display());
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "was analyzed by jar-guardian and, with a pass rate of {}%,",
        ctx.report.pass_rate()
    );
    let _ = writeln!(out, "{}.", verdict(ctx.report.pass_rate()));
    let _ = writeln!(out);
    let _ = writeln!(out, "Report ID:   {}", ctx.report_id);
    let _ = writeln!(out, "Issued at:   {} (unix)", ctx.generated_at);
    let _ = writeln!(
        out,
        "Valid for:   {} days from the date of issue",
        VALIDITY_DAYS
    );
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "This certificate reflects static heuristic analysis only and is"
    );
    let _ = writeln!(
        out,
        "not a guarantee against reverse engineering."
    );
    let _ = writeln!(out, "{rule}");

    out
}
