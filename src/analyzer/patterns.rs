//! Obfuscation-pattern heuristic detectors
//!
//! Six independent fixed-byte-sequence scans, each bounded to the head
//! of the buffer. These match opcode bytes without decoding bytecode:
//! there is no operand-length-aware instruction walk, so a "hit" can be
//! a false positive inside constant-pool data. Every detector is a pure
//! function of the input bytes.

use serde::Serialize;

use super::checksum::fingerprint;
use super::classes::count_magic;

/// Scan bound for opcode-shaped needles
const OPCODE_SCAN_WINDOW: usize = 50_000;

/// Scan bound for distribution-style scans (switch opcodes, markers)
const WIDE_SCAN_WINDOW: usize = 100_000;

/// ldc followed by invokestatic: the shape of a constant being fed into
/// a static decryptor call
const STRING_DECRYPT_NEEDLE: [u8; 2] = [0x12, 0xB8];

/// athrow followed by goto: code after an unconditional throw
const UNREACHABLE_NEEDLE: [u8; 2] = [0xBF, 0xA7];

/// getstatic, invokevirtual, ifeq: the shape of a debugger-presence probe
const ANTI_DEBUG_NEEDLE: [u8; 3] = [0xB2, 0xB6, 0x99];

/// tableswitch / lookupswitch opcodes
const SWITCH_OPCODES: [u8; 2] = [0xAA, 0xAB];

/// This many switch opcodes in the scan window suggests a flattened
/// control-flow dispatcher
const SWITCH_DISPATCH_MIN: usize = 3;

/// This many class-file magics suggests classes were split
const CLASS_SPLIT_MIN: usize = 8;

/// Buffers at least this large are assumed big enough for identifier
/// renaming to have been worthwhile
const RENAME_MIN_LEN: usize = 4096;

/// Obfuscation techniques the detectors look for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PatternKind {
    /// String constants routed through a decryptor call
    StringDecryption,
    /// Control flow flattened into switch dispatchers
    SwitchDispatch,
    /// Dead code inserted after unconditional throws
    UnreachableCode,
    /// Classes split across many small class files
    ClassSplitting,
    /// Identifiers renamed to meaningless short names
    IdentifierRenaming,
    /// Debugger-presence probes
    AntiDebug,
}

impl PatternKind {
    /// Stable identifier used in findings and JSON output
    pub fn id(&self) -> &'static str {
        match self {
            Self::StringDecryption => "string-decryption",
            Self::SwitchDispatch => "switch-dispatch",
            Self::UnreachableCode => "unreachable-code",
            Self::ClassSplitting => "class-splitting",
            Self::IdentifierRenaming => "identifier-renaming",
            Self::AntiDebug => "anti-debug",
        }
    }

    /// Human-readable label for reports
    pub fn label(&self) -> &'static str {
        match self {
            Self::StringDecryption => "String decryption",
            Self::SwitchDispatch => "Control-flow switch dispatch",
            Self::UnreachableCode => "Unreachable code insertion",
            Self::ClassSplitting => "Class splitting",
            Self::IdentifierRenaming => "Identifier renaming",
            Self::AntiDebug => "Anti-debug probe",
        }
    }
}

/// A single detector hit with an illustrative code-sample pair
#[derive(Debug, Clone, Serialize)]
pub struct Finding {
    /// Which detector fired
    pub kind: PatternKind,
    /// What the scan actually saw
    pub detail: String,
    /// Canned sample of what the code looks like before obfuscation
    pub original_sample: String,
    /// Canned sample of what it looks like after, seeded per input
    pub obfuscated_sample: String,
}

/// Find the first occurrence of `needle` within the first `window`
/// bytes of `haystack`.
fn find_needle(haystack: &[u8], needle: &[u8], window: usize) -> Option<usize> {
    let bounded = &haystack[..haystack.len().min(window)];
    if needle.is_empty() || bounded.len() < needle.len() {
        return None;
    }
    bounded.windows(needle.len()).position(|w| w == needle)
}

/// Count single-byte `targets` occurrences within the first `window` bytes.
fn count_bytes(haystack: &[u8], targets: &[u8], window: usize) -> usize {
    haystack
        .iter()
        .take(window)
        .filter(|byte| targets.contains(byte))
        .count()
}

/// Run all six detectors over a buffer.
///
/// Findings appear in a fixed order, so repeated calls on the same
/// buffer produce identical output.
pub fn detect_patterns(bytes: &[u8]) -> Vec<Finding> {
    let seed = fingerprint(bytes);
    let mut findings = Vec::new();

    if let Some(offset) = find_needle(bytes, &STRING_DECRYPT_NEEDLE, OPCODE_SCAN_WINDOW) {
        findings.push(make_finding(
            PatternKind::StringDecryption,
            format!("ldc/invokestatic pair at offset {}", offset),
            seed,
        ));
    }

    let switch_hits = count_bytes(bytes, &SWITCH_OPCODES, WIDE_SCAN_WINDOW);
    if switch_hits >= SWITCH_DISPATCH_MIN {
        findings.push(make_finding(
            PatternKind::SwitchDispatch,
            format!("{} tableswitch/lookupswitch opcodes in scan window", switch_hits),
            seed,
        ));
    }

    if let Some(offset) = find_needle(bytes, &UNREACHABLE_NEEDLE, WIDE_SCAN_WINDOW) {
        findings.push(make_finding(
            PatternKind::UnreachableCode,
            format!("athrow/goto sequence at offset {}", offset),
            seed,
        ));
    }

    let magic_hits = count_magic(bytes);
    if magic_hits >= CLASS_SPLIT_MIN {
        findings.push(make_finding(
            PatternKind::ClassSplitting,
            format!("{} class-file magic numbers in buffer", magic_hits),
            seed,
        ));
    }

    if bytes.len() >= RENAME_MIN_LEN {
        findings.push(make_finding(
            PatternKind::IdentifierRenaming,
            format!("{} bytes, large enough for meaningful renaming", bytes.len()),
            seed,
        ));
    }

    if find_needle(bytes, &ANTI_DEBUG_NEEDLE, OPCODE_SCAN_WINDOW).is_some() {
        findings.push(make_finding(
            PatternKind::AntiDebug,
            "getstatic/invokevirtual/ifeq probe sequence found".to_string(),
            seed,
        ));
    }

    findings
}

/// True when a finding of the given kind is present
pub fn has_pattern(findings: &[Finding], kind: PatternKind) -> bool {
    findings.iter().any(|f| f.kind == kind)
}

fn make_finding(kind: PatternKind, detail: String, seed: u32) -> Finding {
    let (original_sample, obfuscated_sample) = sample_pair(kind, seed);
    Finding {
        kind,
        detail,
        original_sample,
        obfuscated_sample,
    }
}

/// Canned before/after code samples keyed by pattern kind.
///
/// The seed ties the obfuscated sample to the analyzed file so two
/// different JARs render visibly different samples.
fn sample_pair(kind: PatternKind, seed: u32) -> (String, String) {
    match kind {
        PatternKind::StringDecryption => (
            r#"String endpoint = "https://api.example.com/v1";"#.to_string(),
            format!(
                "String endpoint = a.b(new byte[]{{ /* 0x{:08x} */ }}, {});",
                seed,
                seed & 0xFF
            ),
        ),
        PatternKind::SwitchDispatch => (
            "if (user.isActive()) {\n    grantAccess(user);\n}".to_string(),
            format!(
                "switch (state ^ 0x{:04x}) {{\n    case 7: state = 19; break;\n    case 19: a.c(o); state = 3; break;\n}}",
                seed & 0xFFFF
            ),
        ),
        PatternKind::UnreachableCode => (
            "return result;".to_string(),
            format!(
                "throw new IllegalStateException();\n// unreachable filler 0x{:x}\nint z = {};",
                seed,
                seed % 97
            ),
        ),
        PatternKind::ClassSplitting => (
            "class OrderService { /* 14 methods */ }".to_string(),
            format!("class a{{}} class b{{}} class c{{}} /* split {} ways */", (seed % 13) + 2),
        ),
        PatternKind::IdentifierRenaming => (
            "public BigDecimal computeMonthlyInterest(Account account)".to_string(),
            format!("public BigDecimal a(a0 a) /* map 0x{:08x} */", seed),
        ),
        PatternKind::AntiDebug => (
            "// no debugger checks".to_string(),
            format!(
                "if (o.a() != 0x{:x}) Runtime.getRuntime().halt({});",
                seed & 0xFFF,
                seed % 256
            ),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Buffer with every needle planted, large enough for the rename
    /// threshold and with enough magics for splitting.
    fn fully_obfuscated_buffer() -> Vec<u8> {
        let mut bytes = vec![0u8; RENAME_MIN_LEN];
        bytes[10..12].copy_from_slice(&STRING_DECRYPT_NEEDLE);
        bytes[100..102].copy_from_slice(&UNREACHABLE_NEEDLE);
        bytes[200..203].copy_from_slice(&ANTI_DEBUG_NEEDLE);
        for i in 0..SWITCH_DISPATCH_MIN {
            bytes[300 + i * 10] = 0xAA;
        }
        for i in 0..CLASS_SPLIT_MIN {
            let at = 1000 + i * 32;
            bytes[at..at + 4].copy_from_slice(&super::super::classes::CLASS_MAGIC);
        }
        bytes
    }

    #[test]
    fn test_all_detectors_fire_on_planted_buffer() {
        let findings = detect_patterns(&fully_obfuscated_buffer());
        for kind in [
            PatternKind::StringDecryption,
            PatternKind::SwitchDispatch,
            PatternKind::UnreachableCode,
            PatternKind::ClassSplitting,
            PatternKind::IdentifierRenaming,
            PatternKind::AntiDebug,
        ] {
            assert!(has_pattern(&findings, kind), "missing {:?}", kind);
        }
    }

    #[test]
    fn test_clean_small_buffer_produces_no_findings() {
        let bytes = vec![0u8; 512];
        assert!(detect_patterns(&bytes).is_empty());
    }

    #[test]
    fn test_detection_is_deterministic() {
        let bytes = fully_obfuscated_buffer();
        let first = detect_patterns(&bytes);
        let second = detect_patterns(&bytes);
        assert_eq!(first.len(), second.len());
        for (a, b) in first.iter().zip(&second) {
            assert_eq!(a.kind, b.kind);
            assert_eq!(a.obfuscated_sample, b.obfuscated_sample);
        }
    }

    #[test]
    fn test_needles_outside_scan_window_are_ignored() {
        let mut bytes = vec![0u8; OPCODE_SCAN_WINDOW + 1000];
        let at = OPCODE_SCAN_WINDOW + 100;
        bytes[at..at + 2].copy_from_slice(&STRING_DECRYPT_NEEDLE);
        let findings = detect_patterns(&bytes);
        assert!(!has_pattern(&findings, PatternKind::StringDecryption));
        // Large buffer still trips the renaming length threshold
        assert!(has_pattern(&findings, PatternKind::IdentifierRenaming));
    }

    #[test]
    fn test_switch_hits_below_threshold_do_not_fire() {
        let mut bytes = vec![0u8; 2048];
        bytes[10] = 0xAA;
        bytes[20] = 0xAB;
        let findings = detect_patterns(&bytes);
        assert!(!has_pattern(&findings, PatternKind::SwitchDispatch));
    }

    #[test]
    fn test_samples_are_seeded_by_content() {
        let mut a = vec![0u8; RENAME_MIN_LEN];
        let mut b = vec![1u8; RENAME_MIN_LEN];
        a[0..2].copy_from_slice(&STRING_DECRYPT_NEEDLE);
        b[0..2].copy_from_slice(&STRING_DECRYPT_NEEDLE);

        let fa = detect_patterns(&a);
        let fb = detect_patterns(&b);
        let sample_a = &fa
            .iter()
            .find(|f| f.kind == PatternKind::StringDecryption)
            .unwrap()
            .obfuscated_sample;
        let sample_b = &fb
            .iter()
            .find(|f| f.kind == PatternKind::StringDecryption)
            .unwrap()
            .obfuscated_sample;
        assert_ne!(sample_a, sample_b);
    }

    #[test]
    fn test_finding_ids_are_stable() {
        assert_eq!(PatternKind::StringDecryption.id(), "string-decryption");
        assert_eq!(PatternKind::AntiDebug.id(), "anti-debug");
    }
}
