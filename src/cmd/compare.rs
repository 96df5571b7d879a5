//! Compare command implementation
//!
//! Handles the `jar-guardian compare` command: byte-level comparison
//! of an original and an obfuscated JAR, with mapping-driven rename
//! details when a ProGuard mapping file is supplied.

use anyhow::Result;
use console::style;
use std::path::Path;

use crate::analyzer::{compare_jars, ComparisonSummary};
use crate::fmt::{format_file_size, CHART};
use crate::infra::{FileSystem, RealFileSystem};
use crate::intake::{self, JarInput};
use crate::mapping::MappingSet;

/// Compare two JARs and print the divergence summary.
///
/// Both files must exist and be non-empty `.jar` archives; a rejected
/// input is an error here, unlike `validate` which records it as a
/// failed test result.
pub fn cmd_compare(
    original: &str,
    obfuscated: &str,
    mapping: Option<&Path>,
    json: bool,
) -> Result<()> {
    cmd_compare_impl(original, obfuscated, mapping, json, &RealFileSystem)
}

fn cmd_compare_impl<FS: FileSystem>(
    original: &str,
    obfuscated: &str,
    mapping: Option<&Path>,
    json: bool,
    fs: &FS,
) -> Result<()> {
    let original = JarInput::load_strict(Path::new(original), "compare", fs)?;
    let obfuscated = JarInput::load_strict(Path::new(obfuscated), "compare", fs)?;

    let mapping_set = match mapping {
        Some(path) => {
            let text = intake::read_mapping_text(path, fs)?;
            Some(MappingSet::parse(&text))
        }
        None => None,
    };

    let summary = compare_jars(&original.bytes, &obfuscated.bytes, mapping_set.as_ref());

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print_summary(&original, &obfuscated, &summary);
    }

    Ok(())
}

fn print_summary(original: &JarInput, obfuscated: &JarInput, summary: &ComparisonSummary) {
    println!("{} {} JAR Comparison", CHART, style("jar-guardian").bold());
    println!();
    println!(
        "  Original:   {} ({}, fingerprint {:08x}, ~{} classes)",
        style(&original.file_name).bold(),
        format_file_size(original.size),
        summary.original_fingerprint,
        summary.original_classes
    );
    println!(
        "  Obfuscated: {} ({}, fingerprint {:08x}, ~{} classes)",
        style(&obfuscated.file_name).bold(),
        format_file_size(obfuscated.size),
        summary.obfuscated_fingerprint,
        summary.obfuscated_classes
    );
    println!();
    println!(
        "  Byte-sample distance: {}",
        style(format!("{}%", summary.distance)).cyan().bold()
    );
    println!(
        "  Estimated divergence: {} differing, {} matching",
        style(summary.result.differences).yellow(),
        style(summary.result.matches).green()
    );

    if !summary.result.unmapped_classes.is_empty() {
        println!();
        println!(
            "  {} classes kept their original name:",
            style(summary.result.unmapped_classes.len()).yellow().bold()
        );
        for class in &summary.result.unmapped_classes {
            println!("    {} {}", style("•").dim(), class);
        }
    }

    if !summary.result.diff_details.is_empty() {
        println!();
        println!(
            "  Renames from mapping file ({}):",
            summary.result.diff_details.len()
        );
        for detail in summary.result.diff_details.iter().take(20) {
            let original = detail.original.as_deref().unwrap_or("?");
            let obfuscated = detail.obfuscated.as_deref().unwrap_or("?");
            println!(
                "    {} {} {} -> {}",
                style("•").dim(),
                style(&detail.class_name).dim(),
                original,
                style(obfuscated).cyan()
            );
        }
        if summary.result.diff_details.len() > 20 {
            println!(
                "    … and {} more",
                summary.result.diff_details.len() - 20
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_compare_with_missing_original_fails() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("missing.jar");
        let present = temp_dir.path().join("present.jar");
        fs::write(&present, [0u8; 1024]).unwrap();

        let result = cmd_compare_impl(
            missing.to_str().unwrap(),
            present.to_str().unwrap(),
            None,
            true,
            &RealFileSystem,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_compare_rejects_non_jar_input() {
        let temp_dir = TempDir::new().unwrap();
        let zip = temp_dir.path().join("app.zip");
        let jar = temp_dir.path().join("app.jar");
        fs::write(&zip, [0u8; 64]).unwrap();
        fs::write(&jar, [0u8; 64]).unwrap();

        let result = cmd_compare_impl(
            zip.to_str().unwrap(),
            jar.to_str().unwrap(),
            None,
            true,
            &RealFileSystem,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_compare_identical_files_succeeds() {
        let temp_dir = TempDir::new().unwrap();
        let a = temp_dir.path().join("a.jar");
        let b = temp_dir.path().join("b.jar");
        fs::write(&a, [7u8; 4096]).unwrap();
        fs::write(&b, [7u8; 4096]).unwrap();

        let result = cmd_compare_impl(
            a.to_str().unwrap(),
            b.to_str().unwrap(),
            None,
            true,
            &RealFileSystem,
        );
        assert!(result.is_ok());
    }

    #[test]
    fn test_compare_with_mapping_file() {
        let temp_dir = TempDir::new().unwrap();
        let a = temp_dir.path().join("a.jar");
        let b = temp_dir.path().join("b.jar");
        fs::write(&a, [7u8; 4096]).unwrap();
        fs::write(&b, [9u8; 4096]).unwrap();

        let mapping = temp_dir.path().join("mapping.txt");
        fs::write(&mapping, "com.Foo -> a:\n    run() -> x\n").unwrap();

        let result = cmd_compare_impl(
            a.to_str().unwrap(),
            b.to_str().unwrap(),
            Some(&mapping),
            false,
            &RealFileSystem,
        );
        assert!(result.is_ok());
    }
}
