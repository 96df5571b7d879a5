//! Mapping command implementation
//!
//! Handles the `jar-guardian mapping` command: parses a ProGuard
//! mapping file and prints rename statistics.

use anyhow::Result;
use console::style;
use std::path::Path;

use crate::fmt::MICROSCOPE;
use crate::infra::{FileSystem, RealFileSystem};
use crate::intake;
use crate::mapping::MappingSet;

/// Parse a mapping file and print class/method/field rename counts.
pub fn cmd_mapping(file: &str, json: bool) -> Result<()> {
    cmd_mapping_impl(file, json, &RealFileSystem)
}

fn cmd_mapping_impl<FS: FileSystem>(file: &str, json: bool, fs: &FS) -> Result<()> {
    let text = intake::read_mapping_text(Path::new(file), fs)?;
    let mapping = MappingSet::parse(&text);

    if json {
        println!("{}", serde_json::to_string_pretty(&mapping)?);
        return Ok(());
    }

    println!(
        "{} {} Mapping Analysis: {}",
        MICROSCOPE,
        style("jar-guardian").bold(),
        style(file).cyan()
    );
    println!();

    if mapping.is_empty() {
        println!("  {}", style("No mappings found").yellow());
        return Ok(());
    }

    println!(
        "  Classes renamed: {}",
        style(mapping.classes.len()).green().bold()
    );
    println!(
        "  Methods renamed: {}",
        style(mapping.methods.len()).green()
    );
    println!("  Fields renamed:  {}", style(mapping.fields.len()).green());

    if !mapping.unmapped_classes.is_empty() {
        println!();
        println!(
            "  {} classes kept their original name:",
            style(mapping.unmapped_classes.len()).yellow().bold()
        );
        for class in &mapping.unmapped_classes {
            println!("    {} {}", style("•").dim(), class);
        }
    }

    if mapping.skipped_lines > 0 {
        println!();
        println!(
            "  {} malformed line(s) skipped",
            style(mapping.skipped_lines).dim()
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_mapping_requires_known_extension() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("mapping.bin");
        fs::write(&path, "com.Foo -> a:").unwrap();

        let result = cmd_mapping_impl(path.to_str().unwrap(), true, &RealFileSystem);
        assert!(result.is_err());
    }

    #[test]
    fn test_mapping_missing_file_fails() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing.txt");

        let result = cmd_mapping_impl(path.to_str().unwrap(), true, &RealFileSystem);
        assert!(result.is_err());
    }

    #[test]
    fn test_mapping_parses_and_prints() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("mapping.map");
        fs::write(
            &path,
            "com.Foo -> a:\n    bar() -> b\n    field -> f\ncom.Keep -> com.Keep:\n",
        )
        .unwrap();

        let result = cmd_mapping_impl(path.to_str().unwrap(), false, &RealFileSystem);
        assert!(result.is_ok());
    }
}
