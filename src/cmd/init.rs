//! Init command implementation
//!
//! Handles the `jar-guardian init` command which creates a
//! configuration file from a template (minimal, standard, strict).

use anyhow::Result;
use console::style;
use std::env;
use std::path::Path;

use crate::config;
use crate::fmt::{CHECKMARK, INFO, ROCKET, SPARKLES, WARNING};
use crate::infra::{FileSystem, RealFileSystem};

/// Initialize jar-guardian configuration from a template
///
/// Creates a `.jar-guardian.toml` configuration file using one of the
/// predefined templates (minimal, standard, strict).
pub fn cmd_init(template: &str) -> Result<()> {
    let project_root = env::current_dir()?;
    cmd_init_impl(template, &project_root, &RealFileSystem)
}

fn cmd_init_impl<FS: FileSystem>(template: &str, project_root: &Path, fs: &FS) -> Result<()> {
    println!(
        "{} {} Initializing jar-guardian",
        ROCKET,
        style("jar-guardian init").bold()
    );
    println!();

    if config::ConfigLoader::exists(project_root) {
        println!(
            "{} Config file already exists: {}",
            WARNING,
            style(config::CONFIG_FILE_NAME).cyan()
        );
        println!("   Delete it first or edit manually to update.");
        return Ok(());
    }

    let template_obj = config::Template::get(template).ok_or_else(|| {
        crate::error::GuardianError::InvalidTemplate {
            name: template.to_string(),
            available: config::Template::names(),
        }
    })?;

    println!(
        "{} Selected template: {}",
        SPARKLES,
        style(&template_obj.name).bold().cyan()
    );
    println!("   {}", style(&template_obj.description).dim());
    println!();

    let cfg = &template_obj.config;
    println!("{}  Template Configuration:", INFO);
    println!("   {} Obfuscation checks:", style("•").dim());
    println!(
        "      class-name-obfuscation = {}",
        style(cfg.obfuscation.class_name_obfuscation).green()
    );
    println!(
        "      string-encryption = {}",
        style(cfg.obfuscation.string_encryption).green()
    );
    println!(
        "      control-flow-obfuscation = {}",
        style(cfg.obfuscation.control_flow_obfuscation).green()
    );
    println!(
        "      watermark-check = {}",
        style(cfg.obfuscation.watermark_check).green()
    );
    println!("   {} Security checks:", style("•").dim());
    println!("      enabled = {}", style(cfg.security.enabled).green());
    println!(
        "      decompilation-protection = {}",
        style(cfg.security.decompilation_protection).green()
    );
    println!(
        "      anti-debug = {}",
        style(cfg.security.anti_debug).green()
    );
    println!();

    config::ConfigLoader::save_with_fs(cfg, project_root, fs)?;

    println!(
        "{} Created {}",
        CHECKMARK,
        style(config::CONFIG_FILE_NAME).cyan().bold()
    );
    println!();
    println!("{}  Next Steps:", INFO);
    println!(
        "   1. Review and customize {} if needed",
        config::CONFIG_FILE_NAME
    );
    println!(
        "   2. Run {} to validate an obfuscated build",
        style("jar-guardian validate <FILE>").cyan()
    );
    println!(
        "   3. Run {} to inspect a ProGuard mapping file",
        style("jar-guardian mapping <FILE>").cyan()
    );
    println!();

    println!("{}  Available Templates:", INFO);
    for tmpl in config::Template::all() {
        let indicator = if tmpl.name == template { "→" } else { " " };
        println!(
            "   {} {} - {}",
            style(indicator).cyan().bold(),
            style(&tmpl.name).bold(),
            style(&tmpl.description).dim()
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_init_creates_config_file() {
        let temp_dir = TempDir::new().unwrap();

        cmd_init_impl("standard", temp_dir.path(), &RealFileSystem).unwrap();

        assert!(temp_dir.path().join(config::CONFIG_FILE_NAME).exists());
        let loaded = config::ConfigLoader::load(temp_dir.path()).unwrap();
        assert!(loaded.obfuscation.class_name_obfuscation);
    }

    #[test]
    fn test_init_with_unknown_template_fails() {
        let temp_dir = TempDir::new().unwrap();

        let result = cmd_init_impl("extreme", temp_dir.path(), &RealFileSystem);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("extreme"));
    }

    #[test]
    fn test_init_does_not_overwrite_existing_config() {
        let temp_dir = TempDir::new().unwrap();

        cmd_init_impl("strict", temp_dir.path(), &RealFileSystem).unwrap();
        let first = std::fs::read_to_string(temp_dir.path().join(config::CONFIG_FILE_NAME)).unwrap();

        // Second init with a different template must leave the file alone
        cmd_init_impl("minimal", temp_dir.path(), &RealFileSystem).unwrap();
        let second =
            std::fs::read_to_string(temp_dir.path().join(config::CONFIG_FILE_NAME)).unwrap();
        assert_eq!(first, second);
    }
}
