//! Configuration file loading and saving

use super::file::{ConfigFile, CONFIG_FILE_NAME};
use crate::infra::{FileSystem, RealFileSystem};
use anyhow::{Context, Result};
use std::path::Path;

/// Handles loading and saving configuration files
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config from .jar-guardian.toml in the given directory
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use jar_guardian::config::ConfigLoader;
    /// use std::path::Path;
    ///
    /// let config = ConfigLoader::load(Path::new("."))?;
    /// println!("string encryption check: {}", config.obfuscation.string_encryption);
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    pub fn load(project_root: &Path) -> Result<ConfigFile> {
        Self::load_with_fs(project_root, &RealFileSystem)
    }

    /// Load config with a custom filesystem implementation
    pub fn load_with_fs<FS: FileSystem>(project_root: &Path, fs: &FS) -> Result<ConfigFile> {
        let config_path = project_root.join(CONFIG_FILE_NAME);

        // Read file atomically - no TOCTOU race window
        let contents = match fs.read_to_string(&config_path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                // Return default config if file doesn't exist
                return Ok(ConfigFile::default());
            }
            Err(e) => {
                return Err(e).context("Failed to read .jar-guardian.toml");
            }
        };

        let config: ConfigFile =
            toml_edit::de::from_str(&contents).context("Failed to parse .jar-guardian.toml")?;

        config
            .validate()
            .context("Invalid jar-guardian configuration")?;

        Ok(config)
    }

    /// Save config to .jar-guardian.toml in the given directory
    pub fn save(config: &ConfigFile, project_root: &Path) -> Result<()> {
        Self::save_with_fs(config, project_root, &RealFileSystem)
    }

    /// Save config with a custom filesystem implementation
    pub fn save_with_fs<FS: FileSystem>(
        config: &ConfigFile,
        project_root: &Path,
        fs: &FS,
    ) -> Result<()> {
        let config_path = project_root.join(CONFIG_FILE_NAME);

        let contents =
            toml_edit::ser::to_string_pretty(config).context("Failed to serialize config")?;

        fs.write(&config_path, contents)
            .context("Failed to write .jar-guardian.toml")?;

        Ok(())
    }

    /// Check if config file exists in project
    pub fn exists(project_root: &Path) -> bool {
        project_root.join(CONFIG_FILE_NAME).exists()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_returns_defaults_when_file_missing() {
        let dir = TempDir::new().unwrap();
        let config = ConfigLoader::load(dir.path()).unwrap();
        assert!(config.obfuscation.class_name_obfuscation);
        assert!(!ConfigLoader::exists(dir.path()));
    }

    #[test]
    fn test_save_then_load_round_trips() {
        let dir = TempDir::new().unwrap();

        let mut config = ConfigFile::default();
        config.obfuscation.watermark_check = true;
        config.security.anti_debug = true;
        ConfigLoader::save(&config, dir.path()).unwrap();

        assert!(ConfigLoader::exists(dir.path()));
        let loaded = ConfigLoader::load(dir.path()).unwrap();
        assert!(loaded.obfuscation.watermark_check);
        assert!(loaded.security.anti_debug);
    }

    #[test]
    fn test_load_rejects_malformed_toml() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE_NAME), "[obfuscation\noops").unwrap();

        let err = ConfigLoader::load(dir.path()).unwrap_err();
        assert!(err.to_string().contains("parse"));
    }

    #[test]
    fn test_load_rejects_invalid_constraints() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            "[functional]\nenabled = true\ntimeout-seconds = 0\n",
        )
        .unwrap();

        let err = ConfigLoader::load(dir.path()).unwrap_err();
        assert!(err.to_string().contains("Invalid"));
    }
}
