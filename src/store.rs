//! Validation history persistence
//!
//! Completed runs are appended to `.jar-guardian/validations.json`,
//! newest first, capped at 100 records. The store is a data sink:
//! callers treat a failed save as a warning, never as a run failure.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use uuid::Uuid;

use crate::config::ConfigFile;
use crate::fmt::unix_timestamp;
use crate::infra::{FileSystem, RealFileSystem};
use crate::runner::TestResult;

/// One persisted validation run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationRecord {
    /// Generated record identifier
    pub id: String,
    /// Unix timestamp (seconds) when the run finished
    pub timestamp: String,
    /// Name of the validated JAR
    pub file_name: String,
    /// Size of the validated JAR in bytes
    pub file_size: u64,
    /// Config snapshot the run executed under
    pub test_config: ConfigFile,
    /// Every test result the run produced
    pub results: Vec<TestResult>,
}

impl ValidationRecord {
    /// Create a record for a finished run, minting its id and timestamp.
    pub fn new(
        file_name: &str,
        file_size: u64,
        test_config: ConfigFile,
        results: Vec<TestResult>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            timestamp: unix_timestamp(),
            file_name: file_name.to_string(),
            file_size,
            test_config,
            results,
        }
    }
}

/// Insert-only store of validation records
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationStore {
    /// Persisted records, newest first
    pub records: Vec<ValidationRecord>,
}

impl ValidationStore {
    const STORE_DIR: &'static str = ".jar-guardian";
    const STORE_FILE: &'static str = "validations.json";
    const MAX_RECORDS: usize = 100;

    /// Create a new empty store
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// Load the store from a project root
    pub fn load(project_root: &Path) -> Result<Self> {
        Self::load_with_fs(project_root, &RealFileSystem)
    }

    /// Load the store with a custom filesystem implementation
    pub fn load_with_fs<FS: FileSystem>(project_root: &Path, fs: &FS) -> Result<Self> {
        let store_path = Self::store_path(project_root);

        if !store_path.exists() {
            return Ok(Self::new());
        }

        let contents = fs
            .read_to_string(&store_path)
            .context("Failed to read validation history")?;

        let store: ValidationStore =
            serde_json::from_str(&contents).context("Failed to parse validation history")?;

        Ok(store)
    }

    /// Save the store to a project root
    pub fn save(&self, project_root: &Path) -> Result<()> {
        self.save_with_fs(project_root, &RealFileSystem)
    }

    /// Save the store with a custom filesystem implementation
    pub fn save_with_fs<FS: FileSystem>(&self, project_root: &Path, fs: &FS) -> Result<()> {
        let store_dir = project_root.join(Self::STORE_DIR);
        let store_path = Self::store_path(project_root);

        fs.create_dir_all(&store_dir)
            .context("Failed to create .jar-guardian directory")?;

        let contents =
            serde_json::to_string_pretty(self).context("Failed to serialize validation history")?;

        fs.write(&store_path, contents)
            .context("Failed to write validation history")?;

        Ok(())
    }

    /// Insert a record at the front (newest first), returning its id.
    ///
    /// Records past the cap fall off the old end.
    pub fn append(&mut self, record: ValidationRecord) -> String {
        let id = record.id.clone();
        self.records.insert(0, record);

        if self.records.len() > Self::MAX_RECORDS {
            self.records.truncate(Self::MAX_RECORDS);
        }

        id
    }

    /// Most recently appended record
    pub fn latest(&self) -> Option<&ValidationRecord> {
        self.records.first()
    }

    fn store_path(project_root: &Path) -> PathBuf {
        project_root.join(Self::STORE_DIR).join(Self::STORE_FILE)
    }
}

impl Default for ValidationStore {
    fn default() -> Self {
        Self::new()
    }
}
