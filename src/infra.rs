//! Infrastructure traits for abstracting filesystem access.
//!
//! Provides a trait abstraction over the filesystem so intake, config
//! loading, and the validation store can be exercised against in-memory
//! implementations in tests.

use std::fs::Metadata;
use std::io;
use std::path::Path;

/// Trait for abstracting filesystem operations.
///
/// This trait allows for dependency injection of filesystem operations,
/// making code more testable and allowing for alternative implementations
/// (e.g., in-memory filesystems for testing).
pub trait FileSystem {
    /// Read the entire contents of a file into a byte vector.
    fn read(&self, path: &Path) -> io::Result<Vec<u8>>;

    /// Read the entire contents of a file into a string.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Write a slice of bytes to a file.
    fn write(&self, path: &Path, contents: impl AsRef<[u8]>) -> io::Result<()>;

    /// Create a directory and all missing parent directories.
    fn create_dir_all(&self, path: &Path) -> io::Result<()>;

    /// Get metadata for a file or directory.
    fn metadata(&self, path: &Path) -> io::Result<Metadata>;
}

/// Real filesystem implementation that delegates to std::fs.
#[derive(Clone, Copy)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        std::fs::read(path)
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn write(&self, path: &Path, contents: impl AsRef<[u8]>) -> io::Result<()> {
        std::fs::write(path, contents)
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        std::fs::create_dir_all(path)
    }

    fn metadata(&self, path: &Path) -> io::Result<Metadata> {
        std::fs::metadata(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_real_filesystem_round_trips_bytes() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("blob.bin");

        let fs = RealFileSystem;
        fs.write(&path, [0xCA, 0xFE, 0xBA, 0xBE]).unwrap();

        assert_eq!(fs.read(&path).unwrap(), vec![0xCA, 0xFE, 0xBA, 0xBE]);
        assert_eq!(fs.metadata(&path).unwrap().len(), 4);
    }

    #[test]
    fn test_real_filesystem_read_missing_file_is_not_found() {
        let dir = TempDir::new().unwrap();
        let err = RealFileSystem
            .read(&dir.path().join("missing.jar"))
            .unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::NotFound);
    }
}
