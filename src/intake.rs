//! File intake and extension validation
//!
//! The first validation step mirrors what a drag-and-drop surface can
//! check without opening the archive: the file must carry the `.jar`
//! extension and must not be empty. No content-type sniffing is done
//! beyond the filename suffix.

use std::path::{Path, PathBuf};

use crate::error::GuardianError;
use crate::infra::FileSystem;

/// Extensions accepted for JAR inputs
pub const JAR_EXTENSIONS: [&str; 1] = ["jar"];

/// Extensions accepted for ProGuard mapping files
pub const MAPPING_EXTENSIONS: [&str; 2] = ["txt", "map"];

/// Why a candidate file was rejected at intake
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntakeIssue {
    /// Zero-length file
    Empty,
    /// Filename does not end in `.jar`
    NotAJar,
}

impl IntakeIssue {
    /// Human-readable rejection message, used verbatim in the failed
    /// `file-analysis` test result.
    pub fn message(&self) -> &'static str {
        match self {
            Self::Empty => "The file is empty",
            Self::NotAJar => "The file does not have the .jar extension",
        }
    }
}

/// Check a candidate JAR by name and size only.
///
/// Emptiness wins over a bad extension when both apply, matching the
/// order the messages are surfaced in the validation run.
///
/// # Examples
///
/// ```
/// use jar_guardian::intake::{inspect, IntakeIssue};
///
/// assert!(inspect("app.jar", 1024).is_ok());
/// assert_eq!(inspect("app.zip", 1024), Err(IntakeIssue::NotAJar));
/// assert_eq!(inspect("app.jar", 0), Err(IntakeIssue::Empty));
/// ```
pub fn inspect(file_name: &str, size: u64) -> Result<(), IntakeIssue> {
    if size == 0 {
        return Err(IntakeIssue::Empty);
    }
    if !has_extension(Path::new(file_name), &JAR_EXTENSIONS) {
        return Err(IntakeIssue::NotAJar);
    }
    Ok(())
}

/// True when the path's extension matches one of `accepted`
/// (ASCII case-insensitive).
pub fn has_extension(path: &Path, accepted: &[&str]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| accepted.iter().any(|a| ext.eq_ignore_ascii_case(a)))
        .unwrap_or(false)
}

/// A JAR file loaded into memory
#[derive(Debug, Clone)]
pub struct JarInput {
    /// Original path the file was read from
    pub path: PathBuf,
    /// Bare file name, used in results and report headers
    pub file_name: String,
    /// File size in bytes
    pub size: u64,
    /// Raw file contents
    pub bytes: Vec<u8>,
}

impl JarInput {
    /// Read a file without judging it.
    ///
    /// Extension and emptiness are left for the validation run, which
    /// reports them as a failed test result rather than an error.
    pub fn read<FS: FileSystem>(
        path: &Path,
        operation: &str,
        fs: &FS,
    ) -> Result<Self, GuardianError> {
        let bytes = match fs.read(path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(GuardianError::FileNotFound {
                    path: path.to_path_buf(),
                    operation: operation.to_string(),
                });
            }
            Err(e) => {
                return Err(GuardianError::Io {
                    context: format!("reading {}", path.display()),
                    source: e,
                });
            }
        };

        Ok(Self {
            path: path.to_path_buf(),
            file_name: file_name_of(path),
            size: bytes.len() as u64,
            bytes,
        })
    }

    /// Read a file and require it to be a non-empty `.jar`.
    ///
    /// Used by operations like `compare` that have no report to park a
    /// rejection in.
    pub fn load_strict<FS: FileSystem>(
        path: &Path,
        operation: &str,
        fs: &FS,
    ) -> Result<Self, GuardianError> {
        let input = Self::read(path, operation, fs)?;

        match inspect(&input.file_name, input.size) {
            Ok(()) => Ok(input),
            Err(IntakeIssue::Empty) => Err(GuardianError::EmptyFile {
                path: path.to_path_buf(),
            }),
            Err(IntakeIssue::NotAJar) => Err(GuardianError::UnsupportedFile {
                path: path.to_path_buf(),
                expected: ".jar".to_string(),
            }),
        }
    }
}

/// Read a ProGuard mapping file as text, requiring a `.txt` or `.map`
/// extension.
pub fn read_mapping_text<FS: FileSystem>(path: &Path, fs: &FS) -> Result<String, GuardianError> {
    if !has_extension(path, &MAPPING_EXTENSIONS) {
        return Err(GuardianError::UnsupportedFile {
            path: path.to_path_buf(),
            expected: ".txt, .map".to_string(),
        });
    }

    match fs.read_to_string(path) {
        Ok(text) => Ok(text),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(GuardianError::FileNotFound {
            path: path.to_path_buf(),
            operation: "mapping".to_string(),
        }),
        Err(e) => Err(GuardianError::Io {
            context: format!("reading {}", path.display()),
            source: e,
        }),
    }
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
