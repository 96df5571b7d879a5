//! Enhanced error types with contextual suggestions
//!
//! Provides structured error types that include:
//! - Actionable error messages
//! - Suggested fixes and recovery actions
//! - Documentation links
//! - Proper exit codes for CI/CD

use std::path::PathBuf;
use thiserror::Error;

/// Enhanced jar-guardian errors with contextual suggestions
#[derive(Error, Debug)]
pub enum GuardianError {
    /// Input file has an unsupported extension
    #[error("Unsupported file type: {path}")]
    UnsupportedFile {
        /// Path to the rejected file
        path: PathBuf,
        /// Extensions accepted for this operation
        expected: String,
    },

    /// Input file is empty
    #[error("File is empty: {path}")]
    EmptyFile {
        /// Path to the empty file
        path: PathBuf,
    },

    /// File not found during operation
    #[error("File not found: {path}")]
    FileNotFound {
        /// Path to missing file
        path: PathBuf,
        /// Operation that required the file
        operation: String,
    },

    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// Path to config file
        path: PathBuf,
        #[source]
        /// IO error source
        source: std::io::Error,
    },

    /// Invalid template name
    #[error("Invalid template: '{name}'")]
    InvalidTemplate {
        /// Invalid template name
        name: String,
        /// List of valid template names
        available: Vec<String>,
    },

    /// Mapping file could not be parsed
    #[error("Failed to parse mapping file: {path}")]
    MappingParse {
        /// Path to the mapping file
        path: PathBuf,
        /// What went wrong
        reason: String,
    },

    /// Generic I/O error with context
    #[error("I/O error: {context}")]
    Io {
        /// Context about where the error occurred
        context: String,
        #[source]
        /// IO error source
        source: std::io::Error,
    },
}

impl GuardianError {
    /// Get actionable suggestion for resolving this error.
    ///
    /// # Examples
    ///
    /// ```
    /// use jar_guardian::error::GuardianError;
    /// use std::path::PathBuf;
    ///
    /// let error = GuardianError::UnsupportedFile {
    ///     path: PathBuf::from("app.zip"),
    ///     expected: ".jar".to_string(),
    /// };
    ///
    /// let suggestion = error.suggestion();
    /// assert!(suggestion.is_some());
    /// assert!(suggestion.unwrap().contains(".jar"));
    /// ```
    pub fn suggestion(&self) -> Option<String> {
        match self {
            Self::UnsupportedFile { expected, .. } => Some(format!(
                "Provide a file with one of these extensions: {}",
                expected
            )),
            Self::EmptyFile { path } => Some(format!(
                "{} contains no data. Rebuild the JAR and try again",
                path.display()
            )),
            Self::FileNotFound { path, operation } => Some(format!(
                "Ensure {} exists before running {}",
                path.display(),
                operation
            )),
            Self::ConfigNotFound { .. } => {
                Some("Run 'jar-guardian init' to create a configuration file".to_string())
            }
            Self::InvalidTemplate { available, .. } => Some(format!(
                "Available templates: {}\nRun 'jar-guardian init --template <NAME>' with one of them",
                available.join(", ")
            )),
            Self::MappingParse { reason, .. } => Some(format!(
                "Check that the file is a ProGuard mapping file ('original -> obfuscated' lines): {}",
                reason
            )),
            Self::Io { context, .. } => Some(format!(
                "Check file permissions and that {} is accessible",
                context
            )),
        }
    }

    /// Get documentation URL for this error.
    pub fn docs_url(&self) -> Option<&str> {
        match self {
            Self::ConfigNotFound { .. } | Self::InvalidTemplate { .. } => {
                Some("https://github.com/jar-guardian/jar-guardian#configuration")
            }
            Self::MappingParse { .. } => {
                Some("https://github.com/jar-guardian/jar-guardian#proguard-mapping-files")
            }
            _ => None,
        }
    }

    /// Get appropriate exit code for this error.
    ///
    /// Follows sysexits.h conventions so CI pipelines can distinguish
    /// bad input data from missing files and plain I/O failures.
    ///
    /// # Examples
    ///
    /// ```
    /// use jar_guardian::error::GuardianError;
    /// use std::path::PathBuf;
    ///
    /// let error = GuardianError::FileNotFound {
    ///     path: PathBuf::from("app.jar"),
    ///     operation: "validate".to_string(),
    /// };
    ///
    /// assert_eq!(error.exit_code(), 66); // EX_NOINPUT
    /// ```
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::UnsupportedFile { .. } => 65, // EX_DATAERR
            Self::EmptyFile { .. } => 65,       // EX_DATAERR
            Self::FileNotFound { .. } => 66,    // EX_NOINPUT
            Self::ConfigNotFound { .. } => 66,  // EX_NOINPUT
            Self::InvalidTemplate { .. } => 64, // EX_USAGE
            Self::MappingParse { .. } => 65,    // EX_DATAERR
            Self::Io { .. } => 74,              // EX_IOERR
        }
    }
}

/// Error formatter with colors and structured output
pub struct ErrorFormatter;

impl ErrorFormatter {
    /// Format error with suggestions and documentation links
    pub fn format(error: &anyhow::Error) -> String {
        use console::style;

        let mut output = String::new();

        // Main error message
        output.push_str(&format!("{} {}\n", style("error:").red().bold(), error));

        // Error chain (caused by)
        let mut source = error.source();
        let mut indent = 1;
        while let Some(err) = source {
            output.push_str(&format!(
                "{}{} {}\n",
                "  ".repeat(indent),
                style("caused by:").yellow(),
                err
            ));
            source = err.source();
            indent += 1;
        }

        // Try to downcast to GuardianError for suggestions
        if let Some(g_error) = error.downcast_ref::<GuardianError>() {
            if let Some(suggestion) = g_error.suggestion() {
                output.push_str(&format!(
                    "\n{} {}\n",
                    style("help:").cyan().bold(),
                    suggestion
                ));
            }

            if let Some(docs) = g_error.docs_url() {
                output.push_str(&format!("{} {}\n", style("docs:").blue(), docs));
            }
        }

        output
    }

    /// Get exit code from error
    pub fn exit_code(error: &anyhow::Error) -> i32 {
        if let Some(g_error) = error.downcast_ref::<GuardianError>() {
            g_error.exit_code()
        } else {
            1 // Generic error
        }
    }
}
