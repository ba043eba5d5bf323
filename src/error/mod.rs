//! # Error Module
//!
//! Error types for file comparison.
//!
//! ## Design Principles
//! - **Reject bad input early** - configuration errors surface before any scan work
//! - **Include context** - paths, names, what went wrong
//! - **Recover from bad files** - unreadable files are reported, never fatal

use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error
#[derive(Error, Debug)]
pub enum CompareFilesError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("Read error: {0}")]
    Read(#[from] ReadError),

    #[error("Failed to write output: {0}")]
    Output(String),
}

impl CompareFilesError {
    /// Process exit code for this error.
    ///
    /// Input rejected before running maps to 2, anything else to 1.
    pub fn exit_code(&self) -> u8 {
        match self {
            CompareFilesError::Config(_) => 2,
            CompareFilesError::Read(_) | CompareFilesError::Output(_) => 1,
        }
    }
}

/// Invalid input, detected before any scanning starts
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    #[error("Not a directory: {path}")]
    NotADirectory { path: PathBuf },

    #[error(
        "Invalid algorithm '{name}'. Valid options are: ratio, partial_ratio, token_sort_ratio, token_set_ratio"
    )]
    InvalidAlgorithm { name: String },

    #[error("File selector must not be empty (use '*' to match every file)")]
    EmptySelector,
}

/// A file that could not be opened or read during a scan
#[derive(Error, Debug)]
pub enum ReadError {
    #[error("Cannot read {path}: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ReadError {
    /// Path of the file that failed
    pub fn path(&self) -> &PathBuf {
        match self {
            ReadError::Unreadable { path, .. } => path,
        }
    }
}

/// Convenience Result type alias
pub type Result<T> = std::result::Result<T, CompareFilesError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directory_not_found_includes_path() {
        let error = ConfigError::DirectoryNotFound {
            path: PathBuf::from("/data/reports"),
        };
        let message = error.to_string();
        assert!(message.contains("Directory not found"));
        assert!(message.contains("/data/reports"));
    }

    #[test]
    fn invalid_algorithm_names_all_options() {
        let error = ConfigError::InvalidAlgorithm {
            name: "levenshtein".to_string(),
        };
        let message = error.to_string();
        assert!(message.contains("levenshtein"));
        for option in ["ratio", "partial_ratio", "token_sort_ratio", "token_set_ratio"] {
            assert!(message.contains(option));
        }
    }

    #[test]
    fn unreadable_includes_path_and_cause() {
        let error = ReadError::Unreadable {
            path: PathBuf::from("/data/locked.txt"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        let message = error.to_string();
        assert!(message.contains("/data/locked.txt"));
        assert!(message.contains("denied"));
        assert_eq!(error.path(), &PathBuf::from("/data/locked.txt"));
    }

    #[test]
    fn config_errors_exit_with_rejected_input_code() {
        let error: CompareFilesError = ConfigError::EmptySelector.into();
        assert_eq!(error.exit_code(), 2);

        let error = CompareFilesError::Output("broken pipe".to_string());
        assert_eq!(error.exit_code(), 1);
    }
}
