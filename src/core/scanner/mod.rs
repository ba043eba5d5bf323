//! # Scanner Module
//!
//! Discovers the files a comparison run works on.
//!
//! ## Selectors
//! - `.`, `*`, `*.*`, `.*` - every file
//! - `.txt`, `*.txt`, `.TXT` - files whose extension is `txt` in any case
//!
//! ## Example
//! ```rust,ignore
//! use comparefiles::core::scanner::{FileSelector, Selector};
//!
//! let selector = FileSelector::new("/data/notes", Selector::parse(".txt")?);
//! for path in selector.files() {
//!     println!("{}", path.display());
//! }
//! ```

mod selector;
mod walker;

pub use selector::Selector;
pub use walker::{FileSelector, SelectedFiles};

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// A discovered file
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FileRecord {
    /// Absolute path to the file
    pub absolute_path: PathBuf,
    /// Path relative to the scan root, for display
    pub relative_path: PathBuf,
}

impl FileRecord {
    /// Build a record for `path`, found under `root`.
    ///
    /// If `path` is not under `root` the relative path is the full path.
    pub fn new(path: PathBuf, root: &Path) -> Self {
        let relative_path = path
            .strip_prefix(root)
            .map(Path::to_path_buf)
            .unwrap_or_else(|_| path.clone());

        Self {
            absolute_path: path,
            relative_path,
        }
    }

    /// The path to show: absolute or relative to the root
    pub fn display_path(&self, full: bool) -> &Path {
        if full {
            &self.absolute_path
        } else {
            &self.relative_path
        }
    }
}

/// Configuration for the directory walk
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Whether to follow symbolic links into directories
    pub follow_symlinks: bool,
    /// Whether to include hidden files and directories
    pub include_hidden: bool,
    /// Maximum directory depth (None = unlimited)
    pub max_depth: Option<usize>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            follow_symlinks: false,
            include_hidden: true,
            max_depth: None,
        }
    }
}

/// Check that `directory` exists and is a directory, and make it absolute.
///
/// Engines call this before any scan work so a bad directory is rejected
/// without producing partial output.
pub fn resolve_root(directory: &Path) -> Result<PathBuf, ConfigError> {
    if !directory.exists() {
        return Err(ConfigError::DirectoryNotFound {
            path: directory.to_path_buf(),
        });
    }
    if !directory.is_dir() {
        return Err(ConfigError::NotADirectory {
            path: directory.to_path_buf(),
        });
    }

    Ok(directory
        .canonicalize()
        .unwrap_or_else(|_| directory.to_path_buf()))
}
