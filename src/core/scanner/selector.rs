//! Selector parsing and matching.

use crate::error::ConfigError;
use std::fmt;
use std::path::Path;

/// Selectors that match every file regardless of extension
const MATCH_EVERYTHING: [&str; 4] = [".", "*", "*.*", ".*"];

/// Which files a scan should pick up.
///
/// `.txt`, `*.txt` and `.TXT` all select the same files: the comparison is
/// against the file's extension, lower-cased, with its leading dot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    raw: String,
    rule: MatchRule,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum MatchRule {
    Everything,
    /// Lower-cased extension including the leading dot
    Extension(String),
}

impl Selector {
    /// Parse a selector string.
    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ConfigError::EmptySelector);
        }

        let rule = if MATCH_EVERYTHING.contains(&trimmed) {
            MatchRule::Everything
        } else {
            let lowered = trimmed.to_lowercase();
            let normalized = match lowered.strip_prefix("*.") {
                Some(rest) => format!(".{rest}"),
                None => lowered,
            };
            MatchRule::Extension(normalized)
        };

        Ok(Self {
            raw: trimmed.to_string(),
            rule,
        })
    }

    /// A selector that matches every file
    pub fn everything() -> Self {
        Self {
            raw: "*".to_string(),
            rule: MatchRule::Everything,
        }
    }

    /// Whether this selector matches every file
    pub fn matches_everything(&self) -> bool {
        matches!(self.rule, MatchRule::Everything)
    }

    /// The selector as the user wrote it (trimmed)
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Check a file path against the selector.
    ///
    /// Only the name is inspected; the caller is responsible for
    /// excluding directories.
    pub fn matches(&self, path: &Path) -> bool {
        match &self.rule {
            MatchRule::Everything => true,
            MatchRule::Extension(wanted) => match path.extension() {
                Some(ext) if !ext.is_empty() => {
                    *wanted == format!(".{}", ext.to_string_lossy().to_lowercase())
                }
                _ => false,
            },
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl std::str::FromStr for Selector {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
