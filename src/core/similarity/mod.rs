//! # Similarity Module
//!
//! Scores how similar two texts are, from 0 (nothing in common) to 100
//! (identical).
//!
//! ## Algorithms
//! | Name | Compares |
//! |------|----------|
//! | `ratio` | the full strings |
//! | `partial_ratio` | the shorter string against its best-matching window in the longer |
//! | `token_sort_ratio` | the strings after sorting their words |
//! | `token_set_ratio` | shared and unique word sets |
//!
//! All four are built on a normalized Indel distance, computed from a
//! bit-parallel longest common subsequence.

pub mod fuzz;
mod lcs;

use crate::error::{ConfigError, ReadError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// The available similarity algorithms
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    /// Edit-distance similarity of the full strings
    #[default]
    Ratio,
    /// Best-matching substring similarity
    PartialRatio,
    /// `ratio` after sorting whitespace-separated tokens
    TokenSortRatio,
    /// Token set intersection and differences
    TokenSetRatio,
}

impl Algorithm {
    /// Every algorithm, in the order they are documented
    pub const ALL: [Algorithm; 4] = [
        Algorithm::Ratio,
        Algorithm::PartialRatio,
        Algorithm::TokenSortRatio,
        Algorithm::TokenSetRatio,
    ];

    /// The name used to select this algorithm
    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::Ratio => "ratio",
            Algorithm::PartialRatio => "partial_ratio",
            Algorithm::TokenSortRatio => "token_sort_ratio",
            Algorithm::TokenSetRatio => "token_set_ratio",
        }
    }

    fn apply(&self, a: &str, b: &str) -> u8 {
        match self {
            Algorithm::Ratio => fuzz::ratio(a, b),
            Algorithm::PartialRatio => fuzz::partial_ratio(a, b),
            Algorithm::TokenSortRatio => fuzz::token_sort_ratio(a, b),
            Algorithm::TokenSetRatio => fuzz::token_set_ratio(a, b),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        Algorithm::ALL
            .into_iter()
            .find(|algorithm| algorithm.name() == name)
            .ok_or_else(|| ConfigError::InvalidAlgorithm {
                name: s.to_string(),
            })
    }
}

/// Scores text pairs with one fixed algorithm.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextSimilarityScorer {
    algorithm: Algorithm,
}

impl TextSimilarityScorer {
    /// Create a scorer from an algorithm name.
    ///
    /// Fails for anything other than the four known names.
    pub fn new(name: &str) -> Result<Self, ConfigError> {
        Ok(Self::with_algorithm(name.parse()?))
    }

    /// Create a scorer for an already-parsed algorithm
    pub fn with_algorithm(algorithm: Algorithm) -> Self {
        Self { algorithm }
    }

    /// The algorithm in use
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Score two texts.
    ///
    /// Returns `None` when both texts are empty: there is nothing to compare.
    pub fn score(&self, a: &str, b: &str) -> Option<u8> {
        if a.is_empty() && b.is_empty() {
            return None;
        }
        Some(self.algorithm.apply(a, b))
    }
}

/// Read a file as text for comparison.
///
/// Content that is not valid UTF-8 comes back as an empty string; only
/// I/O failures are errors.
pub fn read_text(path: &Path) -> Result<String, ReadError> {
    let bytes = std::fs::read(path).map_err(|source| ReadError::Unreadable {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(String::from_utf8(bytes).unwrap_or_default())
}
