//! Running statistics over kept similarity scores.

use serde::Serialize;

/// Number of unordered pairs among `n` files
pub fn combinations(n: usize) -> usize {
    n.saturating_sub(1) * n / 2
}

/// Accumulates min/max/average over the scores of kept pairs.
///
/// Only pairs that made it into the output are recorded, so zero and
/// incomparable pairs never affect the statistics.
#[derive(Debug, Clone, Default)]
pub struct SimilarityStats {
    count: usize,
    sum: u64,
    min: Option<u8>,
    max: Option<u8>,
}

impl SimilarityStats {
    /// Empty statistics
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one kept score
    pub fn record(&mut self, score: u8) {
        self.count += 1;
        self.sum += u64::from(score);
        self.min = Some(self.min.map_or(score, |m| m.min(score)));
        self.max = Some(self.max.map_or(score, |m| m.max(score)));
    }

    /// Number of recorded scores
    pub fn count(&self) -> usize {
        self.count
    }

    /// Produce the final summary for a run over `files` files
    pub fn finish(&self, files: usize) -> SimilaritySummary {
        SimilaritySummary {
            files,
            combinations: combinations(files),
            pair_count: self.count,
            min_similarity: self.min,
            max_similarity: self.max,
            average_similarity: (self.count > 0).then(|| self.sum as f64 / self.count as f64),
        }
    }
}

/// Aggregate figures for a similarity run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimilaritySummary {
    /// Files matching the selector
    pub files: usize,
    /// Unordered pairs among those files
    pub combinations: usize,
    /// Pairs kept (score above zero)
    pub pair_count: usize,
    /// Lowest kept score
    pub min_similarity: Option<u8>,
    /// Highest kept score
    pub max_similarity: Option<u8>,
    /// Mean of kept scores
    pub average_similarity: Option<f64>,
}

impl SimilaritySummary {
    /// Average rounded to the nearest whole percent
    pub fn rounded_average(&self) -> Option<u8> {
        self.average_similarity.map(|avg| avg.round() as u8)
    }
}
