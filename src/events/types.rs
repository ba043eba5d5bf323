//! Event type definitions for progress reporting.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// All events emitted by the comparison engines
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    /// File discovery events
    Scan(ScanEvent),
    /// Fingerprinting events (identical mode)
    Fingerprint(FingerprintEvent),
    /// Pairwise scoring events (similarity mode)
    Compare(CompareEvent),
    /// Run-level events
    Pipeline(PipelineEvent),
}

/// Events during file discovery
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ScanEvent {
    /// Discovery has started
    Started { root: PathBuf, selector: String },
    /// A matching file was found
    FileFound { path: PathBuf },
    /// An entry could not be visited but the walk continues
    Error { path: PathBuf, message: String },
    /// Discovery completed
    Completed { total_files: usize },
}

/// Events during fingerprinting
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum FingerprintEvent {
    /// Fingerprinting has started
    Started { total_files: usize },
    /// Progress update
    Progress(FingerprintProgress),
    /// A file could not be read; it will never match anything
    Unreadable { path: PathBuf, message: String },
    /// Fingerprinting completed
    Completed {
        fingerprinted: usize,
        unreadable: usize,
    },
}

/// Progress information during fingerprinting
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FingerprintProgress {
    /// Files fingerprinted so far
    pub completed: usize,
    /// Total files to fingerprint
    pub total: usize,
    /// File just finished
    pub current_path: PathBuf,
}

/// Events during pairwise similarity scoring
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum CompareEvent {
    /// Scoring has started
    Started {
        total_files: usize,
        total_combinations: usize,
    },
    /// A file could not be read; it is compared as empty text
    Unreadable { path: PathBuf, message: String },
    /// Progress update
    Progress(CompareProgress),
    /// Scoring completed
    Completed {
        comparisons: usize,
        pairs_kept: usize,
    },
}

/// Progress information during scoring
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompareProgress {
    /// Pairs scored so far
    pub comparisons_completed: usize,
    /// Total pairs to score
    pub total_comparisons: usize,
}

/// Run-level events
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum PipelineEvent {
    /// A run has started
    Started,
    /// Moving to a new phase
    PhaseChanged { phase: PipelinePhase },
    /// The run completed
    Completed { duration_ms: u64 },
    /// The run was cancelled; results emitted so far remain valid
    Cancelled,
}

/// Phases of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PipelinePhase {
    Scanning,
    Fingerprinting,
    Loading,
    Comparing,
}

impl std::fmt::Display for PipelinePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PipelinePhase::Scanning => write!(f, "Scanning"),
            PipelinePhase::Fingerprinting => write!(f, "Fingerprinting"),
            PipelinePhase::Loading => write!(f, "Loading"),
            PipelinePhase::Comparing => write!(f, "Comparing"),
        }
    }
}
