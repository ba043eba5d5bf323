//! # Matrix Module
//!
//! Scores every unordered pair of text files.
//!
//! ## How It Works
//! 1. Discover files matching the selector
//! 2. Load each file's text once (unreadable or binary files count as empty)
//! 3. Score all `n * (n - 1) / 2` pairs with the chosen algorithm
//! 4. Keep pairs scoring above zero and emit them
//!
//! ## Output Ordering
//! | Ordering | Scoring | Emission |
//! |----------|---------|----------|
//! | `Streaming` | sequential | each pair as soon as it is scored, in pair order |
//! | `Sorted` | parallel (rayon) | after all pairs, by descending score, ties in pair order |

mod stats;

pub use stats::{combinations, SimilaritySummary, SimilarityStats};

use crate::core::cancel::CancellationToken;
use crate::core::scanner::{resolve_root, FileRecord, FileSelector, ScanConfig, Selector};
use crate::core::similarity::{read_text, Algorithm, TextSimilarityScorer};
use crate::error::{CompareFilesError, ConfigError};
use crate::events::{
    null_sender, CompareEvent, CompareProgress, Event, EventSender, PipelineEvent, PipelinePhase,
    ScanEvent,
};
use rayon::prelude::*;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

/// Selector used when none is given
pub const DEFAULT_SELECTOR: &str = ".txt";

/// How kept pairs are emitted
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputOrdering {
    /// Emit each pair as soon as it is scored
    #[default]
    Streaming,
    /// Emit all pairs at the end, highest score first
    Sorted,
}

/// Two files and their similarity
#[derive(Debug, Clone, Serialize)]
pub struct ScoredPair {
    /// Earlier file in discovery order
    pub file_a: FileRecord,
    /// Later file in discovery order
    pub file_b: FileRecord,
    /// Similarity, 1 to 100
    pub similarity: u8,
}

/// Result of a similarity run
#[derive(Debug, Clone, Serialize)]
pub struct SimilarityReport {
    /// Absolute scan root
    pub root: PathBuf,
    /// Selector as given
    pub selector: String,
    /// Algorithm used
    pub algorithm: Algorithm,
    /// Emission ordering used
    pub ordering: OutputOrdering,
    /// Aggregate figures over kept pairs
    pub summary: SimilaritySummary,
    /// Pairs actually scored (all combinations unless cancelled)
    pub comparisons: usize,
    /// Files that could not be read and were compared as empty
    pub unreadable: Vec<PathBuf>,
    /// Whether the run stopped early
    pub cancelled: bool,
    /// Duration in milliseconds
    pub duration_ms: u64,
}

/// Builder for [`SimilarityMatrixEngine`]
pub struct SimilarityMatrixEngineBuilder {
    directory: PathBuf,
    selector: String,
    algorithm: String,
    ordering: OutputOrdering,
    scan_config: ScanConfig,
    cancel: CancellationToken,
}

impl SimilarityMatrixEngineBuilder {
    /// Create a builder with defaults: `.txt` files, current directory,
    /// `ratio`, streaming output
    pub fn new() -> Self {
        Self {
            directory: PathBuf::from("."),
            selector: DEFAULT_SELECTOR.to_string(),
            algorithm: Algorithm::default().name().to_string(),
            ordering: OutputOrdering::default(),
            scan_config: ScanConfig::default(),
            cancel: CancellationToken::new(),
        }
    }

    /// Directory to scan
    pub fn directory(mut self, directory: impl Into<PathBuf>) -> Self {
        self.directory = directory.into();
        self
    }

    /// File selector
    pub fn selector(mut self, selector: impl Into<String>) -> Self {
        self.selector = selector.into();
        self
    }

    /// Algorithm by name; validated in [`build`](Self::build)
    pub fn algorithm(mut self, name: impl Into<String>) -> Self {
        self.algorithm = name.into();
        self
    }

    /// Emission ordering
    pub fn ordering(mut self, ordering: OutputOrdering) -> Self {
        self.ordering = ordering;
        self
    }

    /// Shorthand for [`OutputOrdering::Sorted`] when `sort` is true
    pub fn sorted(self, sort: bool) -> Self {
        self.ordering(if sort {
            OutputOrdering::Sorted
        } else {
            OutputOrdering::Streaming
        })
    }

    /// Set scanner configuration
    pub fn scan_config(mut self, config: ScanConfig) -> Self {
        self.scan_config = config;
        self
    }

    /// Attach a cancellation token
    pub fn cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    /// Validate the configuration and build the engine.
    ///
    /// The algorithm name is checked first, then the selector, then the
    /// directory.
    pub fn build(self) -> Result<SimilarityMatrixEngine, ConfigError> {
        let scorer = TextSimilarityScorer::new(&self.algorithm)?;
        let selector = Selector::parse(&self.selector)?;
        let root = resolve_root(&self.directory)?;

        Ok(SimilarityMatrixEngine {
            root,
            selector,
            scorer,
            ordering: self.ordering,
            scan_config: self.scan_config,
            cancel: self.cancel,
        })
    }
}

impl Default for SimilarityMatrixEngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Scores all pairs of files under a root directory
pub struct SimilarityMatrixEngine {
    root: PathBuf,
    selector: Selector,
    scorer: TextSimilarityScorer,
    ordering: OutputOrdering,
    scan_config: ScanConfig,
    cancel: CancellationToken,
}

impl SimilarityMatrixEngine {
    /// Create a new engine builder
    pub fn builder() -> SimilarityMatrixEngineBuilder {
        SimilarityMatrixEngineBuilder::new()
    }

    /// Absolute scan root
    pub fn root(&self) -> &std::path::Path {
        &self.root
    }

    /// Run without events, passing each kept pair to `sink`
    pub fn run<F>(&self, sink: F) -> Result<SimilarityReport, CompareFilesError>
    where
        F: FnMut(ScoredPair),
    {
        self.run_with_events(&null_sender(), sink)
    }

    /// Run without events and collect the kept pairs in emission order
    pub fn run_collecting(&self) -> Result<(SimilarityReport, Vec<ScoredPair>), CompareFilesError> {
        let mut pairs = Vec::new();
        let report = self.run(|pair| pairs.push(pair))?;
        Ok((report, pairs))
    }

    /// Run with event reporting, passing each kept pair to `sink`
    pub fn run_with_events<F>(
        &self,
        events: &EventSender,
        mut sink: F,
    ) -> Result<SimilarityReport, CompareFilesError>
    where
        F: FnMut(ScoredPair),
    {
        let start_time = Instant::now();
        let root = resolve_root(&self.root)?;

        events.send(Event::Pipeline(PipelineEvent::Started));

        // Phase 1: Scanning
        events.send(Event::Pipeline(PipelineEvent::PhaseChanged {
            phase: PipelinePhase::Scanning,
        }));
        events.send(Event::Scan(ScanEvent::Started {
            root: root.clone(),
            selector: self.selector.to_string(),
        }));

        let selector = FileSelector::new(&root, self.selector.clone())
            .with_config(self.scan_config.clone());
        let files: Vec<FileRecord> = selector
            .files_with_events(events)
            .take_while(|_| !self.cancel.is_cancelled())
            .map(|path| FileRecord::new(path, &root))
            .collect();
        let n = files.len();

        events.send(Event::Scan(ScanEvent::Completed { total_files: n }));
        tracing::info!(root = %root.display(), files = n, "scan complete");

        let mut stats = SimilarityStats::new();
        let mut unreadable = Vec::new();
        let mut comparisons = 0;

        if n >= 2 && !self.cancel.is_cancelled() {
            // Phase 2: Loading
            events.send(Event::Pipeline(PipelineEvent::PhaseChanged {
                phase: PipelinePhase::Loading,
            }));
            let texts = self.load_texts(&files, events, &mut unreadable);

            // Phase 3: Comparing
            events.send(Event::Pipeline(PipelineEvent::PhaseChanged {
                phase: PipelinePhase::Comparing,
            }));
            events.send(Event::Compare(CompareEvent::Started {
                total_files: n,
                total_combinations: combinations(n),
            }));

            let mut emit = |i: usize, j: usize, similarity: u8| {
                stats.record(similarity);
                sink(ScoredPair {
                    file_a: files[i].clone(),
                    file_b: files[j].clone(),
                    similarity,
                });
            };

            comparisons = match self.ordering {
                OutputOrdering::Streaming => self.score_streaming(&texts, events, &mut emit),
                OutputOrdering::Sorted => self.score_sorted(&texts, events, &mut emit),
            };

            events.send(Event::Compare(CompareEvent::Completed {
                comparisons,
                pairs_kept: stats.count(),
            }));
        }

        let cancelled = self.cancel.is_cancelled();
        let duration_ms = start_time.elapsed().as_millis() as u64;

        if cancelled {
            events.send(Event::Pipeline(PipelineEvent::Cancelled));
        } else {
            events.send(Event::Pipeline(PipelineEvent::Completed { duration_ms }));
        }
        tracing::info!(
            comparisons,
            kept = stats.count(),
            cancelled,
            "similarity run finished"
        );

        Ok(SimilarityReport {
            root,
            selector: self.selector.to_string(),
            algorithm: self.scorer.algorithm(),
            ordering: self.ordering,
            summary: stats.finish(n),
            comparisons,
            unreadable,
            cancelled,
            duration_ms,
        })
    }

    /// Read every file once; unreadable files become empty text
    fn load_texts(
        &self,
        files: &[FileRecord],
        events: &EventSender,
        unreadable: &mut Vec<PathBuf>,
    ) -> Vec<String> {
        let loaded: Vec<(String, bool)> = files
            .par_iter()
            .map(|file| match read_text(&file.absolute_path) {
                Ok(text) => (text, true),
                Err(e) => {
                    tracing::warn!("{e}");
                    events.send(Event::Compare(CompareEvent::Unreadable {
                        path: file.absolute_path.clone(),
                        message: e.to_string(),
                    }));
                    (String::new(), false)
                }
            })
            .collect();

        loaded
            .into_iter()
            .zip(files)
            .map(|((text, readable), file)| {
                if !readable {
                    unreadable.push(file.absolute_path.clone());
                }
                text
            })
            .collect()
    }

    /// Score pairs in order, emitting each kept pair immediately
    fn score_streaming(
        &self,
        texts: &[String],
        events: &EventSender,
        emit: &mut dyn FnMut(usize, usize, u8),
    ) -> usize {
        let n = texts.len();
        let total = combinations(n);
        let interval = progress_interval(total);
        let mut completed = 0;

        for i in 0..n {
            for j in (i + 1)..n {
                if self.cancel.is_cancelled() {
                    return completed;
                }

                if let Some(score) = self.scorer.score(&texts[i], &texts[j]) {
                    if score > 0 {
                        emit(i, j, score);
                    }
                }

                completed += 1;
                if completed % interval == 0 {
                    send_progress(events, completed, total);
                }
            }
        }

        completed
    }

    /// Score all pairs in parallel, then emit kept pairs by descending score
    fn score_sorted(
        &self,
        texts: &[String],
        events: &EventSender,
        emit: &mut dyn FnMut(usize, usize, u8),
    ) -> usize {
        let n = texts.len();
        let total = combinations(n);
        let interval = progress_interval(total);
        let completed = AtomicUsize::new(0);

        // Collected in pair-generation order
        let mut kept: Vec<(usize, usize, u8)> = (0..n)
            .into_par_iter()
            .flat_map_iter(|i| ((i + 1)..n).map(move |j| (i, j)))
            .filter_map(|(i, j)| {
                if self.cancel.is_cancelled() {
                    return None;
                }

                let score = self.scorer.score(&texts[i], &texts[j]);

                let current = completed.fetch_add(1, Ordering::SeqCst) + 1;
                if current % interval == 0 {
                    send_progress(events, current, total);
                }

                score.filter(|&s| s > 0).map(|s| (i, j, s))
            })
            .collect();

        // Stable: ties keep pair-generation order
        kept.sort_by(|a, b| b.2.cmp(&a.2));

        for (i, j, score) in kept {
            emit(i, j, score);
        }

        completed.load(Ordering::SeqCst)
    }
}

/// Progress every 1000 comparisons or 2% of total, whichever is smaller
fn progress_interval(total: usize) -> usize {
    std::cmp::min(1000, std::cmp::max(1, total / 50))
}

fn send_progress(events: &EventSender, completed: usize, total: usize) {
    events.send(Event::Compare(CompareEvent::Progress(CompareProgress {
        comparisons_completed: completed,
        total_comparisons: total,
    })));
}
