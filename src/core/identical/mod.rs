//! # Identical Module
//!
//! Finds groups of byte-identical files.
//!
//! ## Stages
//! 1. **Scan** - discover files matching the selector
//! 2. **Fingerprint** - hash every file's content (parallel, rayon)
//! 3. **Group** - bucket by digest, keep buckets with 2+ members
//!
//! Unreadable files are reported and left out of every group.

mod grouper;

pub use grouper::DigestGrouper;

use crate::core::cancel::CancellationToken;
use crate::core::fingerprint::{ContentFingerprinter, Fingerprint, FingerprintedFile};
use crate::core::scanner::{resolve_root, FileRecord, FileSelector, ScanConfig, Selector};
use crate::error::{CompareFilesError, ConfigError};
use crate::events::{
    null_sender, Event, EventSender, FingerprintEvent, FingerprintProgress, PipelineEvent,
    PipelinePhase, ScanEvent,
};
use rayon::prelude::*;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

/// Files sharing one digest
#[derive(Debug, Clone, Serialize)]
pub struct IdenticalGroup {
    /// Digest shared by every member
    pub digest: Fingerprint,
    /// Members in discovery order (always 2 or more)
    pub files: Vec<FileRecord>,
}

/// Counts reported after an identical-file run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IdenticalSummary {
    /// Files matching the selector
    pub files_scanned: usize,
    /// Distinct digests shared by 2+ files
    pub matches: usize,
    /// Files across all groups
    pub matched_files: usize,
    /// Files that could not be read
    pub unreadable: usize,
}

/// Result of an identical-file run
#[derive(Debug, Clone, Serialize)]
pub struct IdenticalReport {
    /// Absolute scan root
    pub root: PathBuf,
    /// Selector as given
    pub selector: String,
    /// Files matching the selector
    pub files_scanned: usize,
    /// Groups in ascending digest order
    pub groups: Vec<IdenticalGroup>,
    /// Files that could not be read
    pub unreadable: Vec<PathBuf>,
    /// Whether the run stopped early
    pub cancelled: bool,
    /// Duration in milliseconds
    pub duration_ms: u64,
}

impl IdenticalReport {
    /// Summary counts
    pub fn summary(&self) -> IdenticalSummary {
        IdenticalSummary {
            files_scanned: self.files_scanned,
            matches: self.groups.len(),
            matched_files: self.groups.iter().map(|g| g.files.len()).sum(),
            unreadable: self.unreadable.len(),
        }
    }
}

/// Builder for [`IdenticalGroupEngine`]
pub struct IdenticalGroupEngineBuilder {
    directory: PathBuf,
    selector: Option<String>,
    scan_config: ScanConfig,
    fingerprinter: ContentFingerprinter,
    cancel: CancellationToken,
}

impl IdenticalGroupEngineBuilder {
    /// Create a builder scanning the current directory
    pub fn new() -> Self {
        Self {
            directory: PathBuf::from("."),
            selector: None,
            scan_config: ScanConfig::default(),
            fingerprinter: ContentFingerprinter::new(),
            cancel: CancellationToken::new(),
        }
    }

    /// Directory to scan
    pub fn directory(mut self, directory: impl Into<PathBuf>) -> Self {
        self.directory = directory.into();
        self
    }

    /// File selector (required)
    pub fn selector(mut self, selector: impl Into<String>) -> Self {
        self.selector = Some(selector.into());
        self
    }

    /// Set scanner configuration
    pub fn scan_config(mut self, config: ScanConfig) -> Self {
        self.scan_config = config;
        self
    }

    /// Use a custom fingerprinter
    pub fn fingerprinter(mut self, fingerprinter: ContentFingerprinter) -> Self {
        self.fingerprinter = fingerprinter;
        self
    }

    /// Attach a cancellation token
    pub fn cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    /// Validate the configuration and build the engine.
    ///
    /// Fails if the selector is missing or empty, or the directory does
    /// not exist.
    pub fn build(self) -> Result<IdenticalGroupEngine, ConfigError> {
        let selector = Selector::parse(self.selector.as_deref().unwrap_or_default())?;
        let root = resolve_root(&self.directory)?;

        Ok(IdenticalGroupEngine {
            root,
            selector,
            scan_config: self.scan_config,
            fingerprinter: self.fingerprinter,
            cancel: self.cancel,
        })
    }
}

impl Default for IdenticalGroupEngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Groups byte-identical files under a root directory
pub struct IdenticalGroupEngine {
    root: PathBuf,
    selector: Selector,
    scan_config: ScanConfig,
    fingerprinter: ContentFingerprinter,
    cancel: CancellationToken,
}

impl IdenticalGroupEngine {
    /// Create a new engine builder
    pub fn builder() -> IdenticalGroupEngineBuilder {
        IdenticalGroupEngineBuilder::new()
    }

    /// Absolute scan root
    pub fn root(&self) -> &std::path::Path {
        &self.root
    }

    /// Run without events
    pub fn run(&self) -> Result<IdenticalReport, CompareFilesError> {
        self.run_with_events(&null_sender())
    }

    /// Run with event reporting
    pub fn run_with_events(
        &self,
        events: &EventSender,
    ) -> Result<IdenticalReport, CompareFilesError> {
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
        let total_files = files.len();

        events.send(Event::Scan(ScanEvent::Completed { total_files }));
        tracing::info!(root = %root.display(), files = total_files, "scan complete");

        // Phase 2: Fingerprinting
        events.send(Event::Pipeline(PipelineEvent::PhaseChanged {
            phase: PipelinePhase::Fingerprinting,
        }));
        events.send(Event::Fingerprint(FingerprintEvent::Started { total_files }));

        let completed = AtomicUsize::new(0);
        let fingerprinted: Vec<FingerprintedFile> = files
            .into_par_iter()
            .filter_map(|file| {
                if self.cancel.is_cancelled() {
                    return None;
                }

                let (fingerprinted, error) = self.fingerprinter.fingerprint(file);
                if let Some(e) = error {
                    tracing::warn!("{e}");
                    events.send(Event::Fingerprint(FingerprintEvent::Unreadable {
                        path: e.path().clone(),
                        message: e.to_string(),
                    }));
                }

                let current = completed.fetch_add(1, Ordering::SeqCst) + 1;
                events.send(Event::Fingerprint(FingerprintEvent::Progress(
                    FingerprintProgress {
                        completed: current,
                        total: total_files,
                        current_path: fingerprinted.file.absolute_path.clone(),
                    },
                )));

                Some(fingerprinted)
            })
            .collect();

        let unreadable: Vec<PathBuf> = fingerprinted
            .iter()
            .filter(|f| !f.is_readable())
            .map(|f| f.file.absolute_path.clone())
            .collect();

        events.send(Event::Fingerprint(FingerprintEvent::Completed {
            fingerprinted: fingerprinted.len() - unreadable.len(),
            unreadable: unreadable.len(),
        }));

        // Phase 3: Grouping
        let groups = DigestGrouper::new().group(&fingerprinted);
        let cancelled = self.cancel.is_cancelled();
        let duration_ms = start_time.elapsed().as_millis() as u64;

        if cancelled {
            events.send(Event::Pipeline(PipelineEvent::Cancelled));
        } else {
            events.send(Event::Pipeline(PipelineEvent::Completed { duration_ms }));
        }
        tracing::info!(groups = groups.len(), cancelled, "identical-file run finished");

        Ok(IdenticalReport {
            root,
            selector: self.selector.to_string(),
            files_scanned: total_files,
            groups,
            unreadable,
            cancelled,
            duration_ms,
        })
    }
}
