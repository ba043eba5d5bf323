//! Directory walking implementation using walkdir.

use super::{ScanConfig, Selector};
use crate::events::{Event, EventSender, ScanEvent};
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Walks a root directory and yields the files a [`Selector`] picks.
pub struct FileSelector {
    root: PathBuf,
    selector: Selector,
    config: ScanConfig,
}

impl FileSelector {
    /// Create a selector over `root`.
    ///
    /// A relative root is resolved against the current directory so that
    /// every yielded path is absolute.
    pub fn new(root: impl Into<PathBuf>, selector: Selector) -> Self {
        let root = root.into();
        let root = if root.is_absolute() {
            root
        } else {
            std::env::current_dir()
                .map(|cwd| cwd.join(&root))
                .unwrap_or(root)
        };

        Self {
            root,
            selector,
            config: ScanConfig::default(),
        }
    }

    /// Replace the walk configuration
    pub fn with_config(mut self, config: ScanConfig) -> Self {
        self.config = config;
        self
    }

    /// The absolute scan root
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The selector in use
    pub fn selector(&self) -> &Selector {
        &self.selector
    }

    /// Lazily yield every matching file under the root.
    ///
    /// A missing or empty root yields nothing.
    pub fn files(&self) -> SelectedFiles<'_> {
        self.walk(None)
    }

    /// Like [`FileSelector::files`], reporting found files and walk errors.
    pub fn files_with_events<'a>(&'a self, events: &'a EventSender) -> SelectedFiles<'a> {
        self.walk(Some(events))
    }

    fn walk<'a>(&'a self, events: Option<&'a EventSender>) -> SelectedFiles<'a> {
        let mut walker = WalkDir::new(&self.root)
            .follow_links(self.config.follow_symlinks)
            .sort_by_file_name();

        if let Some(depth) = self.config.max_depth {
            walker = walker.max_depth(depth);
        }

        let include_hidden = self.config.include_hidden;
        let entries = walker
            .into_iter()
            .filter_entry(move |entry| include_hidden || !is_hidden(entry));

        SelectedFiles {
            entries: Box::new(entries),
            selector: &self.selector,
            events,
        }
    }
}

/// Iterator returned by [`FileSelector::files`].
///
/// Single pass: once exhausted, build a new one from the selector.
pub struct SelectedFiles<'a> {
    entries: Box<dyn Iterator<Item = walkdir::Result<DirEntry>> + 'a>,
    selector: &'a Selector,
    events: Option<&'a EventSender>,
}

impl Iterator for SelectedFiles<'_> {
    type Item = PathBuf;

    fn next(&mut self) -> Option<PathBuf> {
        for entry_result in self.entries.by_ref() {
            let entry = match entry_result {
                Ok(entry) => entry,
                Err(e) => {
                    let path = e.path().map(Path::to_path_buf).unwrap_or_default();
                    tracing::debug!(path = %path.display(), error = %e, "skipping unreadable entry");
                    if let Some(sender) = self.events {
                        sender.send(Event::Scan(ScanEvent::Error {
                            path,
                            message: e.to_string(),
                        }));
                    }
                    continue;
                }
            };

            if !is_regular_file(&entry) || !self.selector.matches(entry.path()) {
                continue;
            }

            let path = entry.into_path();
            if let Some(sender) = self.events {
                sender.send(Event::Scan(ScanEvent::FileFound { path: path.clone() }));
            }
            return Some(path);
        }

        None
    }
}

/// Regular files and symlinks that resolve to regular files
fn is_regular_file(entry: &DirEntry) -> bool {
    let file_type = entry.file_type();
    if file_type.is_file() {
        return true;
    }
    entry.path_is_symlink() && entry.path().is_file()
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| name.starts_with('.'))
}
