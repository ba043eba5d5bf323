//! # comparefiles
//!
//! Finds byte-identical files and scores text similarity across a
//! directory tree.
//!
//! ## Modes
//! - **Identical** - group files whose content fingerprints match
//! - **Similarity** - score every pair of text files from 0 to 100
//!
//! ## Architecture
//! - `core` - The comparison engines (front-end agnostic)
//! - `events` - Progress and diagnostic events
//! - `error` - Error types

pub mod core;
pub mod error;
pub mod events;

// Re-export commonly used types at the crate root
pub use error::{CompareFilesError, Result};

/// Initialize tracing for the library
///
/// This should be called by the application entry point. `RUST_LOG`
/// takes precedence; otherwise only errors are logged, or everything
/// down to debug when `verbose` is set.
pub fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "error" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();

    if tracing::subscriber::set_global_default(subscriber).is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
}
