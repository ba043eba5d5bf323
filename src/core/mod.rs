//! # Core Module
//!
//! The comparison engine, independent of any front end.
//!
//! ## Modules
//! - `scanner` - Discovers files matching a selector
//! - `fingerprint` - Streams file content into 128-bit digests
//! - `similarity` - Scores text pairs with fuzzy matching algorithms
//! - `identical` - Groups byte-identical files
//! - `matrix` - Scores every pair of text files
//! - `reporter` - Renders results as display lines
//! - `cancel` - Cooperative cancellation

pub mod cancel;
pub mod fingerprint;
pub mod identical;
pub mod matrix;
pub mod reporter;
pub mod scanner;
pub mod similarity;

// Re-export commonly used types
pub use cancel::CancellationToken;
pub use fingerprint::{ContentFingerprinter, Fingerprint, FingerprintedFile};
pub use identical::{IdenticalGroup, IdenticalGroupEngine, IdenticalReport};
pub use matrix::{OutputOrdering, ScoredPair, SimilarityMatrixEngine, SimilarityReport};
pub use scanner::{FileRecord, FileSelector, Selector};
pub use similarity::{Algorithm, TextSimilarityScorer};
