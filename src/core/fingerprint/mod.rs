//! # Fingerprint Module
//!
//! Streaming content fingerprints used as equivalence keys for
//! identical-file detection.
//!
//! Files are read in fixed-size chunks and fed into a 128-bit XXH3
//! hasher, so memory use does not grow with file size. Equal content
//! always produces equal fingerprints.

use crate::core::scanner::FileRecord;
use crate::error::ReadError;
use serde::{Serialize, Serializer};
use std::fmt;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;
use xxhash_rust::xxh3::Xxh3;

/// Bytes read per chunk (64KB)
pub const CHUNK_SIZE: usize = 64 * 1024;

/// A 128-bit content digest.
///
/// Ordering is numeric, which matches the ordering of the hex strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Fingerprint(u128);

impl Fingerprint {
    /// Wrap a raw digest value
    pub fn from_u128(value: u128) -> Self {
        Self(value)
    }

    /// Raw digest value
    pub fn as_u128(&self) -> u128 {
        self.0
    }

    /// 32 lowercase hex digits
    pub fn to_hex(&self) -> String {
        format!("{:032x}", self.0)
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", self.0)
    }
}

impl Serialize for Fingerprint {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A discovered file with its content fingerprint.
#[derive(Debug, Clone, Serialize)]
pub struct FingerprintedFile {
    /// The file
    pub file: FileRecord,
    /// `None` if the file could not be read; such files never match
    pub digest: Option<Fingerprint>,
}

impl FingerprintedFile {
    /// Whether the file was read successfully
    pub fn is_readable(&self) -> bool {
        self.digest.is_some()
    }
}

/// Computes content fingerprints by streaming file bytes.
#[derive(Debug, Clone)]
pub struct ContentFingerprinter {
    chunk_size: usize,
}

impl ContentFingerprinter {
    /// Create a fingerprinter with the default chunk size
    pub fn new() -> Self {
        Self {
            chunk_size: CHUNK_SIZE,
        }
    }

    /// Use a different chunk size (minimum 1 byte)
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    /// Fingerprint everything a reader yields
    pub fn fingerprint_reader<R: Read>(&self, mut reader: R) -> io::Result<Fingerprint> {
        let mut hasher = Xxh3::new();
        let mut buffer = vec![0u8; self.chunk_size];

        loop {
            match reader.read(&mut buffer) {
                Ok(0) => break,
                Ok(n) => hasher.update(&buffer[..n]),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }

        Ok(Fingerprint(hasher.digest128()))
    }

    /// Fingerprint a file's full content
    pub fn fingerprint_file(&self, path: &Path) -> Result<Fingerprint, ReadError> {
        File::open(path)
            .and_then(|file| self.fingerprint_reader(file))
            .map_err(|source| ReadError::Unreadable {
                path: path.to_path_buf(),
                source,
            })
    }

    /// Fingerprint a discovered file.
    ///
    /// A read failure yields the unreadable sentinel together with the
    /// error, so the caller can report it and carry on.
    pub fn fingerprint(&self, file: FileRecord) -> (FingerprintedFile, Option<ReadError>) {
        match self.fingerprint_file(&file.absolute_path) {
            Ok(digest) => (
                FingerprintedFile {
                    file,
                    digest: Some(digest),
                },
                None,
            ),
            Err(e) => (FingerprintedFile { file, digest: None }, Some(e)),
        }
    }
}

impl Default for ContentFingerprinter {
    fn default() -> Self {
        Self::new()
    }
}
