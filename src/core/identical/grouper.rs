//! Partitions fingerprinted files into groups of identical content.
//!
//! Digest equality is transitive, so bucketing by digest yields the
//! equivalence classes directly in a single pass, no pairwise
//! comparison needed.

use super::IdenticalGroup;
use crate::core::fingerprint::{Fingerprint, FingerprintedFile};
use crate::core::scanner::FileRecord;
use std::collections::BTreeMap;

/// Buckets files by digest and keeps buckets with two or more members
pub struct DigestGrouper;

impl DigestGrouper {
    /// Create a new grouper
    pub fn new() -> Self {
        Self
    }

    /// Group files sharing a digest.
    ///
    /// Unreadable files are never placed in any bucket. Groups come back
    /// in ascending digest order; members keep their input order.
    pub fn group(&self, files: &[FingerprintedFile]) -> Vec<IdenticalGroup> {
        let mut buckets: BTreeMap<Fingerprint, Vec<FileRecord>> = BTreeMap::new();

        for file in files {
            if let Some(digest) = file.digest {
                buckets.entry(digest).or_default().push(file.file.clone());
            }
        }

        buckets
            .into_iter()
            .filter(|(_, members)| members.len() >= 2)
            .map(|(digest, files)| IdenticalGroup { digest, files })
            .collect()
    }
}

impl Default for DigestGrouper {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::{Path, PathBuf};

    fn file(name: &str, digest: Option<u128>) -> FingerprintedFile {
        FingerprintedFile {
            file: FileRecord::new(PathBuf::from(format!("/data/{name}")), Path::new("/data")),
            digest: digest.map(Fingerprint::from_u128),
        }
    }

    fn names(group: &IdenticalGroup) -> Vec<String> {
        group
            .files
            .iter()
            .map(|f| f.relative_path.display().to_string())
            .collect()
    }

    #[test]
    fn empty_input_returns_empty() {
        assert!(DigestGrouper::new().group(&[]).is_empty());
    }

    #[test]
    fn singletons_are_dropped() {
        let files = vec![file("a.txt", Some(1)), file("b.txt", Some(2))];
        assert!(DigestGrouper::new().group(&files).is_empty());
    }

    #[test]
    fn shared_digest_forms_one_group() {
        let files = vec![
            file("a.txt", Some(7)),
            file("b.txt", Some(7)),
            file("c.txt", Some(9)),
        ];

        let groups = DigestGrouper::new().group(&files);

        assert_eq!(groups.len(), 1);
        assert_eq!(names(&groups[0]), vec!["a.txt", "b.txt"]);
    }

    #[test]
    fn transitive_members_share_a_single_group() {
        let files = vec![
            file("a.txt", Some(5)),
            file("b.txt", Some(5)),
            file("c.txt", Some(5)),
        ];

        let groups = DigestGrouper::new().group(&files);

        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].files.len(), 3);
    }

    #[test]
    fn unreadable_files_never_match() {
        let files = vec![
            file("locked1.txt", None),
            file("locked2.txt", None),
            file("a.txt", Some(3)),
        ];

        assert!(DigestGrouper::new().group(&files).is_empty());
    }

    #[test]
    fn groups_are_ordered_by_digest() {
        let files = vec![
            file("z1.txt", Some(0xff)),
            file("a1.txt", Some(0x01)),
            file("z2.txt", Some(0xff)),
            file("a2.txt", Some(0x01)),
        ];

        let groups = DigestGrouper::new().group(&files);

        assert_eq!(groups.len(), 2);
        assert!(groups[0].digest < groups[1].digest);
        assert_eq!(names(&groups[0]), vec!["a1.txt", "a2.txt"]);
    }

    #[test]
    fn every_file_appears_in_at_most_one_group() {
        let files: Vec<_> = (0..20)
            .map(|i| file(&format!("{i}.txt"), Some((i % 4) as u128)))
            .collect();

        let groups = DigestGrouper::new().group(&files);
        let total: usize = groups.iter().map(|g| g.files.len()).sum();

        assert_eq!(groups.len(), 4);
        assert_eq!(total, 20);
    }
}
