//! # Reporter Module
//!
//! Turns engine results into the lines a user reads.
//!
//! ## Identical mode
//! ```text
//!
//! 5eb63bbbe01eeed093cb22bb8f5acdc3  a.txt
//! 5eb63bbbe01eeed093cb22bb8f5acdc3  b.txt
//! Found 1 match across 2 files (3 files searched)
//! ```
//!
//! ## Similarity mode
//! ```text
//! 100%  a.txt  b.txt
//! 33%  a.txt  c.txt
//! Compared 3 files (3 combinations), similarity 33% to 100%, average 56%
//! ```

use crate::core::identical::IdenticalReport;
use crate::core::matrix::{ScoredPair, SimilarityReport};

/// How paths and groups are laid out
#[derive(Debug, Clone, Copy)]
pub struct DisplayOptions {
    /// Show absolute paths instead of paths relative to the root
    pub full_paths: bool,
    /// Print a blank line before each identical group
    pub group_separators: bool,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            full_paths: false,
            group_separators: true,
        }
    }
}

fn plural<'a>(count: usize, one: &'a str, many: &'a str) -> &'a str {
    if count == 1 {
        one
    } else {
        many
    }
}

/// Message shown when fewer than two files matched
fn too_few_files(files: usize, selector: &str) -> Option<String> {
    match files {
        0 => Some(format!("Found 0 files matching '{selector}'")),
        1 => Some(format!(
            "Found 1 file matching '{selector}', need at least 2 files to compare"
        )),
        _ => None,
    }
}

/// Lines for every identical group, in digest order
pub fn identical_lines(report: &IdenticalReport, options: DisplayOptions) -> Vec<String> {
    let mut lines = Vec::new();

    for group in &report.groups {
        if options.group_separators {
            lines.push(String::new());
        }
        for file in &group.files {
            lines.push(format!(
                "{}  {}",
                group.digest,
                file.display_path(options.full_paths).display()
            ));
        }
    }

    lines
}

/// Closing summary line for identical mode
pub fn identical_summary_line(report: &IdenticalReport) -> String {
    let summary = report.summary();

    if let Some(message) = too_few_files(summary.files_scanned, &report.selector) {
        return message;
    }

    format!(
        "Found {} {} across {} {} ({} files searched)",
        summary.matches,
        plural(summary.matches, "match", "matches"),
        summary.matched_files,
        plural(summary.matched_files, "file", "files"),
        summary.files_scanned
    )
}

/// One line for a scored pair
pub fn pair_line(pair: &ScoredPair, options: DisplayOptions) -> String {
    format!(
        "{}%  {}  {}",
        pair.similarity,
        pair.file_a.display_path(options.full_paths).display(),
        pair.file_b.display_path(options.full_paths).display()
    )
}

/// Closing summary line for similarity mode
pub fn similarity_summary_line(report: &SimilarityReport) -> String {
    let summary = &report.summary;

    if let Some(message) = too_few_files(summary.files, &report.selector) {
        return message;
    }

    if summary.files == 2 {
        return "Compared 2 files".to_string();
    }

    let head = format!(
        "Compared {} files ({} combinations)",
        summary.files, summary.combinations
    );

    match (
        summary.min_similarity,
        summary.max_similarity,
        summary.rounded_average(),
    ) {
        (Some(min), Some(max), Some(average)) => {
            format!("{head}, similarity {min}% to {max}%, average {average}%")
        }
        _ => format!("{head}, no similar files found"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::fingerprint::Fingerprint;
    use crate::core::identical::IdenticalGroup;
    use crate::core::matrix::{OutputOrdering, SimilarityStats};
    use crate::core::scanner::FileRecord;
    use crate::core::similarity::Algorithm;
    use std::path::{Path, PathBuf};

    fn record(name: &str) -> FileRecord {
        FileRecord::new(PathBuf::from(format!("/data/{name}")), Path::new("/data"))
    }

    fn identical_report(files_scanned: usize, groups: Vec<IdenticalGroup>) -> IdenticalReport {
        IdenticalReport {
            root: PathBuf::from("/data"),
            selector: ".txt".to_string(),
            files_scanned,
            groups,
            unreadable: Vec::new(),
            cancelled: false,
            duration_ms: 0,
        }
    }

    fn similarity_report(files: usize, scores: &[u8]) -> SimilarityReport {
        let mut stats = SimilarityStats::new();
        for &score in scores {
            stats.record(score);
        }
        SimilarityReport {
            root: PathBuf::from("/data"),
            selector: ".txt".to_string(),
            algorithm: Algorithm::Ratio,
            ordering: OutputOrdering::Streaming,
            summary: stats.finish(files),
            comparisons: 0,
            unreadable: Vec::new(),
            cancelled: false,
            duration_ms: 0,
        }
    }

    fn two_groups() -> Vec<IdenticalGroup> {
        vec![
            IdenticalGroup {
                digest: Fingerprint::from_u128(1),
                files: vec![record("a.txt"), record("b.txt")],
            },
            IdenticalGroup {
                digest: Fingerprint::from_u128(2),
                files: vec![record("c.txt"), record("d.txt"), record("e.txt")],
            },
        ]
    }

    #[test]
    fn identical_groups_are_separated_by_blank_lines() {
        let report = identical_report(6, two_groups());
        let lines = identical_lines(&report, DisplayOptions::default());

        assert_eq!(lines.len(), 7);
        assert_eq!(lines[0], "");
        assert_eq!(lines[1], format!("{:032x}  a.txt", 1));
        assert_eq!(lines[3], "");
    }

    #[test]
    fn flat_layout_has_no_separators() {
        let report = identical_report(6, two_groups());
        let options = DisplayOptions {
            group_separators: false,
            ..Default::default()
        };

        let lines = identical_lines(&report, options);

        assert_eq!(lines.len(), 5);
        assert!(lines.iter().all(|l| !l.is_empty()));
    }

    #[test]
    fn full_paths_show_absolute_paths() {
        let report = identical_report(6, two_groups());
        let options = DisplayOptions {
            full_paths: true,
            ..Default::default()
        };

        let lines = identical_lines(&report, options);

        assert!(lines[1].ends_with("  /data/a.txt"));
    }

    #[test]
    fn identical_summary_counts_matches_and_files() {
        let report = identical_report(6, two_groups());
        assert_eq!(
            identical_summary_line(&report),
            "Found 2 matches across 5 files (6 files searched)"
        );
    }

    #[test]
    fn identical_summary_singular() {
        let report = identical_report(
            3,
            vec![IdenticalGroup {
                digest: Fingerprint::from_u128(1),
                files: vec![record("a.txt"), record("b.txt")],
            }],
        );
        assert_eq!(
            identical_summary_line(&report),
            "Found 1 match across 2 files (3 files searched)"
        );
    }

    #[test]
    fn identical_summary_with_no_matches() {
        let report = identical_report(4, Vec::new());
        assert_eq!(
            identical_summary_line(&report),
            "Found 0 matches across 0 files (4 files searched)"
        );
    }

    #[test]
    fn identical_summary_for_zero_and_one_file() {
        assert_eq!(
            identical_summary_line(&identical_report(0, Vec::new())),
            "Found 0 files matching '.txt'"
        );
        assert!(identical_summary_line(&identical_report(1, Vec::new()))
            .contains("need at least 2 files"));
    }

    #[test]
    fn pair_line_format() {
        let pair = ScoredPair {
            file_a: record("a.txt"),
            file_b: record("sub/b.txt"),
            similarity: 87,
        };
        assert_eq!(
            pair_line(&pair, DisplayOptions::default()),
            format!("87%  a.txt  {}", Path::new("sub/b.txt").display())
        );
    }

    #[test]
    fn similarity_summary_variants() {
        assert_eq!(
            similarity_summary_line(&similarity_report(0, &[])),
            "Found 0 files matching '.txt'"
        );
        assert!(similarity_summary_line(&similarity_report(1, &[]))
            .contains("need at least 2 files"));
        assert_eq!(
            similarity_summary_line(&similarity_report(2, &[80])),
            "Compared 2 files"
        );
        assert_eq!(
            similarity_summary_line(&similarity_report(3, &[100, 33, 34])),
            "Compared 3 files (3 combinations), similarity 33% to 100%, average 56%"
        );
        assert_eq!(
            similarity_summary_line(&similarity_report(3, &[])),
            "Compared 3 files (3 combinations), no similar files found"
        );
    }

    #[test]
    fn two_file_summary_has_no_range_language() {
        let line = similarity_summary_line(&similarity_report(2, &[42]));
        assert!(!line.contains("average"));
        assert!(!line.contains(" to "));
    }
}
