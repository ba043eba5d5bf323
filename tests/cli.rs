//! End-to-end tests of the `comparefiles` binary.

use assert_fs::prelude::*;
use assert_fs::TempDir;
use predicates::prelude::*;
use std::path::Path;
use std::process::{Command, Output};

fn comparefiles(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_comparefiles"))
        .arg("--directory")
        .arg(dir)
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

fn sample_tree() -> TempDir {
    let temp = TempDir::new().unwrap();
    temp.child("a.txt").write_str("hello world").unwrap();
    temp.child("b.txt").write_str("hello world").unwrap();
    temp.child("c.txt").write_str("goodbye").unwrap();
    temp
}

#[test]
fn requires_a_mode() {
    let temp = sample_tree();
    let output = comparefiles(temp.path(), &[]);

    assert_eq!(output.status.code(), Some(2));
    assert!(output.stdout.is_empty());
}

#[test]
fn missing_directory_exits_with_rejected_input() {
    let temp = TempDir::new().unwrap();
    let missing = temp.path().join("nowhere");
    let output = comparefiles(&missing, &["--identical", ".txt"]);

    assert_eq!(output.status.code(), Some(2));
    assert!(predicate::str::contains("Directory not found").eval(&stderr(&output)));
    assert!(output.stdout.is_empty());
}

#[test]
fn invalid_algorithm_lists_valid_options() {
    let temp = sample_tree();
    let output = comparefiles(temp.path(), &["--similar", "--algorithm", "levenshtein"]);

    assert_eq!(output.status.code(), Some(2));
    let err = stderr(&output);
    for option in ["ratio", "partial_ratio", "token_sort_ratio", "token_set_ratio"] {
        assert!(err.contains(option), "missing {option} in {err}");
    }
    assert!(output.stdout.is_empty());
}

#[test]
fn invalid_algorithm_is_rejected_before_identical_output() {
    let temp = sample_tree();
    let output = comparefiles(
        temp.path(),
        &["--identical", ".txt", "--similar", "--algorithm", "nope"],
    );

    assert_eq!(output.status.code(), Some(2));
    assert!(output.stdout.is_empty());
}

#[test]
fn identical_mode_prints_groups_and_summary() {
    let temp = sample_tree();
    let output = comparefiles(temp.path(), &["--identical", ".txt"]);

    assert!(output.status.success());
    let out = stdout(&output);
    let lines: Vec<&str> = out.lines().collect();

    assert_eq!(lines.len(), 4);
    assert_eq!(lines[0], "");
    let digest_line = predicate::str::is_match("^[0-9a-f]{32}  [ab]\\.txt$").unwrap();
    assert!(digest_line.eval(lines[1]));
    assert!(lines[1].ends_with("a.txt"));
    assert!(lines[2].ends_with("b.txt"));
    assert_eq!(lines[3], "Found 1 match across 2 files (3 files searched)");
}

#[test]
fn flat_layout_omits_blank_lines() {
    let temp = sample_tree();
    let output = comparefiles(temp.path(), &["--identical", ".txt", "--flat"]);

    assert!(output.status.success());
    assert!(stdout(&output).lines().all(|line| !line.is_empty()));
}

#[test]
fn similar_mode_defaults_to_txt_files() {
    let temp = sample_tree();
    temp.child("ignored.md").write_str("hello world").unwrap();
    let output = comparefiles(temp.path(), &["--similar"]);

    assert!(output.status.success());
    assert_eq!(
        stdout(&output),
        "100%  a.txt  b.txt\n\
         33%  a.txt  c.txt\n\
         33%  b.txt  c.txt\n\
         Compared 3 files (3 combinations), similarity 33% to 100%, average 55%\n"
    );
}

#[test]
fn both_modes_run_identical_first() {
    let temp = sample_tree();
    let output = comparefiles(temp.path(), &["--similar", ".txt", "--identical", ".txt"]);

    assert!(output.status.success());
    let out = stdout(&output);
    let identical_at = out.find("Found 1 match").unwrap();
    let similar_at = out.find("100%  a.txt  b.txt").unwrap();
    assert!(identical_at < similar_at);
}

#[test]
fn too_few_files_message() {
    let temp = TempDir::new().unwrap();
    temp.child("only.txt").write_str("alone").unwrap();
    let output = comparefiles(temp.path(), &["--similar", ".txt"]);

    assert!(output.status.success());
    assert_eq!(
        stdout(&output).trim_end(),
        "Found 1 file matching '.txt', need at least 2 files to compare"
    );
}

#[test]
fn json_output_is_a_single_document() {
    let temp = sample_tree();
    let output = comparefiles(temp.path(), &["--similar", "--output", "json"]);

    assert!(output.status.success());
    let document: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(document["mode"], "similarity");
    assert_eq!(document["pairs"].as_array().map(Vec::len), Some(3));
    assert_eq!(document["report"]["summary"]["max_similarity"], 100);
}
