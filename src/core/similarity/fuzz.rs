//! The four fuzzy matching strategies.
//!
//! All scores are integers in `0..=100`. Both-empty inputs score 0 here;
//! [`super::TextSimilarityScorer`] reports them as incomparable instead.

use super::lcs::{lcs_len, PatternMatch};
use std::collections::{BTreeSet, HashMap, HashSet};

fn percent(lcs: usize, total_len: usize) -> f64 {
    if total_len == 0 {
        return 0.0;
    }
    200.0 * lcs as f64 / total_len as f64
}

fn round_score(score: f64) -> u8 {
    score.round().clamp(0.0, 100.0) as u8
}

fn ratio_chars(a: &[char], b: &[char]) -> u8 {
    round_score(percent(lcs_len(a, b), a.len() + b.len()))
}

/// Normalized Indel similarity of the full strings.
///
/// `100 * 2 * lcs / (len_a + len_b)`, rounded.
pub fn ratio(a: &str, b: &str) -> u8 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    ratio_chars(&a, &b)
}

/// Needles up to this length score every full window
const SHORT_NEEDLE: usize = 64;
/// Gram length used to anchor full windows for longer needles
const ANCHOR_GRAM: usize = 8;
/// Positions of one needle gram allowed to vote for a window
const GRAM_POSITIONS: usize = 4;
/// Full windows scored for a longer needle
const MAX_ANCHORED_WINDOWS: usize = 16;

/// Highest window score seen so far
struct BestWindow {
    needle_len: usize,
    score: f64,
}

impl BestWindow {
    /// Record a window; true once a perfect score is reached
    fn offer(&mut self, lcs: usize, window_len: usize) -> bool {
        let score = percent(lcs, self.needle_len + window_len);
        if score > self.score {
            self.score = score;
        }
        self.score >= 100.0
    }
}

/// Best [`ratio`] of the shorter string against any same-length window
/// of the longer one.
///
/// Windows hanging over either end of the longer string are scored too,
/// so a partial overlap at the start or end still counts. Exact
/// containment scores 100.
///
/// Overhanging windows come from one incremental LCS pass per end. Full
/// windows are all scored for needles up to 64 chars; longer needles
/// only score the windows their shared 8-char grams line up with.
pub fn partial_ratio(a: &str, b: &str) -> u8 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let (short, long) = if a.len() <= b.len() { (&a, &b) } else { (&b, &a) };

    if short.is_empty() {
        return 0;
    }

    let m = short.len();
    let n = long.len();
    let pattern = PatternMatch::new(short);
    let mut best = BestWindow {
        needle_len: m,
        score: 0.0,
    };

    // Windows that start before the longer string are its prefixes
    if pattern.lcs_prefixes(&long[..m - 1], |len, lcs| best.offer(lcs, len)) {
        return 100;
    }

    let starts = if m <= SHORT_NEEDLE {
        all_window_starts(short, long)
    } else {
        anchored_window_starts(short, long)
    };
    for start in starts {
        if best.offer(pattern.lcs(&long[start..start + m]), m) {
            return 100;
        }
    }

    // Windows that run past the end are its suffixes, read backwards
    let reversed: Vec<char> = short.iter().rev().copied().collect();
    let tail: Vec<char> = long[n - (m - 1)..].iter().rev().copied().collect();
    if PatternMatch::new(&reversed).lcs_prefixes(&tail, |len, lcs| best.offer(lcs, len)) {
        return 100;
    }

    round_score(best.score)
}

/// Full windows whose last char occurs in the needle
fn all_window_starts(short: &[char], long: &[char]) -> Vec<usize> {
    let m = short.len();
    let alphabet: HashSet<char> = short.iter().copied().collect();
    (0..=long.len() - m)
        .filter(|&start| alphabet.contains(&long[start + m - 1]))
        .collect()
}

/// Full windows aligned with grams shared by both strings, most votes first
fn anchored_window_starts(short: &[char], long: &[char]) -> Vec<usize> {
    let last = long.len() - short.len();
    let gram = ANCHOR_GRAM.min(short.len());

    let mut positions: HashMap<&[char], Vec<usize>> = HashMap::new();
    for (i, window) in short.windows(gram).enumerate() {
        let seen = positions.entry(window).or_default();
        if seen.len() < GRAM_POSITIONS {
            seen.push(i);
        }
    }

    let mut votes: HashMap<usize, usize> = HashMap::new();
    for (j, window) in long.windows(gram).enumerate() {
        if let Some(seen) = positions.get(window) {
            for &i in seen {
                *votes.entry(j.saturating_sub(i).min(last)).or_default() += 1;
            }
        }
    }

    let mut ranked: Vec<(usize, usize)> = votes.into_iter().collect();
    ranked.sort_unstable_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));

    let mut starts: Vec<usize> = ranked
        .into_iter()
        .take(MAX_ANCHORED_WINDOWS)
        .map(|(start, _)| start)
        .collect();
    if starts.is_empty() {
        starts.extend([0, last]);
        starts.dedup();
    }
    starts
}

fn tokens(s: &str) -> impl Iterator<Item = &str> {
    s.split_whitespace()
}

/// [`ratio`] after sorting the whitespace-separated tokens of each side.
pub fn token_sort_ratio(a: &str, b: &str) -> u8 {
    let mut tokens_a: Vec<&str> = tokens(a).collect();
    let mut tokens_b: Vec<&str> = tokens(b).collect();
    tokens_a.sort();
    tokens_b.sort();
    ratio(&tokens_a.join(" "), &tokens_b.join(" "))
}

fn join_nonempty(head: &str, tail: &str) -> String {
    match (head.is_empty(), tail.is_empty()) {
        (true, _) => tail.to_string(),
        (_, true) => head.to_string(),
        _ => format!("{head} {tail}"),
    }
}

/// Set-based token comparison.
///
/// Splits the token sets into their intersection and the two
/// differences. When the intersection is non-empty and one side has no
/// extra tokens the score is 100; otherwise the best of comparing the
/// intersection against each side, and the two sides against each other.
pub fn token_set_ratio(a: &str, b: &str) -> u8 {
    let set_a: BTreeSet<&str> = tokens(a).collect();
    let set_b: BTreeSet<&str> = tokens(b).collect();

    let intersection: Vec<&str> = set_a.intersection(&set_b).copied().collect();
    let diff_ab: Vec<&str> = set_a.difference(&set_b).copied().collect();
    let diff_ba: Vec<&str> = set_b.difference(&set_a).copied().collect();

    if intersection.is_empty() && (diff_ab.is_empty() || diff_ba.is_empty()) {
        return 0;
    }
    if !intersection.is_empty() && (diff_ab.is_empty() || diff_ba.is_empty()) {
        return 100;
    }

    let sect = intersection.join(" ");
    let combined_ab = join_nonempty(&sect, &diff_ab.join(" "));
    let combined_ba = join_nonempty(&sect, &diff_ba.join(" "));

    ratio(&sect, &combined_ab)
        .max(ratio(&sect, &combined_ba))
        .max(ratio(&combined_ab, &combined_ba))
}
