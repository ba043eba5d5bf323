//! Bit-parallel longest common subsequence.
//!
//! The pattern is encoded once as per-character bit masks; each text
//! character then updates a bit vector in `O(pattern_len / 64)` word
//! operations. Scoring one pattern against many windows of a longer
//! string reuses the same masks.

use std::collections::HashMap;

const ASCII_SIZE: usize = 128;

/// Per-character match masks for a fixed pattern.
pub(crate) struct PatternMatch {
    words: usize,
    ascii: Vec<u64>,
    other: HashMap<char, Vec<u64>>,
}

impl PatternMatch {
    pub(crate) fn new(pattern: &[char]) -> Self {
        let words = pattern.len().div_ceil(64).max(1);
        let mut ascii = vec![0u64; ASCII_SIZE * words];
        let mut other: HashMap<char, Vec<u64>> = HashMap::new();

        for (i, &c) in pattern.iter().enumerate() {
            let word = i / 64;
            let bit = 1u64 << (i % 64);
            if c.is_ascii() {
                ascii[c as usize * words + word] |= bit;
            } else {
                other.entry(c).or_insert_with(|| vec![0u64; words])[word] |= bit;
            }
        }

        Self {
            words,
            ascii,
            other,
        }
    }

    fn mask(&self, c: char) -> Option<&[u64]> {
        if c.is_ascii() {
            let start = c as usize * self.words;
            Some(&self.ascii[start..start + self.words])
        } else {
            self.other.get(&c).map(Vec::as_slice)
        }
    }

    /// Advance `state` by one text character; false when `c` is not in the pattern
    fn step(&self, state: &mut [u64], c: char) -> bool {
        let Some(mask) = self.mask(c) else {
            return false;
        };

        let mut carry = 0u64;
        for (s, &m) in state.iter_mut().zip(mask) {
            let matched = *s & m;
            let (sum, overflow_a) = s.overflowing_add(matched);
            let (sum, overflow_b) = sum.overflowing_add(carry);
            carry = u64::from(overflow_a || overflow_b);
            *s = sum | (*s - matched);
        }
        true
    }

    fn initial_state(&self) -> Vec<u64> {
        vec![!0u64; self.words]
    }

    /// Length of the longest common subsequence of the pattern and `text`
    pub(crate) fn lcs(&self, text: &[char]) -> usize {
        let mut state = self.initial_state();
        for &c in text {
            self.step(&mut state, c);
        }
        matched_count(&state)
    }

    /// LCS against every prefix of `text` in one pass.
    ///
    /// Calls `visit(prefix_len, lcs)` for each prefix, shortest first, and
    /// stops as soon as it returns true. Returns whether it stopped.
    pub(crate) fn lcs_prefixes<F>(&self, text: &[char], mut visit: F) -> bool
    where
        F: FnMut(usize, usize) -> bool,
    {
        let mut state = self.initial_state();
        let mut lcs = 0;

        for (i, &c) in text.iter().enumerate() {
            if self.step(&mut state, c) {
                lcs = matched_count(&state);
            }
            if visit(i + 1, lcs) {
                return true;
            }
        }
        false
    }
}

fn matched_count(state: &[u64]) -> usize {
    state.iter().map(|w| w.count_zeros() as usize).sum()
}

/// Longest common subsequence length of two character slices
pub(crate) fn lcs_len(a: &[char], b: &[char]) -> usize {
    if a.is_empty() || b.is_empty() {
        return 0;
    }
    let (pattern, text) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    PatternMatch::new(pattern).lcs(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    /// Textbook dynamic-programming LCS for cross-checking
    fn lcs_dp(a: &[char], b: &[char]) -> usize {
        let mut table = vec![vec![0usize; b.len() + 1]; a.len() + 1];
        for i in 1..=a.len() {
            for j in 1..=b.len() {
                table[i][j] = if a[i - 1] == b[j - 1] {
                    table[i - 1][j - 1] + 1
                } else {
                    table[i - 1][j].max(table[i][j - 1])
                };
            }
        }
        table[a.len()][b.len()]
    }

    #[test]
    fn empty_inputs_have_no_common_subsequence() {
        assert_eq!(lcs_len(&[], &chars("abc")), 0);
        assert_eq!(lcs_len(&chars("abc"), &[]), 0);
    }

    #[test]
    fn identical_strings() {
        let s = chars("hello world");
        assert_eq!(lcs_len(&s, &s), s.len());
    }

    #[test]
    fn classic_example() {
        assert_eq!(lcs_len(&chars("ABCBDAB"), &chars("BDCABA")), 4);
    }

    #[test]
    fn non_ascii_characters() {
        assert_eq!(lcs_len(&chars("naïve café"), &chars("naive cafe")), 8);
        assert_eq!(lcs_len(&chars("日本語"), &chars("日本")), 2);
    }

    #[test]
    fn matches_dynamic_programming_across_word_boundaries() {
        let a: Vec<char> = (0..150).map(|i| (b'a' + (i * 7 % 26) as u8) as char).collect();
        let b: Vec<char> = (0..170).map(|i| (b'a' + (i * 11 % 26) as u8) as char).collect();

        assert_eq!(lcs_len(&a, &b), lcs_dp(&a, &b));
        assert_eq!(lcs_len(&b, &a), lcs_dp(&a, &b));
    }

    #[test]
    fn pattern_is_reusable_across_texts() {
        let pattern = PatternMatch::new(&chars("hello"));
        assert_eq!(pattern.lcs(&chars("hello")), 5);
        assert_eq!(pattern.lcs(&chars("yellow")), 4);
        assert_eq!(pattern.lcs(&chars("xyz")), 0);
    }

    #[test]
    fn prefix_pass_matches_independent_runs() {
        let pattern_chars: Vec<char> = (0..90).map(|i| (b'a' + (i * 5 % 26) as u8) as char).collect();
        let text: Vec<char> = (0..140).map(|i| (b'a' + (i * 3 % 26) as u8) as char).collect();
        let pattern = PatternMatch::new(&pattern_chars);

        let mut seen = Vec::new();
        let stopped = pattern.lcs_prefixes(&text, |len, lcs| {
            seen.push((len, lcs));
            false
        });

        assert!(!stopped);
        assert_eq!(seen.len(), text.len());
        for (len, lcs) in seen {
            assert_eq!(lcs, lcs_dp(&pattern_chars, &text[..len]), "prefix {len}");
        }
    }

    #[test]
    fn prefix_pass_stops_when_asked() {
        let pattern = PatternMatch::new(&chars("abc"));
        let mut visited = 0;

        let stopped = pattern.lcs_prefixes(&chars("xabcyz"), |_, lcs| {
            visited += 1;
            lcs == 3
        });

        assert!(stopped);
        assert_eq!(visited, 4);
    }
}
