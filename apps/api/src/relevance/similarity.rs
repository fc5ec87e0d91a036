//! String similarity: the pluggable fuzzy-match capability used by the scorer.
//!
//! Default: `PartialRatio`, a word-aligned partial-ratio over `strsim` normalized Levenshtein.

/// Fuzzy similarity between a short needle (a skill token) and a longer haystack.
///
/// Implement this to swap the fuzzy backend without touching the scorer.
pub trait Similarity: Send + Sync {
    /// Returns a score in `0..=100`. 100 means the needle is present verbatim.
    fn similarity(&self, needle: &str, haystack: &str) -> u8;
}

/// Partial-ratio similarity aligned to word boundaries.
///
/// The haystack is split into words, and the needle (k words) is compared with every
/// window of k-1, k, and k+1 consecutive words. The best window wins. Windows never
/// start or end inside a word, so "sql" does not score 100 against "postgresql".
/// A window only counts when it carries the same language marks as the needle
/// (`+`, `#`, a word-leading `.`), so ".net" never fuzzes into "net" nor "c#" into "c++".
#[derive(Debug, Clone, Copy, Default)]
pub struct PartialRatio;

impl Similarity for PartialRatio {
    fn similarity(&self, needle: &str, haystack: &str) -> u8 {
        partial_ratio(needle, haystack)
    }
}

pub fn partial_ratio(needle: &str, haystack: &str) -> u8 {
    let needle = needle.trim();
    let words: Vec<&str> = haystack
        .split_whitespace()
        .map(|w| {
            w.trim_end_matches(|c: char| c == '.' || c == '-')
                .trim_start_matches('-')
        })
        .filter(|w| !w.is_empty())
        .collect();

    if needle.is_empty() || words.is_empty() {
        return 0;
    }

    let k = needle.split_whitespace().count().max(1);
    let min_window = k.saturating_sub(1).max(1);
    let max_window = k + 1;

    if words.len() < min_window {
        let whole = words.join(" ");
        if marks(needle) != marks(&whole) {
            return 0;
        }
        return ratio(needle, &whole);
    }

    let needle_marks = marks(needle);

    let mut best = 0.0_f64;
    for size in min_window..=max_window.min(words.len()) {
        for window in words.windows(size) {
            let candidate = window.join(" ");
            if marks(&candidate) != needle_marks {
                continue;
            }
            let score = strsim::normalized_levenshtein(needle, &candidate);
            if score > best {
                best = score;
                if best >= 1.0 {
                    return 100;
                }
            }
        }
    }
    to_percent(best)
}

/// Language marks of a phrase, in order: `+`, `#`, and `.` at the start of a word.
fn marks(text: &str) -> Vec<char> {
    text.split_whitespace()
        .flat_map(|word| {
            let leading = word.starts_with('.').then_some('.');
            leading
                .into_iter()
                .chain(word.chars().filter(|c| *c == '+' || *c == '#'))
        })
        .collect()
}

fn ratio(a: &str, b: &str) -> u8 {
    to_percent(strsim::normalized_levenshtein(a, b))
}

fn to_percent(score: f64) -> u8 {
    (score * 100.0).round().clamp(0.0, 100.0) as u8
}
