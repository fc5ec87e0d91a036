//! Skill tokens: normalization rules and the `SkillSet` collection.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Characters kept verbatim by normalization besides letters, digits, and spaces.
const KEPT_SYMBOLS: &[char] = &['+', '#', '.', '-'];

/// Normalizes free text the way skill tokens are normalized:
/// lowercase, disallowed characters replaced by spaces, whitespace collapsed.
///
/// Does not trim sentence punctuation; use `normalize_skill` for tokens.
pub fn normalize_text(text: &str) -> String {
    let lowered = text.to_lowercase();
    let cleaned: String = lowered
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || KEPT_SYMBOLS.contains(&c) {
                c
            } else {
                ' '
            }
        })
        .collect();
    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Normalizes a single skill item into a token.
///
/// On top of `normalize_text`, strips a trailing `.`/`-` and a leading `-`,
/// so "Python." and "- SQL" become "python" and "sql". A leading `.` survives (".net").
/// Idempotent: `normalize_skill(normalize_skill(x)) == normalize_skill(x)`.
pub fn normalize_skill(text: &str) -> String {
    normalize_text(text)
        .trim_end_matches(|c: char| c == ' ' || c == '.' || c == '-')
        .trim_start_matches(|c: char| c == ' ' || c == '-')
        .to_string()
}

/// Returns true if `c` can be part of a skill word (used for token boundaries).
pub fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '+' || c == '#'
}

/// A duplicate-free set of normalized skill tokens.
///
/// Backed by a `BTreeSet` so serialized output is stable; order has no meaning.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SkillSet(BTreeSet<String>);

impl SkillSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an already-normalized token. Empty tokens are ignored.
    pub fn insert(&mut self, token: String) -> bool {
        if token.is_empty() {
            return false;
        }
        self.0.insert(token)
    }

    #[cfg(test)]
    pub fn contains(&self, token: &str) -> bool {
        self.0.contains(token)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    #[cfg(test)]
    pub fn union(&self, other: &SkillSet) -> SkillSet {
        SkillSet(self.0.union(&other.0).cloned().collect())
    }

    #[cfg(test)]
    pub fn intersection(&self, other: &SkillSet) -> SkillSet {
        SkillSet(self.0.intersection(&other.0).cloned().collect())
    }

    pub fn into_vec(self) -> Vec<String> {
        self.0.into_iter().collect()
    }
}

/// Builds a set from raw strings, normalizing each one.
impl<S: AsRef<str>> FromIterator<S> for SkillSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = SkillSet::new();
        for item in iter {
            set.insert(normalize_skill(item.as_ref()));
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_lowercases_and_collapses() {
        assert_eq!(normalize_skill("  Machine   Learning "), "machine learning");
    }

    #[test]
    fn test_normalize_keeps_language_symbols() {
        assert_eq!(normalize_skill("C++"), "c++");
        assert_eq!(normalize_skill("C#"), "c#");
        assert_eq!(normalize_skill("Node.js"), "node.js");
        assert_eq!(normalize_skill(".NET"), ".net");
    }

    #[test]
    fn test_normalize_replaces_other_punctuation_with_space() {
        assert_eq!(normalize_skill("CI/CD"), "ci cd");
        assert_eq!(normalize_skill("(Kubernetes)"), "kubernetes");
    }

    #[test]
    fn test_normalize_trims_sentence_punctuation() {
        assert_eq!(normalize_skill("Python."), "python");
        assert_eq!(normalize_skill("- SQL -"), "sql");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        for raw in ["Rust.", "  c++ ", "Spring-Boot", "ÜBER Tools!", "a . -", ".NET Core"] {
            let once = normalize_skill(raw);
            assert_eq!(normalize_skill(&once), once, "not idempotent for {raw:?}");
        }
    }

    #[test]
    fn test_normalize_text_keeps_trailing_dot() {
        assert_eq!(
            normalize_text("Experienced in Python and PostgreSQL."),
            "experienced in python and postgresql."
        );
    }

    #[test]
    fn test_skill_set_deduplicates_after_normalization() {
        let set: SkillSet = ["Python", "python", " PYTHON. "].into_iter().collect();
        assert_eq!(set.len(), 1);
        assert!(set.contains("python"));
    }

    #[test]
    fn test_skill_set_ignores_empty_tokens() {
        let set: SkillSet = ["", "   ", "!!"].into_iter().collect();
        assert!(set.is_empty());
    }

    #[test]
    fn test_skill_set_serializes_as_sorted_array() {
        let set: SkillSet = ["sql", "docker", "python"].into_iter().collect();
        let json = serde_json::to_string(&set).unwrap();
        assert_eq!(json, r#"["docker","python","sql"]"#);
    }
}
