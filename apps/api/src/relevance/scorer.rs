#![allow(dead_code)]

//! Relevance Scorer: checks which JD skills a resume covers and scores the coverage.
//!
//! Per skill token:
//! 1. exact test: the token occurs in the normalized resume at a token boundary;
//! 2. fuzzy fallback: `Similarity::similarity(token, resume) >= match_threshold`;
//! 3. otherwise the skill is missing.
//!
//! score = round(100 × (w_skill × skill_fraction + w_secondary × secondary_fraction)), 0–100.
//! The secondary signal is a pluggable extension point that contributes nothing by default.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::relevance::similarity::{PartialRatio, Similarity};
use crate::relevance::skills::{is_word_char, normalize_text, SkillSet};
use crate::relevance::verdict::{Verdict, VerdictScale};

pub const DEFAULT_MATCH_THRESHOLD: u8 = 70;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringWeights {
    pub skill: f64,
    pub secondary: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            skill: 1.0,
            secondary: 0.0,
        }
    }
}

/// A second relevance signal blended into the score (e.g. semantic similarity).
///
/// Returns a fraction in `0.0..=1.0`. Weighted by `ScoringWeights::secondary`.
pub trait SecondarySignal: Send + Sync {
    fn fraction(&self, skills: &SkillSet, resume_text: &str) -> f64;
}

/// Default secondary signal: contributes nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSecondarySignal;

impl SecondarySignal for NoSecondarySignal {
    fn fraction(&self, _skills: &SkillSet, _resume_text: &str) -> f64 {
        0.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchKind {
    Exact,
    Fuzzy,
}

/// How one matched skill was found in the resume.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillMatch {
    pub skill: String,
    pub kind: MatchKind,
    pub similarity: u8, // 100 for exact matches
}

/// Outcome of scoring one resume against one skill set. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub score: u8,
    pub verdict: Verdict,
    pub matched_skills: SkillSet,
    pub missing_skills: SkillSet,
    pub match_details: Vec<SkillMatch>,
}

/// Deterministic skill-coverage scorer.
#[derive(Clone)]
pub struct RelevanceScorer {
    pub match_threshold: u8,
    pub weights: ScoringWeights,
    pub verdict_scale: VerdictScale,
    similarity: Arc<dyn Similarity>,
    secondary: Arc<dyn SecondarySignal>,
}

impl Default for RelevanceScorer {
    fn default() -> Self {
        Self::new(
            DEFAULT_MATCH_THRESHOLD,
            ScoringWeights::default(),
            VerdictScale::default(),
        )
    }
}

impl RelevanceScorer {
    pub fn new(match_threshold: u8, weights: ScoringWeights, verdict_scale: VerdictScale) -> Self {
        Self {
            match_threshold: match_threshold.min(100),
            weights,
            verdict_scale,
            similarity: Arc::new(PartialRatio),
            secondary: Arc::new(NoSecondarySignal),
        }
    }

    pub fn with_similarity(mut self, similarity: Arc<dyn Similarity>) -> Self {
        self.similarity = similarity;
        self
    }

    pub fn with_secondary_signal(mut self, secondary: Arc<dyn SecondarySignal>) -> Self {
        self.secondary = secondary;
        self
    }

    pub fn score(&self, skills: &SkillSet, resume_text: &str) -> MatchResult {
        if skills.is_empty() {
            return MatchResult {
                score: 0,
                verdict: self.verdict_scale.lowest(),
                matched_skills: SkillSet::new(),
                missing_skills: SkillSet::new(),
                match_details: vec![],
            };
        }

        let resume = normalize_text(resume_text);

        let mut matched_skills = SkillSet::new();
        let mut missing_skills = SkillSet::new();
        let mut match_details = Vec::new();

        for skill in skills.iter() {
            match self.match_skill(skill, &resume) {
                Some(found) => {
                    matched_skills.insert(skill.to_string());
                    match_details.push(found);
                }
                None => {
                    missing_skills.insert(skill.to_string());
                }
            }
        }

        let skill_fraction = matched_skills.len() as f64 / skills.len() as f64;
        let secondary_fraction = self.secondary.fraction(skills, &resume).clamp(0.0, 1.0);
        let score = compute_final_score(skill_fraction, secondary_fraction, &self.weights);

        MatchResult {
            score,
            verdict: self.verdict_scale.classify(score),
            matched_skills,
            missing_skills,
            match_details,
        }
    }

    fn match_skill(&self, skill: &str, resume: &str) -> Option<SkillMatch> {
        if contains_token(resume, skill) {
            return Some(SkillMatch {
                skill: skill.to_string(),
                kind: MatchKind::Exact,
                similarity: 100,
            });
        }

        let similarity = self.similarity.similarity(skill, resume);
        (similarity >= self.match_threshold && similarity > 0).then(|| SkillMatch {
            skill: skill.to_string(),
            kind: MatchKind::Fuzzy,
            similarity,
        })
    }
}

/// Weighted blend of the skill and secondary fractions, as an integer 0–100.
pub fn compute_final_score(skill_fraction: f64, secondary_fraction: f64, weights: &ScoringWeights) -> u8 {
    let blended = weights.skill * skill_fraction + weights.secondary * secondary_fraction;
    (100.0 * blended).round().clamp(0.0, 100.0) as u8
}

/// True if `token` occurs in `haystack` with no word character directly before or after it.
///
/// Every occurrence is checked, including ones overlapping a rejected candidate.
fn contains_token(haystack: &str, token: &str) -> bool {
    let Some(first) = token.chars().next() else {
        return false;
    };

    let mut from = 0;
    while let Some(offset) = haystack[from..].find(token) {
        let start = from + offset;
        let end = start + token.len();
        let before_ok = haystack[..start]
            .chars()
            .next_back()
            .map_or(true, |c| !is_word_char(c));
        let after_ok = haystack[end..]
            .chars()
            .next()
            .map_or(true, |c| !is_word_char(c));
        if before_ok && after_ok {
            return true;
        }
        from = start + first.len_utf8();
    }
    false
}
