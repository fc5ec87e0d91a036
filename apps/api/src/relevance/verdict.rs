//! Verdict mapping: closed, ordered score thresholds (lower bound inclusive).
//!
//! The granularity is chosen once per process via `VERDICT_SCALE` and applied everywhere.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Categorical label summarizing a relevance score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    // Fine scale
    Excellent,
    #[serde(rename = "Very Good")]
    VeryGood,
    Good,
    Bad,
    // Coarse scale
    #[serde(rename = "Good fit")]
    GoodFit,
    #[serde(rename = "Poor fit")]
    PoorFit,
}

impl Verdict {
    const ALL: [Verdict; 6] = [
        Verdict::Excellent,
        Verdict::VeryGood,
        Verdict::Good,
        Verdict::Bad,
        Verdict::GoodFit,
        Verdict::PoorFit,
    ];

    /// Inverse of `label`, used when reading stored evaluations.
    pub fn from_label(label: &str) -> Option<Verdict> {
        Self::ALL.into_iter().find(|v| v.label() == label)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Verdict::Excellent => "Excellent",
            Verdict::VeryGood => "Very Good",
            Verdict::Good => "Good",
            Verdict::Bad => "Bad",
            Verdict::GoodFit => "Good fit",
            Verdict::PoorFit => "Poor fit",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Verdict granularity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerdictScale {
    /// Two levels: Good fit (≥60) / Poor fit.
    Coarse,
    /// Four levels: Excellent (≥90) / Very Good (≥80) / Good (≥70) / Bad.
    #[default]
    Fine,
}

impl VerdictScale {
    /// Thresholds in descending order; the first one the score reaches wins.
    fn tiers(&self) -> &'static [(u8, Verdict)] {
        match self {
            VerdictScale::Coarse => &[(60, Verdict::GoodFit), (0, Verdict::PoorFit)],
            VerdictScale::Fine => &[
                (90, Verdict::Excellent),
                (80, Verdict::VeryGood),
                (70, Verdict::Good),
                (0, Verdict::Bad),
            ],
        }
    }

    pub fn classify(&self, score: u8) -> Verdict {
        self.tiers()
            .iter()
            .find(|(min, _)| score >= *min)
            .map(|(_, verdict)| *verdict)
            .unwrap_or_else(|| self.lowest())
    }

    /// The verdict given to a zero score (and to an empty skill set).
    pub fn lowest(&self) -> Verdict {
        match self {
            VerdictScale::Coarse => Verdict::PoorFit,
            VerdictScale::Fine => Verdict::Bad,
        }
    }
}

impl FromStr for VerdictScale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "coarse" => Ok(VerdictScale::Coarse),
            "fine" => Ok(VerdictScale::Fine),
            other => Err(format!(
                "unknown verdict scale '{other}' (expected fine or coarse)"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fine_scale_boundaries() {
        let scale = VerdictScale::Fine;
        assert_eq!(scale.classify(100), Verdict::Excellent);
        assert_eq!(scale.classify(90), Verdict::Excellent);
        assert_eq!(scale.classify(89), Verdict::VeryGood);
        assert_eq!(scale.classify(85), Verdict::VeryGood);
        assert_eq!(scale.classify(80), Verdict::VeryGood);
        assert_eq!(scale.classify(79), Verdict::Good);
        assert_eq!(scale.classify(70), Verdict::Good);
        assert_eq!(scale.classify(69), Verdict::Bad);
        assert_eq!(scale.classify(55), Verdict::Bad);
        assert_eq!(scale.classify(0), Verdict::Bad);
    }

    #[test]
    fn test_coarse_scale_boundaries() {
        let scale = VerdictScale::Coarse;
        assert_eq!(scale.classify(95), Verdict::GoodFit);
        assert_eq!(scale.classify(60), Verdict::GoodFit);
        assert_eq!(scale.classify(59), Verdict::PoorFit);
        assert_eq!(scale.classify(0), Verdict::PoorFit);
    }

    #[test]
    fn test_zero_score_is_lowest_tier() {
        for scale in [VerdictScale::Fine, VerdictScale::Coarse] {
            assert_eq!(scale.classify(0), scale.lowest());
        }
    }

    #[test]
    fn test_verdict_serializes_as_label() {
        assert_eq!(
            serde_json::to_string(&Verdict::VeryGood).unwrap(),
            r#""Very Good""#
        );
        assert_eq!(
            serde_json::to_string(&Verdict::PoorFit).unwrap(),
            r#""Poor fit""#
        );
    }

    #[test]
    fn test_from_label_inverts_label() {
        for verdict in Verdict::ALL {
            assert_eq!(Verdict::from_label(verdict.label()), Some(verdict));
        }
        assert_eq!(Verdict::from_label("very good"), None);
    }

    #[test]
    fn test_scale_parses_from_config_strings() {
        assert_eq!("fine".parse::<VerdictScale>().unwrap(), VerdictScale::Fine);
        assert_eq!("COARSE".parse::<VerdictScale>().unwrap(), VerdictScale::Coarse);
        assert!("binary".parse::<VerdictScale>().is_err());
    }
}
