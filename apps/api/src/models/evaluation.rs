use anyhow::{anyhow, Context};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::relevance::scorer::MatchResult;
use crate::relevance::skills::SkillSet;
use crate::relevance::verdict::Verdict;

/// A recorded evaluation of one resume against one stored JD.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Evaluation {
    pub id: Uuid,
    pub jd_id: Uuid,
    /// File name of the uploaded resume; `None` for pasted text.
    pub resume_filename: Option<String>,
    pub score: u8,
    pub verdict: Verdict,
    pub matched_skills: SkillSet,
    pub missing_skills: SkillSet,
    pub created_at: DateTime<Utc>,
}

/// Input to `EvaluationStore::put`.
#[derive(Debug, Clone)]
pub struct NewEvaluation {
    pub jd_id: Uuid,
    pub resume_filename: Option<String>,
    pub score: u8,
    pub verdict: Verdict,
    pub matched_skills: SkillSet,
    pub missing_skills: SkillSet,
}

impl NewEvaluation {
    pub fn from_result(jd_id: Uuid, resume_filename: Option<String>, result: &MatchResult) -> Self {
        Self {
            jd_id,
            resume_filename,
            score: result.score,
            verdict: result.verdict,
            matched_skills: result.matched_skills.clone(),
            missing_skills: result.missing_skills.clone(),
        }
    }
}

/// Row shape of the `evaluations` table.
#[derive(Debug, Clone, FromRow)]
pub struct EvaluationRow {
    pub id: Uuid,
    pub jd_id: Uuid,
    pub resume_filename: Option<String>,
    pub score: i16,
    pub verdict: String,
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<EvaluationRow> for Evaluation {
    type Error = anyhow::Error;

    fn try_from(row: EvaluationRow) -> Result<Self, Self::Error> {
        let score = u8::try_from(row.score)
            .with_context(|| format!("Stored score {} out of range", row.score))?;
        let verdict = Verdict::from_label(&row.verdict)
            .ok_or_else(|| anyhow!("Unknown stored verdict '{}'", row.verdict))?;

        Ok(Self {
            id: row.id,
            jd_id: row.jd_id,
            resume_filename: row.resume_filename,
            score,
            verdict,
            matched_skills: row.matched_skills.into_iter().collect(),
            missing_skills: row.missing_skills.into_iter().collect(),
            created_at: row.created_at,
        })
    }
}
