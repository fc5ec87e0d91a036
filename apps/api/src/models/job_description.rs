use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::relevance::skills::SkillSet;

/// A stored job description. `skills` is extracted once at submission and never recomputed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobDescription {
    pub id: Uuid,
    pub title: String,
    pub raw_text: String,
    pub skills: SkillSet,
    pub created_at: DateTime<Utc>,
}

/// Input to `JdStore::put`.
#[derive(Debug, Clone)]
pub struct NewJobDescription {
    pub title: String,
    pub raw_text: String,
    pub skills: SkillSet,
}

/// Row shape of the `job_descriptions` table.
#[derive(Debug, Clone, FromRow)]
pub struct JobDescriptionRow {
    pub id: Uuid,
    pub title: String,
    pub raw_text: String,
    pub skills: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl From<JobDescriptionRow> for JobDescription {
    fn from(row: JobDescriptionRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            raw_text: row.raw_text,
            // Stored tokens are already normalized; re-normalizing is a no-op.
            skills: row.skills.into_iter().collect(),
            created_at: row.created_at,
        }
    }
}
