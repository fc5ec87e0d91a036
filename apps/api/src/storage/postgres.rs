use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::evaluation::{Evaluation, EvaluationRow, NewEvaluation};
use crate::models::job_description::{JobDescription, JobDescriptionRow, NewJobDescription};
use crate::storage::{EvaluationStore, JdStore};

/// Postgres-backed JD store over the `job_descriptions` table.
#[derive(Clone)]
pub struct PgJdStore {
    pool: PgPool,
}

impl PgJdStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl JdStore for PgJdStore {
    async fn put(&self, jd: NewJobDescription) -> Result<JobDescription> {
        let row: JobDescriptionRow = sqlx::query_as(
            r#"
            INSERT INTO job_descriptions (id, title, raw_text, skills)
            VALUES ($1, $2, $3, $4)
            RETURNING id, title, raw_text, skills, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&jd.title)
        .bind(&jd.raw_text)
        .bind(jd.skills.into_vec())
        .fetch_one(&self.pool)
        .await
        .context("Failed to insert job description")?;

        Ok(row.into())
    }

    async fn get(&self, id: Uuid) -> Result<Option<JobDescription>> {
        let row: Option<JobDescriptionRow> = sqlx::query_as(
            "SELECT id, title, raw_text, skills, created_at FROM job_descriptions WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .with_context(|| format!("Failed to load job description {id}"))?;

        Ok(row.map(JobDescription::from))
    }

    fn backend(&self) -> &'static str {
        "postgres"
    }
}

const EVALUATION_COLUMNS: &str =
    "id, jd_id, resume_filename, score, verdict, matched_skills, missing_skills, created_at";

/// Postgres-backed evaluation history over the `evaluations` table.
#[derive(Clone)]
pub struct PgEvaluationStore {
    pool: PgPool,
}

impl PgEvaluationStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EvaluationStore for PgEvaluationStore {
    async fn put(&self, evaluation: NewEvaluation) -> Result<Evaluation> {
        let row: EvaluationRow = sqlx::query_as(&format!(
            r#"
            INSERT INTO evaluations
                (id, jd_id, resume_filename, score, verdict, matched_skills, missing_skills)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {EVALUATION_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(evaluation.jd_id)
        .bind(&evaluation.resume_filename)
        .bind(i16::from(evaluation.score))
        .bind(evaluation.verdict.label())
        .bind(evaluation.matched_skills.into_vec())
        .bind(evaluation.missing_skills.into_vec())
        .fetch_one(&self.pool)
        .await
        .context("Failed to insert evaluation")?;

        Evaluation::try_from(row)
    }

    async fn get(&self, id: Uuid) -> Result<Option<Evaluation>> {
        let row: Option<EvaluationRow> = sqlx::query_as(&format!(
            "SELECT {EVALUATION_COLUMNS} FROM evaluations WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .with_context(|| format!("Failed to load evaluation {id}"))?;

        row.map(Evaluation::try_from).transpose()
    }

    async fn list_for_jd(&self, jd_id: Uuid) -> Result<Vec<Evaluation>> {
        let rows: Vec<EvaluationRow> = sqlx::query_as(&format!(
            "SELECT {EVALUATION_COLUMNS} FROM evaluations WHERE jd_id = $1 ORDER BY created_at DESC"
        ))
        .bind(jd_id)
        .fetch_all(&self.pool)
        .await
        .with_context(|| format!("Failed to list evaluations for job description {jd_id}"))?;

        rows.into_iter().map(Evaluation::try_from).collect()
    }
}
