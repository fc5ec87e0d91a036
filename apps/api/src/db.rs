use anyhow::Result;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

/// Creates and returns a PostgreSQL connection pool.
pub async fn create_pool(database_url: &str) -> Result<PgPool> {
    info!("Connecting to PostgreSQL...");

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await?;

    info!("PostgreSQL connection pool established");
    Ok(pool)
}

/// Creates the `job_descriptions` and `evaluations` tables if they do not exist yet.
pub async fn ensure_schema(pool: &PgPool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS job_descriptions (
            id         UUID PRIMARY KEY,
            title      TEXT NOT NULL DEFAULT '',
            raw_text   TEXT NOT NULL,
            skills     TEXT[] NOT NULL DEFAULT '{}',
            created_at TIMESTAMPTZ NOT NULL DEFAULT now()
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS evaluations (
            id              UUID PRIMARY KEY,
            jd_id           UUID NOT NULL REFERENCES job_descriptions (id),
            resume_filename TEXT,
            score           SMALLINT NOT NULL,
            verdict         TEXT NOT NULL,
            matched_skills  TEXT[] NOT NULL DEFAULT '{}',
            missing_skills  TEXT[] NOT NULL DEFAULT '{}',
            created_at      TIMESTAMPTZ NOT NULL DEFAULT now()
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS evaluations_jd_id_idx ON evaluations (jd_id)")
        .execute(pool)
        .await?;

    info!("Schema ready (job_descriptions, evaluations)");
    Ok(())
}
