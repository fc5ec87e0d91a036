//! Axum route handlers for the JD and evaluation API.

use axum::{
    extract::{Multipart, Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::documents::{extract_text, DocumentKind};
use crate::errors::AppError;
use crate::models::evaluation::{Evaluation, NewEvaluation};
use crate::models::job_description::{JobDescription, NewJobDescription};
use crate::relevance::extractor::{extract, ExtractionMode};
use crate::relevance::scorer::MatchResult;
use crate::relevance::skills::SkillSet;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct SubmitJdRequest {
    #[serde(default)]
    pub title: String,
    pub jd: String,
}

#[derive(Debug, Serialize)]
pub struct SubmitJdResponse {
    pub jd_id: Uuid,
    pub skills: SkillSet,
}

#[derive(Debug, Deserialize)]
pub struct ExtractRequest {
    pub jd: String,
    /// Overrides the configured extraction mode for this request only.
    #[serde(default)]
    pub mode: Option<ExtractionMode>,
}

#[derive(Debug, Serialize)]
pub struct ExtractResponse {
    pub mode: ExtractionMode,
    pub skills: SkillSet,
}

#[derive(Debug, Deserialize)]
pub struct EvaluateRequest {
    pub jd_id: String,
    pub resume_text: String,
}

/// The scoring outcome plus the id under which it was recorded.
#[derive(Debug, Serialize)]
pub struct EvaluateResponse {
    pub evaluation_id: Uuid,
    #[serde(flatten)]
    pub result: MatchResult,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/jd
///
/// Extracts the JD's skills once and stores both. Empty JD text is accepted
/// and simply yields an empty skill set.
pub async fn handle_submit_jd(
    State(state): State<AppState>,
    Json(request): Json<SubmitJdRequest>,
) -> Result<Json<SubmitJdResponse>, AppError> {
    let skills = state.extractor.extract(&request.jd);

    let stored = state
        .store
        .put(NewJobDescription {
            title: request.title.trim().to_string(),
            raw_text: request.jd,
            skills,
        })
        .await?;

    info!(
        jd_id = %stored.id,
        skills = stored.skills.len(),
        mode = %state.extractor.mode,
        "JD stored"
    );

    Ok(Json(SubmitJdResponse {
        jd_id: stored.id,
        skills: stored.skills,
    }))
}

/// GET /api/v1/jd/:id
pub async fn handle_get_jd(
    State(state): State<AppState>,
    Path(jd_id): Path<String>,
) -> Result<Json<JobDescription>, AppError> {
    Ok(Json(load_jd(&state, &jd_id).await?))
}

/// POST /api/v1/jd/extract
///
/// Stateless preview of what would be extracted from a JD. Nothing is stored.
pub async fn handle_extract_preview(
    State(state): State<AppState>,
    Json(request): Json<ExtractRequest>,
) -> Json<ExtractResponse> {
    let mode = request.mode.unwrap_or(state.extractor.mode);
    Json(ExtractResponse {
        mode,
        skills: extract(&request.jd, mode),
    })
}

/// GET /api/v1/jd/:id/evaluations
///
/// Evaluation history for one JD, newest first.
pub async fn handle_list_jd_evaluations(
    State(state): State<AppState>,
    Path(jd_id): Path<String>,
) -> Result<Json<Vec<Evaluation>>, AppError> {
    let jd = load_jd(&state, &jd_id).await?;
    Ok(Json(state.evaluations.list_for_jd(jd.id).await?))
}

/// POST /api/v1/evaluate_resume
pub async fn handle_evaluate_resume(
    State(state): State<AppState>,
    Json(request): Json<EvaluateRequest>,
) -> Result<Json<EvaluateResponse>, AppError> {
    let response = evaluate(&state, &request.jd_id, &request.resume_text, None).await?;
    Ok(Json(response))
}

/// POST /api/v1/evaluate_resume/upload
///
/// Multipart form with a `jd_id` text field and a `resume` file field (PDF or DOCX).
pub async fn handle_evaluate_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<EvaluateResponse>, AppError> {
    let mut jd_id: Option<String> = None;
    let mut upload: Option<(DocumentKind, Option<String>, bytes::Bytes)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        let name = field.name().map(str::to_owned);
        match name.as_deref() {
            Some("jd_id") => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("Invalid jd_id field: {e}")))?;
                jd_id = Some(text);
            }
            Some("resume") => {
                let kind = DocumentKind::detect(field.file_name(), field.content_type())?;
                let file_name = field.file_name().map(str::to_owned);
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Invalid resume field: {e}")))?;
                upload = Some((kind, file_name, bytes));
            }
            _ => {}
        }
    }

    let jd_id = jd_id.ok_or_else(|| AppError::Validation("jd_id field is required".to_string()))?;
    let (kind, file_name, bytes) =
        upload.ok_or_else(|| AppError::Validation("resume file is required".to_string()))?;

    // Fail fast on an unknown JD before paying for document decoding.
    load_jd(&state, &jd_id).await?;

    let resume_text = tokio::task::spawn_blocking(move || extract_text(kind, &bytes))
        .await
        .map_err(|e| AppError::UnprocessableEntity(format!("Document decoding failed: {e}")))??;

    let response = evaluate(&state, &jd_id, &resume_text, file_name).await?;
    Ok(Json(response))
}

/// GET /api/v1/evaluations/:id
pub async fn handle_get_evaluation(
    State(state): State<AppState>,
    Path(evaluation_id): Path<String>,
) -> Result<Json<Evaluation>, AppError> {
    let not_found = || AppError::NotFound("Evaluation not found".to_string());
    let id = Uuid::parse_str(evaluation_id.trim()).map_err(|_| not_found())?;
    let evaluation = state.evaluations.get(id).await?.ok_or_else(not_found)?;
    Ok(Json(evaluation))
}

// ────────────────────────────────────────────────────────────────────────────
// Helpers
// ────────────────────────────────────────────────────────────────────────────

/// Loads a JD by its string id. Malformed ids are reported as not found.
async fn load_jd(state: &AppState, jd_id: &str) -> Result<JobDescription, AppError> {
    let not_found = || AppError::NotFound("JD not found".to_string());
    let id = Uuid::parse_str(jd_id.trim()).map_err(|_| not_found())?;
    state.store.get(id).await?.ok_or_else(not_found)
}

/// Scores a resume against a stored JD and records the outcome.
async fn evaluate(
    state: &AppState,
    jd_id: &str,
    resume_text: &str,
    resume_filename: Option<String>,
) -> Result<EvaluateResponse, AppError> {
    let max = state.config.max_resume_chars;
    if resume_text.chars().count() > max {
        return Err(AppError::PayloadTooLarge(format!(
            "resume text exceeds {max} characters"
        )));
    }

    let jd = load_jd(state, jd_id).await?;
    let result = state.scorer.score(&jd.skills, resume_text);
    let recorded = state
        .evaluations
        .put(NewEvaluation::from_result(jd.id, resume_filename, &result))
        .await?;

    info!(
        evaluation_id = %recorded.id,
        jd_id = %jd.id,
        score = result.score,
        verdict = %result.verdict,
        matched = result.matched_skills.len(),
        missing = result.missing_skills.len(),
        "Resume evaluated"
    );

    Ok(EvaluateResponse {
        evaluation_id: recorded.id,
        result,
    })
}
