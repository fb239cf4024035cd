//! Axum route handler for the Match API.

use axum::{
    extract::{Multipart, State},
    Json,
};
use bytes::Bytes;
use tracing::{debug, info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::documents::Document;
use crate::errors::AppError;
use crate::matching::prompts::build_prompt;
use crate::matching::response::{parse_match_result, MatchResult};
use crate::matching::scorer::Scorer;
use crate::state::AppState;

const RESUME_FIELD: &str = "resume";
const JD_FIELD: &str = "jd";

/// POST /match
///
/// Multipart upload with two file parts, `resume` and `jd` (`.pdf` or `.txt`).
/// Returns `{"match_score": <float>}`.
pub async fn handle_match(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<MatchResult>, AppError> {
    let request_id = Uuid::new_v4();

    score_upload(state, multipart)
        .instrument(info_span!("match", %request_id))
        .await
        .map(Json)
}

async fn score_upload(state: AppState, multipart: Multipart) -> Result<MatchResult, AppError> {
    let (resume, jd) = read_uploads(multipart).await?;
    info!(
        resume = %resume.filename,
        jd = %jd.filename,
        "Scoring resume against job description"
    );

    let result = run_match(state.scorer.as_ref(), resume, jd).await?;
    info!(match_score = result.match_score, "Match scored");

    Ok(result)
}

/// Full pipeline: extract resume → extract JD → build prompt → remote score → parse.
/// The first failing stage ends the request.
pub async fn run_match(
    scorer: &dyn Scorer,
    mut resume: Document,
    mut jd: Document,
) -> Result<MatchResult, AppError> {
    // PDF parsing is CPU-bound; keep it off the async workers.
    let (resume_text, jd_text) = tokio::task::spawn_blocking(move || {
        let resume_text = resume.extract_text()?;
        let jd_text = jd.extract_text()?;
        Ok::<_, AppError>((resume_text, jd_text))
    })
    .await
    .map_err(|e| AppError::Internal(e.into()))??;

    let prompt = build_prompt(&resume_text, &jd_text);
    let raw_reply = scorer.score(&prompt).await?;

    debug!("==== Gemini raw output ====\n{raw_reply}");

    parse_match_result(&raw_reply).map_err(|e| {
        warn!("Failed to extract JSON from model reply: {e}; reply: {raw_reply}");
        AppError::from(e)
    })
}

/// Pulls the `resume` and `jd` file parts out of the multipart body.
async fn read_uploads(mut multipart: Multipart) -> Result<(Document, Document), AppError> {
    let mut resume = None;
    let mut jd = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.body_text()))?
    {
        let (name, slot) = match field.name() {
            Some(RESUME_FIELD) => (RESUME_FIELD, &mut resume),
            Some(JD_FIELD) => (JD_FIELD, &mut jd),
            _ => continue,
        };

        // A part without a filename is a plain form value, not an upload.
        let filename = field
            .file_name()
            .ok_or_else(|| {
                AppError::UnprocessableEntity(format!("Expected an uploaded file for field: {name}"))
            })?
            .to_string();
        let data: Bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;

        *slot = Some(Document::new(filename, data));
    }

    let resume = resume.ok_or_else(|| missing_field(RESUME_FIELD))?;
    let jd = jd.ok_or_else(|| missing_field(JD_FIELD))?;
    Ok((resume, jd))
}

fn missing_field(name: &str) -> AppError {
    AppError::UnprocessableEntity(format!("Field required: {name}"))
}
