//! Axum route handlers for the keyword analysis API.

use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::analysis::classifier::{classify, MatchMode, MatchResult};
use crate::analysis::ranker::{rank, rank_all, KeywordRanking, DEFAULT_KEYWORD_LIMIT};
use crate::analysis::report::{require_documents, OptimisationReport};
use crate::analysis::similarity;
use crate::analysis::tokenizer::tokenize;
use crate::errors::AppError;
use crate::extraction::extract_text_blocking;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct KeywordsRequest {
    pub text: String,
    /// Defaults to 25. `0` returns every distinct keyword.
    pub limit: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct MatchRequest {
    pub keywords: Vec<String>,
    pub text: String,
    pub mode: Option<MatchMode>,
}

#[derive(Debug, Deserialize)]
pub struct ScoreRequest {
    pub resume_text: String,
    pub job_description: String,
}

#[derive(Debug, Serialize)]
pub struct ScoreResponse {
    pub score: u32,
}

/// Resume file and optional job description read from a multipart form.
pub struct ResumeForm {
    pub filename: String,
    pub content: Vec<u8>,
    pub job_description: Option<String>,
}

/// Reads the `resume` file field and the `job_description` text field.
pub async fn read_resume_form(mut multipart: Multipart) -> Result<ResumeForm, AppError> {
    let mut resume: Option<(String, Vec<u8>)> = None;
    let mut job_description = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        match field.name() {
            Some("resume") => {
                let filename = field.file_name().unwrap_or_default().to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Failed to read resume upload: {e}")))?;
                resume = Some((filename, bytes.to_vec()));
            }
            Some("job_description") => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("Failed to read job_description: {e}")))?;
                job_description = Some(text);
            }
            _ => {}
        }
    }

    let (filename, content) = resume.ok_or_else(|| {
        AppError::Validation("Please upload your resume in the 'resume' field.".to_string())
    })?;

    Ok(ResumeForm {
        filename,
        content,
        job_description,
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/optimise
///
/// One-shot flow: multipart resume upload + job description → full report.
pub async fn handle_optimise(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<OptimisationReport>, AppError> {
    let form = read_resume_form(multipart).await?;
    let job_description = form.job_description.unwrap_or_default();
    // Block before doing any extraction work when the job description is missing.
    if job_description.trim().is_empty() {
        return Err(AppError::Validation(
            "Please make sure you have uploaded a resume AND pasted the job description before optimising."
                .to_string(),
        ));
    }

    info!("Optimising {} ({} bytes)", form.filename, form.content.len());
    let resume_text = extract_text_blocking(form.filename, form.content).await?;

    let report = state.analyzer.optimise(&resume_text, &job_description)?;
    Ok(Json(report))
}

/// POST /api/v1/keywords
pub async fn handle_keywords(
    State(state): State<AppState>,
    Json(request): Json<KeywordsRequest>,
) -> Result<Json<KeywordRanking>, AppError> {
    let tokens = tokenize(&request.text, &state.analyzer.stop_words);
    let ranking = match request.limit.unwrap_or(DEFAULT_KEYWORD_LIMIT) {
        0 => rank_all(&tokens),
        limit => rank(&tokens, limit),
    };
    Ok(Json(ranking))
}

/// POST /api/v1/match
pub async fn handle_match(
    State(state): State<AppState>,
    Json(request): Json<MatchRequest>,
) -> Result<Json<MatchResult>, AppError> {
    if request.text.trim().is_empty() {
        return Err(AppError::Validation("text cannot be empty".to_string()));
    }
    let mode = request.mode.unwrap_or(state.analyzer.match_mode);
    Ok(Json(classify(
        request.keywords.iter().map(String::as_str),
        &request.text,
        mode,
    )))
}

/// POST /api/v1/score
pub async fn handle_score(
    Json(request): Json<ScoreRequest>,
) -> Result<Json<ScoreResponse>, AppError> {
    require_documents(&request.resume_text, &request.job_description)?;
    Ok(Json(ScoreResponse {
        score: similarity::score(&request.resume_text, &request.job_description),
    }))
}
