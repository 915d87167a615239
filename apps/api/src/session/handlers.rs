//! Axum route handlers for the Session API.

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::analysis::handlers::read_resume_form;
use crate::analysis::report::OptimisationReport;
use crate::errors::AppError;
use crate::extraction::extract_text_blocking;
use crate::session::{Session, SessionSummary};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SessionOptimiseRequest {
    pub job_description: String,
}

/// Looks up a session or answers 404.
pub async fn require_session(state: &AppState, id: Uuid) -> Result<Session, AppError> {
    state
        .sessions
        .get(id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Session {id} not found")))
}

/// POST /api/v1/sessions
///
/// Extracts the uploaded resume once and keeps its text for later requests.
pub async fn handle_create_session(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<SessionSummary>), AppError> {
    let form = read_resume_form(multipart).await?;
    let filename = form.filename.clone();
    let resume_text = extract_text_blocking(form.filename, form.content).await?;

    if resume_text.trim().is_empty() {
        return Err(AppError::Validation(
            "No text could be extracted from the uploaded resume.".to_string(),
        ));
    }

    let session = state.sessions.create(filename, resume_text).await;
    Ok((StatusCode::CREATED, Json(SessionSummary::from(&session))))
}

/// GET /api/v1/sessions/:id
pub async fn handle_get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionSummary>, AppError> {
    let session = require_session(&state, id).await?;
    Ok(Json(SessionSummary::from(&session)))
}

/// DELETE /api/v1/sessions/:id
pub async fn handle_delete_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if state.sessions.remove(id).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("Session {id} not found")))
    }
}

/// POST /api/v1/sessions/:id/optimise
pub async fn handle_session_optimise(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<SessionOptimiseRequest>,
) -> Result<Json<OptimisationReport>, AppError> {
    let session = require_session(&state, id).await?;
    let report = state
        .analyzer
        .optimise(&session.resume_text, &request.job_description)?;
    Ok(Json(report))
}
