//! Axum route handlers for the agent API.
//! Every endpoint answers 503 when its collaborator is not configured.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::agent::{research_company, rewrite_resume, search_jobs, RewriteOutcome, ScoredJobLead};
use crate::errors::AppError;
use crate::session::handlers::require_session;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CompanyResearchRequest {
    pub company_name: String,
    pub role: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CompanyResearchResponse {
    pub company_name: String,
    pub brief: String,
}

#[derive(Debug, Deserialize)]
pub struct JobSearchRequest {
    pub query: String,
    /// When present, results are scored against the session's resume.
    pub session_id: Option<Uuid>,
    pub max_results: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct JobSearchResponse {
    pub results: Vec<ScoredJobLead>,
}

#[derive(Debug, Deserialize)]
pub struct RewriteRequest {
    pub job_description: String,
    pub company_brief: Option<String>,
}

/// POST /api/v1/agent/company-research
pub async fn handle_company_research(
    State(state): State<AppState>,
    Json(request): Json<CompanyResearchRequest>,
) -> Result<Json<CompanyResearchResponse>, AppError> {
    let brief = research_company(
        &request.company_name,
        request.role.as_deref(),
        state.llm()?,
        state.search()?,
        state.config.search_max_results,
    )
    .await?;

    Ok(Json(CompanyResearchResponse {
        company_name: request.company_name.trim().to_string(),
        brief,
    }))
}

/// POST /api/v1/agent/job-search
pub async fn handle_job_search(
    State(state): State<AppState>,
    Json(request): Json<JobSearchRequest>,
) -> Result<Json<JobSearchResponse>, AppError> {
    let search = state.search()?;
    let session = match request.session_id {
        Some(id) => Some(require_session(&state, id).await?),
        None => None,
    };
    // Clients may ask for fewer results than configured, never more
    let ceiling = state.config.search_max_results.max(1);
    let max_results = request.max_results.unwrap_or(ceiling).clamp(1, ceiling);

    let results = search_jobs(
        &request.query,
        session.as_ref().map(|s| s.resume_text.as_str()),
        search,
        max_results,
    )
    .await?;

    Ok(Json(JobSearchResponse { results }))
}

/// POST /api/v1/sessions/:id/rewrite
pub async fn handle_rewrite(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<RewriteRequest>,
) -> Result<Json<RewriteOutcome>, AppError> {
    let llm = state.llm()?;
    let session = require_session(&state, id).await?;

    let outcome = rewrite_resume(
        &state.analyzer,
        &session.resume_text,
        &request.job_description,
        request.company_brief.as_deref(),
        llm,
    )
    .await?;

    Ok(Json(outcome))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::agent::testing::{MockGenerator, MockSearch};
    use crate::routes::test_state;

    #[tokio::test]
    async fn test_company_research_unavailable_without_llm() {
        let err = handle_company_research(
            State(test_state()),
            Json(CompanyResearchRequest {
                company_name: "Acme".to_string(),
                role: None,
            }),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::AgentUnavailable(_)));
    }

    #[tokio::test]
    async fn test_company_research_returns_brief() {
        let mut state = test_state();
        state.llm = Some(Arc::new(MockGenerator::replying("## Overview\nAcme.")));
        state.search = Some(Arc::new(MockSearch::with(vec![(
            "Acme",
            "https://acme.example",
            "Acme makes anvils.",
        )])));

        let Json(response) = handle_company_research(
            State(state),
            Json(CompanyResearchRequest {
                company_name: "  Acme ".to_string(),
                role: Some("Engineer".to_string()),
            }),
        )
        .await
        .unwrap();
        assert_eq!(response.company_name, "Acme");
        assert_eq!(response.brief, "## Overview\nAcme.");
    }

    #[tokio::test]
    async fn test_job_search_scores_against_session_resume() {
        let mut state = test_state();
        state.search = Some(Arc::new(MockSearch::with(vec![
            ("Chef", "https://a.example", "Bake bread."),
            ("Engineer", "https://b.example", "Rust services on Kubernetes."),
        ])));
        let session = state
            .sessions
            .create("cv.pdf".to_string(), "Rust engineer, Kubernetes operator.".to_string())
            .await;

        let Json(response) = handle_job_search(
            State(state),
            Json(JobSearchRequest {
                query: "rust".to_string(),
                session_id: Some(session.id),
                max_results: None,
            }),
        )
        .await
        .unwrap();
        assert_eq!(response.results[0].result.title, "Engineer");
        assert!(response.results.iter().all(|r| r.score.is_some()));
    }

    #[tokio::test]
    async fn test_job_search_caps_requested_results() {
        let mut state = test_state();
        let leads: Vec<(&str, &str, &str)> = (0..8)
            .map(|_| ("Engineer", "https://jobs.example", "Rust services."))
            .collect();
        state.search = Some(Arc::new(MockSearch::with(leads)));

        let request = |max_results: Option<usize>| JobSearchRequest {
            query: "rust".to_string(),
            session_id: None,
            max_results,
        };

        let Json(response) = handle_job_search(State(state.clone()), Json(request(Some(100))))
            .await
            .unwrap();
        assert_eq!(response.results.len(), state.config.search_max_results);

        let Json(response) = handle_job_search(State(state.clone()), Json(request(Some(0))))
            .await
            .unwrap();
        assert_eq!(response.results.len(), 1);

        let Json(response) = handle_job_search(State(state), Json(request(Some(2))))
            .await
            .unwrap();
        assert_eq!(response.results.len(), 2);
    }

    #[tokio::test]
    async fn test_rewrite_requires_existing_session() {
        let mut state = test_state();
        state.llm = Some(Arc::new(MockGenerator::replying("unused")));
        let err = handle_rewrite(
            State(state),
            Path(Uuid::new_v4()),
            Json(RewriteRequest {
                job_description: "Rust".to_string(),
                company_brief: None,
            }),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
