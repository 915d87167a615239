use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::extraction::ExtractionError;
use crate::llm_client::LlmError;
use crate::search::SearchError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("{0}")]
    UnsupportedFormat(String),

    #[error("Could not process resume: {0}")]
    Extraction(String),

    #[error("Agent error: {0}")]
    Agent(String),

    #[error("Search error: {0}")]
    Search(String),

    #[error("{0} is not configured")]
    AgentUnavailable(&'static str),
}

impl From<ExtractionError> for AppError {
    fn from(err: ExtractionError) -> Self {
        match err {
            ExtractionError::UnsupportedFormat(_) => AppError::UnsupportedFormat(err.to_string()),
            ExtractionError::Failure { .. } => AppError::Extraction(err.to_string()),
        }
    }
}

impl From<LlmError> for AppError {
    fn from(err: LlmError) -> Self {
        AppError::Agent(err.to_string())
    }
}

impl From<SearchError> for AppError {
    fn from(err: SearchError) -> Self {
        AppError::Search(err.to_string())
    }
}

impl AppError {
    fn parts(&self) -> (StatusCode, &'static str, String) {
        match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::UnsupportedFormat(msg) => (
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                "UNSUPPORTED_FORMAT",
                msg.clone(),
            ),
            AppError::Extraction(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "EXTRACTION_FAILED",
                format!("Could not process resume: {msg}"),
            ),
            AppError::Agent(msg) => {
                tracing::error!("Agent error: {msg}");
                (
                    StatusCode::BAD_GATEWAY,
                    "AGENT_ERROR",
                    "An AI processing error occurred".to_string(),
                )
            }
            AppError::Search(msg) => {
                tracing::error!("Search error: {msg}");
                (
                    StatusCode::BAD_GATEWAY,
                    "SEARCH_ERROR",
                    "The web search failed".to_string(),
                )
            }
            AppError::AgentUnavailable(what) => (
                StatusCode::SERVICE_UNAVAILABLE,
                "AGENT_UNAVAILABLE",
                format!("{what} is not configured on this server"),
            ),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.parts();

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_format_maps_to_415() {
        let err: AppError = ExtractionError::UnsupportedFormat("txt".to_string()).into();
        let (status, code, message) = err.parts();
        assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
        assert_eq!(code, "UNSUPPORTED_FORMAT");
        assert!(message.contains("PDF or DOCX"));
    }

    #[test]
    fn test_extraction_failure_keeps_cause() {
        let err: AppError = ExtractionError::Failure {
            format: "PDF",
            cause: "invalid file header".to_string(),
        }
        .into();
        let (status, _, message) = err.parts();
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(message.contains("invalid file header"));
    }

    #[test]
    fn test_agent_errors_hide_details() {
        let (status, code, message) = AppError::Agent("api key leaked?".to_string()).parts();
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(code, "AGENT_ERROR");
        assert!(!message.contains("api key"));
    }

    #[tokio::test]
    async fn test_response_body_has_error_envelope() {
        let response = AppError::Validation("job_description cannot be empty".to_string())
            .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(body["error"]["message"], "job_description cannot be empty");
    }
}
