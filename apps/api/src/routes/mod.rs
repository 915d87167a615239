pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::agent::handlers as agent;
use crate::analysis::handlers as analysis;
use crate::session::handlers as session;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        // Keyword analysis
        .route("/api/v1/optimise", post(analysis::handle_optimise))
        .route("/api/v1/keywords", post(analysis::handle_keywords))
        .route("/api/v1/match", post(analysis::handle_match))
        .route("/api/v1/score", post(analysis::handle_score))
        // Sessions
        .route("/api/v1/sessions", post(session::handle_create_session))
        .route(
            "/api/v1/sessions/:id",
            get(session::handle_get_session).delete(session::handle_delete_session),
        )
        .route(
            "/api/v1/sessions/:id/optimise",
            post(session::handle_session_optimise),
        )
        .route("/api/v1/sessions/:id/rewrite", post(agent::handle_rewrite))
        // Agent
        .route(
            "/api/v1/agent/company-research",
            post(agent::handle_company_research),
        )
        .route("/api/v1/agent/job-search", post(agent::handle_job_search))
        .layer(DefaultBodyLimit::max(upload_limit))
        .with_state(state)
}

#[cfg(test)]
pub(crate) fn test_state() -> AppState {
    use std::sync::Arc;

    use crate::analysis::classifier::MatchMode;
    use crate::analysis::Analyzer;
    use crate::config::Config;
    use crate::session::SessionStore;

    AppState {
        config: Config {
            port: 0,
            rust_log: "debug".to_string(),
            anthropic_api_key: None,
            tavily_api_key: None,
            max_upload_bytes: 1024 * 1024,
            match_mode: MatchMode::Substring,
            search_max_results: 5,
            session_ttl: chrono::Duration::hours(1),
        },
        analyzer: Arc::new(Analyzer::default()),
        sessions: SessionStore::new(chrono::Duration::hours(1)),
        llm: None,
        search: None,
    }
}

#[cfg(test)]
mod tests {
    use std::io::{Cursor, Write};

    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
    };
    use serde_json::Value;
    use tower::ServiceExt;

    use super::*;

    const BOUNDARY: &str = "optimiser-test-boundary";

    fn docx_bytes(paragraphs: &[&str]) -> Vec<u8> {
        let body: String = paragraphs
            .iter()
            .map(|p| format!("<w:p><w:r><w:t>{p}</w:t></w:r></w:p>"))
            .collect();
        let xml = format!("<w:document><w:body>{body}<w:sectPr/></w:body></w:document>");

        let mut buffer = Cursor::new(Vec::new());
        {
            let mut writer = zip::ZipWriter::new(&mut buffer);
            writer
                .start_file("word/document.xml", zip::write::SimpleFileOptions::default())
                .unwrap();
            writer.write_all(xml.as_bytes()).unwrap();
            writer.finish().unwrap();
        }
        buffer.into_inner()
    }

    fn multipart_body(filename: &str, file: &[u8], job_description: Option<&str>) -> Vec<u8> {
        let mut body = Vec::new();
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"resume\"; filename=\"{filename}\"\r\n\
                 Content-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(file);
        body.extend_from_slice(b"\r\n");
        if let Some(jd) = job_description {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"job_description\"\r\n\r\n{jd}\r\n"
                )
                .as_bytes(),
            );
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        body
    }

    fn multipart_request(uri: &str, body: Vec<u8>) -> Request<Body> {
        Request::post(uri)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    async fn json_body(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let response = build_router(test_state())
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["status"], "ok");
    }

    #[tokio::test]
    async fn test_optimise_docx_upload() {
        let file = docx_bytes(&["Jane Doe", "Built scalable APIs using Python and deployed via Docker."]);
        let body = multipart_body(
            "resume.docx",
            &file,
            Some("We need a Python developer with AWS and Docker experience. Experience with Python and AWS required."),
        );

        let response = build_router(test_state())
            .oneshot(multipart_request("/api/v1/optimise", body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let report = json_body(response).await;
        assert_eq!(report["top_keywords"][0], "python");
        assert_eq!(report["top_keywords"][1], "aws");
        let missing = report["matches"]["missing"].as_array().unwrap();
        assert!(missing.contains(&Value::from("aws")));
        assert!(report["template"].as_str().unwrap().contains("Professional Summary"));
    }

    #[tokio::test]
    async fn test_optimise_rejects_unsupported_format() {
        let body = multipart_body("resume.txt", b"Python", Some("Python developer"));
        let response = build_router(test_state())
            .oneshot(multipart_request("/api/v1/optimise", body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
        assert_eq!(json_body(response).await["error"]["code"], "UNSUPPORTED_FORMAT");
    }

    #[tokio::test]
    async fn test_optimise_requires_job_description() {
        let body = multipart_body("resume.docx", &docx_bytes(&["Python"]), None);
        let response = build_router(test_state())
            .oneshot(multipart_request("/api/v1/optimise", body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_session_upload_then_delete() {
        let state = test_state();
        let router = build_router(state.clone());

        let body = multipart_body("cv.docx", &docx_bytes(&["Rust engineer"]), None);
        let response = router
            .clone()
            .oneshot(multipart_request("/api/v1/sessions", body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let summary = json_body(response).await;
        let id = summary["session_id"].as_str().unwrap().to_string();
        assert_eq!(summary["resume_filename"], "cv.docx");

        let response = router
            .clone()
            .oneshot(
                Request::delete(format!("/api/v1/sessions/{id}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        assert_eq!(state.sessions.len().await, 0);
    }

    #[tokio::test]
    async fn test_agent_endpoint_unavailable_without_keys() {
        let response = build_router(test_state())
            .oneshot(
                Request::post("/api/v1/agent/job-search")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(r#"{"query": "rust"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
