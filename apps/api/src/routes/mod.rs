pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::analysis::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/resume", post(handlers::handle_upload))
        .route("/api/v1/analyze", post(handlers::handle_analyze))
        .route("/api/v1/export", get(handlers::handle_export))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::testpdf::pdf_with_pages;
    use crate::llm_client::{InferenceBackend, LlmError};
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use http_body_util::BodyExt;
    use std::sync::Arc;
    use tower::ServiceExt;

    struct CannedBackend(&'static str);

    #[async_trait]
    impl InferenceBackend for CannedBackend {
        async fn generate(&self, _segments: &[&str]) -> Result<String, LlmError> {
            Ok(self.0.to_string())
        }
    }

    fn test_state() -> AppState {
        AppState::new(Arc::new(CannedBackend("A strong match.")))
    }

    fn multipart_upload(pdf: &[u8]) -> Request<Body> {
        let boundary = "jobfit-test-boundary";
        let mut body = Vec::new();
        body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
        body.extend_from_slice(
            b"Content-Disposition: form-data; name=\"resume\"; filename=\"resume.pdf\"\r\n",
        );
        body.extend_from_slice(b"Content-Type: application/pdf\r\n\r\n");
        body.extend_from_slice(pdf);
        body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

        Request::post("/api/v1/resume")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let app = build_router(test_state());
        let response = app
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn export_without_result_is_not_found() {
        let app = build_router(test_state());
        let response = app
            .oneshot(Request::get("/api/v1/export").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn analyze_without_document_reports_no_document() {
        let app = build_router(test_state());
        let response = app
            .oneshot(
                Request::post("/api/v1/analyze")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(
                        r#"{"action": "resume_review", "job_description": "Backend role."}"#,
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["status"], "no_document");
        assert!(json["result"].is_null());
    }

    #[tokio::test]
    async fn upload_analyze_export_flow() {
        let state = test_state();
        let pdf = pdf_with_pages(&["Experienced engineer."]);

        let response = build_router(state.clone())
            .oneshot(multipart_upload(&pdf))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = build_router(state.clone())
            .oneshot(
                Request::post("/api/v1/analyze")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(
                        r#"{"action": "percentage_match", "job_description": "Backend role requiring Go."}"#,
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["status"], "ok");
        assert_eq!(json["result"]["label"], "Response");
        assert_eq!(json["result"]["body"], "A strong match.");
        assert_eq!(json["pages"], 1);

        let response = build_router(state)
            .oneshot(Request::get("/api/v1/export").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/pdf"
        );
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"response.pdf\""
        );
        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert!(body.starts_with(b"%PDF"));
    }

    #[tokio::test]
    async fn upload_rejects_non_pdf() {
        let app = build_router(test_state());
        let boundary = "jobfit-test-boundary";
        let body = format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"resume\"; filename=\"resume.txt\"\r\nContent-Type: text/plain\r\n\r\nplain text\r\n--{boundary}--\r\n"
        );
        let response = app
            .oneshot(
                Request::post("/api/v1/resume")
                    .header(
                        header::CONTENT_TYPE,
                        format!("multipart/form-data; boundary={boundary}"),
                    )
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
