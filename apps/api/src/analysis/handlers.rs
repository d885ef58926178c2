//! Axum route handlers for the Analysis API.

use axum::{
    extract::{Multipart, State},
    http::header,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::analysis::dispatch::{dispatch, DispatchOutcome, UploadedDocument};
use crate::analysis::prompt::AnalysisAction;
use crate::analysis::render::RenderedResult;
use crate::errors::AppError;
use crate::export::{encode_response_pdf, EXPORT_FILE_NAME};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub status: String,
    pub file_name: Option<String>,
    pub size_bytes: usize,
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub action: AnalysisAction,
    #[serde(default)]
    pub job_description: String,
    #[serde(default)]
    pub query: String,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub status: String,
    pub result: Option<RenderedResult>,
    /// Page count of the current document, once an action has parsed it.
    pub pages: Option<usize>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/resume
///
/// Multipart upload of the resume PDF. Replaces the session's current
/// document; the bytes are held only for later actions, never persisted.
pub async fn handle_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    let field = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
        .ok_or_else(|| AppError::Validation("No file field in upload".to_string()))?;

    let content_type = field.content_type().unwrap_or_default().to_string();
    let file_name = field.file_name().map(String::from);

    let is_pdf = content_type == "application/pdf"
        || file_name
            .as_deref()
            .is_some_and(|n| n.to_lowercase().ends_with(".pdf"));
    if !is_pdf {
        return Err(AppError::Validation(
            "Only PDF resumes are accepted".to_string(),
        ));
    }

    let content = field
        .bytes()
        .await
        .map_err(|e| AppError::Validation(format!("Could not read upload: {e}")))?;
    if content.is_empty() {
        return Err(AppError::Validation("Uploaded file is empty".to_string()));
    }

    let size_bytes = content.len();
    info!(size_bytes, ?file_name, "resume uploaded");

    let mut session = state.session.lock().await;
    session.document = Some(UploadedDocument {
        content,
        content_type: "application/pdf".to_string(),
        page_count: None,
    });

    Ok(Json(UploadResponse {
        status: "ok".to_string(),
        file_name,
        size_bytes,
    }))
}

/// POST /api/v1/analyze
///
/// Runs one analysis action through the pipeline. A document-requiring
/// action without an upload, or a blank free query, returns `status`
/// "no_document" / "empty_query" with no result and no inference call.
pub async fn handle_analyze(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let mut session = state.session.lock().await;

    let outcome = dispatch(
        request.action,
        &request.job_description,
        &request.query,
        &mut session,
        state.llm.as_ref(),
    )
    .await?;

    let pages = session.document.as_ref().and_then(|d| d.page_count);

    let response = match outcome {
        DispatchOutcome::Completed(result) => AnalyzeResponse {
            status: "ok".to_string(),
            result: Some(result),
            pages,
        },
        DispatchOutcome::NoDocument => AnalyzeResponse {
            status: "no_document".to_string(),
            result: None,
            pages,
        },
        DispatchOutcome::EmptyQuery => AnalyzeResponse {
            status: "empty_query".to_string(),
            result: None,
            pages,
        },
    };

    Ok(Json(response))
}

/// GET /api/v1/export
///
/// Encodes the current result as a downloadable PDF. Available only once a
/// non-empty result exists; error-text results export like any other.
pub async fn handle_export(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let session = state.session.lock().await;

    if !session.has_result() {
        return Err(AppError::NotFound("No result to export".to_string()));
    }
    let result = session.result.as_deref().unwrap_or_default();

    let buffer = encode_response_pdf(result)?;

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{EXPORT_FILE_NAME}\""),
            ),
        ],
        buffer,
    ))
}
