//! Task Dispatcher — runs one user action through the full pipeline:
//! extraction → prompt assembly → gateway call → rendering.
//!
//! Session state is explicit and threaded through every dispatch; there is no
//! process-global document or result.

use bytes::Bytes;
use tracing::{debug, info};

use crate::analysis::extract::extract_document_text;
use crate::analysis::prompt::{assemble, AnalysisAction, TaskDirective};
use crate::analysis::render::{render, RenderedResult};
use crate::errors::AppError;
use crate::llm_client::InferenceBackend;

/// The most recent upload, held only so each action can re-read it fresh.
#[derive(Debug, Clone)]
pub struct UploadedDocument {
    pub content: Bytes,
    pub content_type: String,
    /// Filled in once a dispatch has parsed the document.
    pub page_count: Option<usize>,
}

/// One user session: the current document and the current result. A new
/// action overwrites the prior result entirely — there is no history.
#[derive(Debug, Default)]
pub struct Session {
    pub document: Option<UploadedDocument>,
    pub result: Option<String>,
}

impl Session {
    /// Export is offered only in this state.
    pub fn has_result(&self) -> bool {
        self.result.as_deref().is_some_and(|r| !r.is_empty())
    }
}

/// Outcome of one dispatch. The suppressed paths are named variants rather
/// than silent fallthroughs so callers and tests can see them.
#[derive(Debug)]
pub enum DispatchOutcome {
    Completed(RenderedResult),
    /// A document-requiring action ran without an upload: no gateway call,
    /// result left unchanged.
    NoDocument,
    /// The free-query action ran with a blank query: no gateway call.
    EmptyQuery,
}

/// Runs one action end to end against the session's current document.
///
/// Gateway failures do not abort the action: they are formatted as an
/// `"Error: {description}"` result and flow through rendering and export
/// exactly like a successful completion. Malformed documents, by contrast,
/// abort the action visibly and leave the current result unchanged.
pub async fn dispatch(
    action: AnalysisAction,
    job_description: &str,
    query: &str,
    session: &mut Session,
    backend: &dyn InferenceBackend,
) -> Result<DispatchOutcome, AppError> {
    let Some(document) = session.document.as_mut() else {
        debug!(?action, "dispatch skipped: no document uploaded");
        return Ok(DispatchOutcome::NoDocument);
    };

    let (directive, context_text) = match action {
        AnalysisAction::ResumeReview => (TaskDirective::ResumeReview, job_description),
        AnalysisAction::SkillImprovement => (TaskDirective::SkillImprovement, job_description),
        AnalysisAction::KeywordCheck => (TaskDirective::KeywordCheck, job_description),
        AnalysisAction::PercentageMatch => (TaskDirective::PercentageMatch, job_description),
        AnalysisAction::FreeQuery => {
            if query.trim().is_empty() {
                debug!("dispatch skipped: free query is empty");
                return Ok(DispatchOutcome::EmptyQuery);
            }
            // The question doubles as both context and directive.
            (TaskDirective::FreeQuery(query.to_string()), query)
        }
    };

    // Each action reads the stored bytes fresh; nothing is cached between
    // actions beyond the bytes themselves.
    let extraction = extract_document_text(&document.content)?;
    document.page_count = Some(extraction.page_count);

    let request = assemble(context_text.to_string(), extraction.text, &directive);

    info!(
        ?action,
        pages = extraction.page_count,
        content_type = %document.content_type,
        "dispatching analysis to inference backend"
    );

    let result_text = match backend.generate(&request.segments()).await {
        Ok(text) => text,
        Err(e) => format!("Error: {e}"),
    };

    session.result = Some(result_text.clone());

    Ok(DispatchOutcome::Completed(render(result_text)))
}
