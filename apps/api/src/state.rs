use std::sync::Arc;

use tokio::sync::Mutex;

use crate::analysis::dispatch::Session;
use crate::llm_client::InferenceBackend;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// The inference gateway. Production: `GeminiClient`; tests inject fakes.
    pub llm: Arc<dyn InferenceBackend>,
    /// The one user session: current document and current result. The mutex
    /// is held across the inference call, so actions run strictly one at a
    /// time — a second action waits for the first to finish.
    pub session: Arc<Mutex<Session>>,
}

impl AppState {
    pub fn new(llm: Arc<dyn InferenceBackend>) -> Self {
        Self {
            llm,
            session: Arc::new(Mutex::new(Session::default())),
        }
    }
}
