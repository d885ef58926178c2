//! Result Renderer — wraps the gateway output in the labeled container the
//! front end displays. Purely presentational.

use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct RenderedResult {
    pub label: String,
    pub body: String,
}

pub fn render(result_text: String) -> RenderedResult {
    RenderedResult {
        label: "Response".to_string(),
        body: result_text,
    }
}
