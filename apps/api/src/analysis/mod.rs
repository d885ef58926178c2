// Resume Analysis Pipeline
// Implements: PDF text extraction, prompt assembly, task dispatch, rendering.
// All LLM calls go through llm_client — no direct Gemini calls here.

pub mod dispatch;
pub mod extract;
pub mod handlers;
pub mod prompt;
pub mod render;
