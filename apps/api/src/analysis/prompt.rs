//! Prompt Assembler — the stable three-part contract sent to the gateway.
//!
//! Deliberately a structural pass-through: "what the user asked" (context),
//! "what the document says" (reference) and "what analysis is wanted"
//! (directive) stay separate segments all the way to the wire.

use serde::Deserialize;

/// Instruction strings for the four fixed analyses.
pub const RESUME_REVIEW_DIRECTIVE: &str =
    "Review the resume against the job description, highlighting strengths and weaknesses.";
pub const SKILL_IMPROVEMENT_DIRECTIVE: &str = "Suggest skills to improve for better role fit.";
pub const KEYWORD_CHECK_DIRECTIVE: &str = "Provide missing keywords vital for the job role.";
pub const PERCENTAGE_MATCH_DIRECTIVE: &str = "Calculate match percentage and final evaluation.";

/// The discrete user-chosen action, as it arrives from the front end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisAction {
    ResumeReview,
    SkillImprovement,
    KeywordCheck,
    PercentageMatch,
    FreeQuery,
}

/// The instruction describing which analysis to perform. Fixed directives
/// carry their canned instruction string; a free query carries the user's
/// question verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskDirective {
    ResumeReview,
    SkillImprovement,
    KeywordCheck,
    PercentageMatch,
    FreeQuery(String),
}

impl TaskDirective {
    pub fn text(&self) -> &str {
        match self {
            TaskDirective::ResumeReview => RESUME_REVIEW_DIRECTIVE,
            TaskDirective::SkillImprovement => SKILL_IMPROVEMENT_DIRECTIVE,
            TaskDirective::KeywordCheck => KEYWORD_CHECK_DIRECTIVE,
            TaskDirective::PercentageMatch => PERCENTAGE_MATCH_DIRECTIVE,
            TaskDirective::FreeQuery(query) => query,
        }
    }
}

/// The ordered triple handed to the inference gateway, constructed fresh per
/// action and never cached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InferenceRequest {
    pub context_text: String,
    pub reference_text: String,
    pub task_directive: String,
}

impl InferenceRequest {
    /// The three content segments in wire order.
    pub fn segments(&self) -> [&str; 3] {
        [
            &self.context_text,
            &self.reference_text,
            &self.task_directive,
        ]
    }
}

/// Assembles the gateway payload. Identity pass-through: no truncation, no
/// token budgeting, no length validation.
pub fn assemble(
    context_text: String,
    reference_text: String,
    directive: &TaskDirective,
) -> InferenceRequest {
    InferenceRequest {
        context_text,
        reference_text,
        task_directive: directive.text().to_string(),
    }
}
