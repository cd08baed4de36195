//! Analysis pipeline — turns raw resume + job description text into a match
//! analysis, an ATS-optimized rewritten resume, and a tailored cover letter.
//!
//! Flow: sanitize → access check → generate → baseline score → validate →
//!       bounded regenerate loop → debit credit → respond.

pub mod backend;
pub mod handlers;
pub mod keywords;
pub mod mock;
pub mod orchestrator;
pub mod parser;
pub mod prompts;
pub mod sanitize;
pub mod validator;

use serde::{Deserialize, Serialize};

/// The three documents produced by one generation attempt.
///
/// All three fields must be non-empty for the result to be well-formed;
/// `parser::parse_analysis_response` enforces this on LLM output, and the
/// mock builder satisfies it by construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub analysis: String,
    pub rewritten_resume: String,
    pub cover_letter: String,
}
