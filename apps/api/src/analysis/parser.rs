//! Response Parser — extracts structured documents from free-form LLM output.
//!
//! LLMs wrap JSON in prose, markdown fences, or apologies often enough that
//! invalid output is a normal outcome here, not an exception: both parse
//! functions return `None` on failure and never error. The extraction
//! heuristic (greedy first-`{`-to-last-`}` span) is isolated behind this
//! module so it can be swapped for schema validation without touching the
//! orchestrator.

use serde_json::Value;

use crate::analysis::validator::ValidationResult;
use crate::analysis::AnalysisResult;

/// Parses generation output into an [`AnalysisResult`].
///
/// Attempt 1: the trimmed content as a whole JSON object. Attempt 2: the
/// greedy `{...}` span embedded in surrounding text. All three fields must be
/// present and non-empty.
pub fn parse_analysis_response(content: &str) -> Option<AnalysisResult> {
    let trimmed = content.trim();
    try_analysis_json(trimmed).or_else(|| try_analysis_json(embedded_object(trimmed)?))
}

/// Parses validation output into a [`ValidationResult`], using the same
/// two-attempt strategy.
///
/// Requires a non-empty `validationSummary`, the `improvedMatchScore` key
/// present (a number or null), and a boolean `passesValidation`. Scores are
/// clamped to [0, 100].
pub fn parse_validation_response(content: &str) -> Option<ValidationResult> {
    let trimmed = content.trim();
    try_validation_json(trimmed).or_else(|| try_validation_json(embedded_object(trimmed)?))
}

/// The greedy span from the first `{` to the last `}`, if any.
fn embedded_object(content: &str) -> Option<&str> {
    let start = content.find('{')?;
    let end = content.rfind('}')?;
    (end > start).then(|| &content[start..=end])
}

fn try_analysis_json(candidate: &str) -> Option<AnalysisResult> {
    let value: Value = serde_json::from_str(candidate).ok()?;
    Some(AnalysisResult {
        analysis: non_empty_string(&value, "analysis")?,
        rewritten_resume: non_empty_string(&value, "rewrittenResume")?,
        cover_letter: non_empty_string(&value, "coverLetter")?,
    })
}

fn try_validation_json(candidate: &str) -> Option<ValidationResult> {
    let value: Value = serde_json::from_str(candidate).ok()?;

    let validation_summary = non_empty_string(&value, "validationSummary")?;
    let improved_match_score = match value.get("improvedMatchScore")? {
        Value::Null => None,
        score => Some(clamp_score(score.as_f64()?)),
    };
    let passes_validation = value.get("passesValidation")?.as_bool()?;

    Some(ValidationResult {
        validation_summary,
        improved_match_score,
        passes_validation,
    })
}

fn non_empty_string(value: &Value, key: &str) -> Option<String> {
    let text = value.get(key)?.as_str()?;
    (!text.is_empty()).then(|| text.to_string())
}

fn clamp_score(raw: f64) -> u32 {
    raw.round().clamp(0.0, 100.0) as u32
}
