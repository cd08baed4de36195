//! Validation Engine — judges a rewritten resume for ATS readiness.
//!
//! Entry point is [`validate`], which short-circuits empty resumes and
//! otherwise delegates to the configured backend. The deterministic
//! heuristic ([`fallback_validation`]) backs the null backend and every
//! live-backend fault path.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::analysis::backend::GenerationBackend;
use crate::analysis::keywords::score_and_gaps;

/// Any character outside tab/CR/LF and printable ASCII.
static NON_ASCII_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\t\r\n\x20-\x7E]").unwrap());

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}").unwrap());

/// Phone-number-like: optional area code parens, separators, 10 digits.
static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\(?\d{3}\)?[\s.-]?\d{3}[\s.-]?\d{4}").unwrap());

/// The verdict for one rewritten resume.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationResult {
    pub validation_summary: String,
    /// 0–100 when present.
    pub improved_match_score: Option<u32>,
    pub passes_validation: bool,
}

/// Validates a rewritten resume against the job description.
///
/// An empty/whitespace-only resume fails immediately with the baseline score
/// passed through, without touching the backend.
pub async fn validate(
    backend: &dyn GenerationBackend,
    rewritten_resume: &str,
    job_description: &str,
    baseline_score: u32,
) -> ValidationResult {
    if rewritten_resume.trim().is_empty() {
        return ValidationResult {
            validation_summary: "The rewritten resume came back empty; nothing to validate."
                .to_string(),
            improved_match_score: Some(baseline_score),
            passes_validation: false,
        };
    }

    backend
        .validate(rewritten_resume, job_description, baseline_score)
        .await
}

/// Deterministic ATS heuristic: plain ASCII, no leftover name placeholder,
/// detectable contact details. The improved score comes from the lexical
/// estimator.
pub fn fallback_validation(rewritten_resume: &str, job_description: &str) -> ValidationResult {
    let mut issues: Vec<&str> = Vec::new();

    if NON_ASCII_RE.is_match(rewritten_resume) {
        issues.push(
            "The resume contains non-ASCII or decorative characters that ATS parsers may drop.",
        );
    }
    if rewritten_resume.to_lowercase().contains("name here") {
        issues.push("The resume still contains placeholder text instead of a real name.");
    }
    if !EMAIL_RE.is_match(rewritten_resume) || !PHONE_RE.is_match(rewritten_resume) {
        issues.push(
            "The resume is missing detectable contact details (an email address and a phone number).",
        );
    }

    let improved_match_score = score_and_gaps(rewritten_resume, job_description).score;
    let passes_validation = issues.is_empty();
    let validation_summary = if passes_validation {
        "Resume passed ATS checks: plain ASCII text with detectable contact details.".to_string()
    } else {
        issues.join(" ")
    };

    ValidationResult {
        validation_summary,
        improved_match_score: Some(improved_match_score),
        passes_validation,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    use crate::analysis::backend::GenerationOptions;
    use crate::analysis::AnalysisResult;

    const CLEAN_RESUME: &str = "Jane Smith\njane@example.com | (555) 321-9876\n\nSkills: React";

    /// Backend that panics if touched; proves the empty-guard short-circuit.
    struct UnreachableBackend;

    #[async_trait]
    impl GenerationBackend for UnreachableBackend {
        fn is_live(&self) -> bool {
            true
        }

        async fn generate(
            &self,
            _resume_text: &str,
            _job_description: &str,
            _opts: GenerationOptions,
        ) -> AnalysisResult {
            unreachable!("generate must not be called during validation")
        }

        async fn validate(
            &self,
            _rewritten_resume: &str,
            _job_description: &str,
            _baseline_score: u32,
        ) -> ValidationResult {
            unreachable!("empty resumes must not reach the backend")
        }
    }

    #[tokio::test]
    async fn test_empty_resume_fails_without_backend_call() {
        let result = validate(&UnreachableBackend, "   ", "job description", 50).await;
        assert!(!result.passes_validation);
        assert_eq!(result.improved_match_score, Some(50));
        assert!(result.validation_summary.contains("empty"));
    }

    #[test]
    fn test_clean_resume_passes_heuristics() {
        let result = fallback_validation(CLEAN_RESUME, "React developer wanted");
        assert!(result.passes_validation, "{}", result.validation_summary);
        assert!(result.validation_summary.contains("passed"));
    }

    #[test]
    fn test_non_ascii_resume_fails_with_character_issue() {
        let resume = "Jane Smith\njane@example.com | (555) 321-9876\n\nWorked at a caf\u{e9}";
        let result = fallback_validation(resume, "job");
        assert!(!result.passes_validation);
        assert!(result.validation_summary.contains("non-ASCII"));
    }

    #[test]
    fn test_name_placeholder_fails_case_insensitively() {
        let resume = "Name Here\njane@example.com | (555) 321-9876";
        let result = fallback_validation(resume, "job");
        assert!(!result.passes_validation);
        assert!(result.validation_summary.contains("placeholder"));
    }

    #[test]
    fn test_missing_email_fails_contact_check() {
        let resume = "Jane Smith\n(555) 321-9876\nSkills: React";
        let result = fallback_validation(resume, "job");
        assert!(!result.passes_validation);
        assert!(result.validation_summary.contains("contact details"));
    }

    #[test]
    fn test_missing_phone_fails_contact_check() {
        let resume = "Jane Smith\njane@example.com\nSkills: React";
        assert!(!fallback_validation(resume, "job").passes_validation);
    }

    #[test]
    fn test_improved_score_comes_from_estimator() {
        let result = fallback_validation(CLEAN_RESUME, "Looking for React experience");
        // keywords: looking, react, experience; resume matches "react" only
        assert_eq!(result.improved_match_score, Some(33));
    }

    #[test]
    fn test_multiple_issues_are_concatenated() {
        let result = fallback_validation("caf\u{e9} NAME HERE", "job");
        assert!(result.validation_summary.contains("non-ASCII"));
        assert!(result.validation_summary.contains("placeholder"));
        assert!(result.validation_summary.contains("contact details"));
    }
}
