//! Analysis Orchestrator — the top-level control loop.
//!
//! States: Init → Generated → Validating → (Pass | Retry | Fail), run as an
//! explicit bounded loop over two snapshots (current AnalysisResult, current
//! ValidationResult) rather than recursion, so the terminal conditions stay
//! testable in isolation.
//!
//! A 200 is only ever emitted for a validated resume; the credit debit
//! happens strictly after validation passes and never on an error path.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use tracing::{info, warn};

use crate::analysis::backend::{GenerationBackend, GenerationOptions};
use crate::analysis::keywords::score_and_gaps;
use crate::analysis::sanitize::sanitize_text;
use crate::analysis::validator;
use crate::billing::{has_active_membership, AccessStore};
use crate::errors::AppError;

/// Hard ceiling on generation attempts when a live backend is configured.
/// Without one, regeneration cannot change the outcome, so the single mock
/// pass stands or the request fails.
const MAX_GENERATION_ATTEMPTS: u32 = 3;

/// Score the generation step embeds in its own analysis text.
static BASELINE_SCORE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Match Score:\s*(\d{1,3})").unwrap());

/// Success payload for `POST /api/analyze`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeResponse {
    pub analysis: String,
    pub rewritten_resume: String,
    pub cover_letter: String,
    pub validation_summary: String,
    pub improved_match_score: Option<u32>,
    pub baseline_match_score: u32,
    pub credits_remaining: i64,
}

/// Runs the full pipeline for one authenticated caller.
///
/// Steps:
/// 1. Sanitize both inputs; reject empty input before any generation.
/// 2. Resolve access; no membership and no credits → payment required.
/// 3. Generate, extract the baseline score, validate.
/// 4. Regenerate with plain-text enforcement while validation fails, up to
///    the attempt ceiling.
/// 5. Terminal failure if still unvalidated; otherwise debit one credit
///    (members exempt) and return the bundle.
pub async fn run_analysis(
    access: &dyn AccessStore,
    backend: &dyn GenerationBackend,
    email: &str,
    resume_text: &str,
    job_description: &str,
) -> Result<AnalyzeResponse, AppError> {
    let resume_text = sanitize_text(resume_text);
    let job_description = sanitize_text(job_description);
    if resume_text.is_empty() || job_description.is_empty() {
        return Err(AppError::Validation(
            "Both resumeText and jobDescription are required.".to_string(),
        ));
    }

    let access_info = access.get_user_access(email).await?;
    let is_member = has_active_membership(access_info.as_ref());
    let credits = access_info.map(|info| info.credits).unwrap_or(0);
    if !is_member && credits <= 0 {
        return Err(AppError::PaymentRequired);
    }

    let max_attempts = if backend.is_live() {
        MAX_GENERATION_ATTEMPTS
    } else {
        1
    };
    let mut attempts = 1u32;

    let mut result = backend
        .generate(
            &resume_text,
            &job_description,
            GenerationOptions {
                enforce_plain_text: false,
            },
        )
        .await;

    let baseline_match_score = extract_baseline_score(&result.analysis)
        .unwrap_or_else(|| score_and_gaps(&resume_text, &job_description).score);

    let mut validation = validator::validate(
        backend,
        &result.rewritten_resume,
        &job_description,
        baseline_match_score,
    )
    .await;

    while !validation.passes_validation && attempts < max_attempts {
        attempts += 1;
        info!(
            "Validation failed for {email}; regeneration attempt {attempts}/{max_attempts} \
             with plain-text enforcement"
        );
        result = backend
            .generate(
                &resume_text,
                &job_description,
                GenerationOptions {
                    enforce_plain_text: true,
                },
            )
            .await;
        validation = validator::validate(
            backend,
            &result.rewritten_resume,
            &job_description,
            baseline_match_score,
        )
        .await;
    }

    if !validation.passes_validation {
        warn!("Validation exhausted after {attempts} generation attempts for {email}");
        return Err(AppError::ValidationExhausted);
    }

    let credits_remaining = if is_member {
        credits
    } else {
        access.decrement_credit(email).await?;
        credits - 1
    };

    info!(
        "Analysis complete for {email}: baseline={baseline_match_score}, improved={:?}, attempts={attempts}",
        validation.improved_match_score
    );

    Ok(AnalyzeResponse {
        analysis: result.analysis,
        rewritten_resume: result.rewritten_resume,
        cover_letter: result.cover_letter,
        validation_summary: validation.validation_summary,
        improved_match_score: validation.improved_match_score,
        baseline_match_score,
        credits_remaining,
    })
}

/// Pulls "Match Score: NN" out of the analysis text, clamped to [0, 100].
fn extract_baseline_score(analysis: &str) -> Option<u32> {
    BASELINE_SCORE_RE
        .captures(analysis)
        .and_then(|caps| caps[1].parse::<u32>().ok())
        .map(|score| score.min(100))
}
