//! Generative Backend Adapter — capability-checked strategy over the LLM.
//!
//! The backend is selected ONCE at process start from credential presence:
//! `LiveBackend` wraps the LLM client; `NullBackend` delegates to the
//! deterministic mock builder and heuristic validator. Both are infallible
//! from the orchestrator's point of view: live-call faults are logged and
//! absorbed into the mock/fallback path, never raised.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::analysis::mock::build_mock_analysis;
use crate::analysis::parser::{parse_analysis_response, parse_validation_response};
use crate::analysis::prompts::{
    ANALYSIS_PROMPT_TEMPLATE, ANALYSIS_SYSTEM, PLAIN_TEXT_REQUIREMENT, VALIDATION_PROMPT_TEMPLATE,
    VALIDATION_SYSTEM,
};
use crate::analysis::validator::{fallback_validation, ValidationResult};
use crate::analysis::AnalysisResult;
use crate::config::Config;
use crate::llm_client::LlmClient;

/// Per-attempt generation switches.
#[derive(Debug, Clone, Copy, Default)]
pub struct GenerationOptions {
    /// Set on retries: demand that the resume open with name + contact lines.
    pub enforce_plain_text: bool,
}

/// The generation/validation capability injected into the orchestrator.
///
/// Carried in `AppState` as `Arc<dyn GenerationBackend>`.
#[async_trait]
pub trait GenerationBackend: Send + Sync {
    /// Whether a live LLM sits behind this backend. Drives the retry budget:
    /// regenerating against a deterministic mock cannot change the outcome.
    fn is_live(&self) -> bool;

    /// Produces the three-document bundle. Never fails; a live backend falls
    /// back to the mock builder on any fault.
    async fn generate(
        &self,
        resume_text: &str,
        job_description: &str,
        opts: GenerationOptions,
    ) -> AnalysisResult;

    /// Judges a rewritten resume for ATS readiness. Never fails; a live
    /// backend falls back to the deterministic heuristic on any fault.
    async fn validate(
        &self,
        rewritten_resume: &str,
        job_description: &str,
        baseline_score: u32,
    ) -> ValidationResult;
}

/// Selects the backend from configuration. Absence of a credential is a
/// valid, common state, not an error.
pub fn select_backend(config: &Config) -> Arc<dyn GenerationBackend> {
    match &config.anthropic_api_key {
        Some(api_key) => {
            info!("LLM backend configured (model: {})", crate::llm_client::MODEL);
            Arc::new(LiveBackend::new(LlmClient::new(
                api_key.clone(),
                Duration::from_secs(config.llm_timeout_secs),
            )))
        }
        None => {
            warn!("ANTHROPIC_API_KEY not set; using deterministic mock backend");
            Arc::new(NullBackend)
        }
    }
}

/// Deterministic backend: mock builder + heuristic validator, no network.
pub struct NullBackend;

#[async_trait]
impl GenerationBackend for NullBackend {
    fn is_live(&self) -> bool {
        false
    }

    async fn generate(
        &self,
        resume_text: &str,
        job_description: &str,
        _opts: GenerationOptions,
    ) -> AnalysisResult {
        build_mock_analysis(resume_text, job_description)
    }

    async fn validate(
        &self,
        rewritten_resume: &str,
        job_description: &str,
        _baseline_score: u32,
    ) -> ValidationResult {
        fallback_validation(rewritten_resume, job_description)
    }
}

/// LLM-backed backend with mock/heuristic fallback on any fault.
pub struct LiveBackend {
    llm: LlmClient,
}

impl LiveBackend {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl GenerationBackend for LiveBackend {
    fn is_live(&self) -> bool {
        true
    }

    async fn generate(
        &self,
        resume_text: &str,
        job_description: &str,
        opts: GenerationOptions,
    ) -> AnalysisResult {
        let plain_text_requirement = if opts.enforce_plain_text {
            PLAIN_TEXT_REQUIREMENT
        } else {
            ""
        };
        let prompt = ANALYSIS_PROMPT_TEMPLATE
            .replace("{plain_text_requirement}", plain_text_requirement)
            .replace("{resume_text}", resume_text)
            .replace("{job_description}", job_description);

        match self.llm.complete(&prompt, ANALYSIS_SYSTEM).await {
            Ok(content) => match parse_analysis_response(&content) {
                Some(result) => result,
                None => {
                    warn!("LLM generation output was unparseable; falling back to mock analysis");
                    build_mock_analysis(resume_text, job_description)
                }
            },
            Err(e) => {
                warn!("LLM generation call failed: {e}; falling back to mock analysis");
                build_mock_analysis(resume_text, job_description)
            }
        }
    }

    async fn validate(
        &self,
        rewritten_resume: &str,
        job_description: &str,
        baseline_score: u32,
    ) -> ValidationResult {
        let prompt = VALIDATION_PROMPT_TEMPLATE
            .replace("{baseline_score}", &baseline_score.to_string())
            .replace("{rewritten_resume}", rewritten_resume)
            .replace("{job_description}", job_description);

        match self.llm.complete(&prompt, VALIDATION_SYSTEM).await {
            Ok(content) => match parse_validation_response(&content) {
                Some(result) => result,
                None => {
                    warn!("LLM validation output was unparseable; using heuristic validation");
                    fallback_validation(rewritten_resume, job_description)
                }
            },
            Err(e) => {
                warn!("LLM validation call failed: {e}; using heuristic validation");
                fallback_validation(rewritten_resume, job_description)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_key(api_key: Option<&str>) -> Config {
        Config {
            database_url: "postgres://unused".to_string(),
            anthropic_api_key: api_key.map(str::to_string),
            llm_timeout_secs: 30,
            port: 8080,
            rust_log: "info".to_string(),
        }
    }

    #[test]
    fn test_backend_selection_follows_credential_presence() {
        assert!(select_backend(&config_with_key(Some("sk-test"))).is_live());
        assert!(!select_backend(&config_with_key(None)).is_live());
    }

    #[tokio::test]
    async fn test_null_backend_always_returns_populated_bundle() {
        let result = NullBackend
            .generate("any resume", "any job description", GenerationOptions::default())
            .await;
        assert!(!result.analysis.is_empty());
        assert!(!result.rewritten_resume.is_empty());
        assert!(!result.cover_letter.is_empty());
    }

    #[tokio::test]
    async fn test_null_backend_validation_is_deterministic() {
        let first = NullBackend.validate("plain resume", "job", 50).await;
        let second = NullBackend.validate("plain resume", "job", 50).await;
        assert_eq!(first, second);
    }
}
