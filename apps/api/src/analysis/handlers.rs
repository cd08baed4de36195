//! Axum route handler for the analysis API.

use axum::{extract::State, Json};
use serde::Deserialize;

use crate::analysis::orchestrator::{run_analysis, AnalyzeResponse};
use crate::auth::CurrentUser;
use crate::errors::AppError;
use crate::state::AppState;

/// Request body for `POST /api/analyze`.
///
/// Missing fields default to empty strings so they surface as a 400 from
/// input sanitization rather than a body-deserialization rejection.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub resume_text: String,
    #[serde(default)]
    pub job_description: String,
}

/// POST /api/analyze
///
/// Full pipeline: sanitize → access check → generate → validate → bounded
/// regenerate loop → debit credit → respond.
pub async fn handle_analyze(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let response = run_analysis(
        state.access.as_ref(),
        state.backend.as_ref(),
        &user.email,
        &request.resume_text,
        &request.job_description,
    )
    .await?;

    Ok(Json(response))
}
