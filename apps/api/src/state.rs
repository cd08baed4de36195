use std::sync::Arc;

use crate::analysis::backend::GenerationBackend;
use crate::billing::AccessStore;
use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
///
/// Both collaborators sit behind trait objects chosen once at startup: the
/// access store (Postgres in production) and the generation backend (live
/// LLM when a credential is configured, deterministic mock otherwise).
#[derive(Clone)]
pub struct AppState {
    pub access: Arc<dyn AccessStore>,
    pub backend: Arc<dyn GenerationBackend>,
    pub config: Config,
}
