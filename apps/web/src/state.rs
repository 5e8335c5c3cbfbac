use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::CompletionModel;
use crate::session::SessionStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Gemini in production; tests swap in a scripted model.
    pub model: Arc<dyn CompletionModel>,
    pub sessions: SessionStore,
    pub config: Config,
}
