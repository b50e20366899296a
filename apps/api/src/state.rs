use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::remix::platforms::PlatformGuides;

/// Shared application state injected into all route handlers via Axum extractors.
/// Everything here is read-only after startup; requests share nothing mutable.
#[derive(Clone)]
pub struct AppState {
    pub llm: LlmClient,
    pub config: Arc<Config>,
    pub guides: Arc<PlatformGuides>,
}

impl AppState {
    pub fn new(config: Config, llm: LlmClient) -> Self {
        Self {
            llm,
            config: Arc::new(config),
            guides: Arc::new(PlatformGuides::builtin()),
        }
    }
}
