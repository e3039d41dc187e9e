use std::sync::Arc;

use crate::config::Config;
use crate::documents::DocumentRenderer;
use crate::llm_client::ChatModel;
use crate::rate_limit::RateLimiter;
use crate::similarity::SimilarityScorer;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Chat model behind every generator. Production: `LlmClient`.
    pub llm: Arc<dyn ChatModel>,
    pub scorer: SimilarityScorer,
    pub renderer: DocumentRenderer,
    pub rate_limiter: Arc<RateLimiter>,
    /// Expected `X-API-KEY` value, shared with the auth middleware.
    pub api_key: Arc<str>,
    pub config: Config,
}
