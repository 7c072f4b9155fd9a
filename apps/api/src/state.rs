use std::sync::Arc;

use crate::config::Config;
use crate::generation::Advisor;
use crate::matching::Embedder;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Sentence embeddings for semantic similarity. Default: LexicalEmbedder.
    /// Swap via EMBEDDING_API_URL.
    pub embedder: Arc<dyn Embedder>,
    /// Learning-path advisor. Default: TemplateAdvisor. Swap via ANTHROPIC_API_KEY.
    pub advisor: Arc<dyn Advisor>,
}
