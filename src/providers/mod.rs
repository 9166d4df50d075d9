//! Embedding provider abstractions
//!
//! Trait-based so the pipeline can run against the hosted endpoint or a
//! deterministic-free mock, selected purely from configuration.

pub mod embedding;
pub mod mock;
pub mod openai;

use std::sync::Arc;

use crate::config::EmbeddingConfig;

pub use embedding::{EmbeddingProvider, EmbeddingResult};
pub use mock::MockEmbedder;
pub use openai::OpenAiEmbedder;

/// Choose the embedding provider for a pipeline run
///
/// Pure function of the configuration: the mock provider when mock mode is
/// requested or no credential is configured, the real provider otherwise.
pub fn select_embedder(config: &EmbeddingConfig) -> Arc<dyn EmbeddingProvider> {
    let has_key = config
        .api_key
        .as_deref()
        .is_some_and(|key| !key.trim().is_empty());

    if config.use_mock || !has_key {
        Arc::new(MockEmbedder::new(config.dimensions))
    } else {
        Arc::new(OpenAiEmbedder::new(config))
    }
}
