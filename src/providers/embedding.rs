//! Embedding provider trait

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// One text's embedding, as produced by a provider
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EmbeddingResult {
    /// Embedding vector; empty for the unembedded sentinel
    pub embedding: Vec<f32>,
    /// Model that produced the vector, or `"none"`
    pub model: String,
    /// Estimated token count of the embedded text
    pub token_count: usize,
}

impl EmbeddingResult {
    /// Sentinel for a chunk that exists but carries no vector
    pub fn none() -> Self {
        Self {
            embedding: Vec::new(),
            model: "none".to_string(),
            token_count: 0,
        }
    }
}

/// Trait for generating text embeddings
///
/// Implementations:
/// - [`crate::providers::OpenAiEmbedder`]: hosted HTTPS endpoint, one batched
///   request per call
/// - [`crate::providers::MockEmbedder`]: random vectors, no external call
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Embed a batch of texts, one result per input in the same order
    async fn embed(&self, texts: &[String]) -> Result<Vec<EmbeddingResult>>;

    /// Model name reported on produced chunks
    fn model_name(&self) -> &str;

    /// Embedding vector dimensions
    fn dimensions(&self) -> usize;
}
