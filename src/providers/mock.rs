//! Mock embedding provider

use async_trait::async_trait;
use rand::Rng;

use crate::error::Result;
use crate::ingestion::estimate_token_count;

use super::embedding::{EmbeddingProvider, EmbeddingResult};

/// Generates a random same-dimension vector per input with no external call
///
/// Used when no credential is configured or when mock mode is requested, so
/// the pipeline can be exercised without a live embedding dependency.
pub struct MockEmbedder {
    dimensions: usize,
}

impl MockEmbedder {
    pub fn new(dimensions: usize) -> Self {
        Self { dimensions }
    }
}

impl Default for MockEmbedder {
    fn default() -> Self {
        Self::new(1536)
    }
}

#[async_trait]
impl EmbeddingProvider for MockEmbedder {
    async fn embed(&self, texts: &[String]) -> Result<Vec<EmbeddingResult>> {
        let mut rng = rand::thread_rng();
        Ok(texts
            .iter()
            .map(|text| EmbeddingResult {
                embedding: (0..self.dimensions)
                    .map(|_| rng.gen_range(-1.0..1.0))
                    .collect(),
                model: self.model_name().to_string(),
                token_count: estimate_token_count(text),
            })
            .collect())
    }

    fn model_name(&self) -> &str {
        "mock-embedding"
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_result_per_input_at_declared_dimensions() {
        let embedder = MockEmbedder::default();
        let texts = vec![
            "first chunk".to_string(),
            "second chunk".to_string(),
            "third chunk".to_string(),
        ];

        let results = tokio_test::block_on(embedder.embed(&texts)).unwrap();
        assert_eq!(results.len(), 3);
        for (result, text) in results.iter().zip(&texts) {
            assert_eq!(result.embedding.len(), embedder.dimensions());
            assert_eq!(result.model, "mock-embedding");
            assert_eq!(result.token_count, estimate_token_count(text));
        }
    }

    #[test]
    fn empty_batch_yields_empty_results() {
        let embedder = MockEmbedder::new(8);
        let results = tokio_test::block_on(embedder.embed(&[])).unwrap();
        assert!(results.is_empty());
    }
}
