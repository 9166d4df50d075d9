//! OpenAI-compatible embedding provider

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::EmbeddingConfig;
use crate::error::{Error, Result};
use crate::ingestion::estimate_token_count;

use super::embedding::{EmbeddingProvider, EmbeddingResult};

/// Embedding client for OpenAI-compatible `/embeddings` endpoints
///
/// Sends the whole batch in a single request. Token counts on the results are
/// recomputed locally with the crate's estimator; the provider's own token
/// accounting is not used.
pub struct OpenAiEmbedder {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    model: String,
    dimensions: usize,
}

impl OpenAiEmbedder {
    /// Build an embedder from configuration
    pub fn new(config: &EmbeddingConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_default();

        Self {
            client,
            endpoint: format!("{}/embeddings", config.base_url.trim_end_matches('/')),
            api_key: config.api_key.clone().unwrap_or_default(),
            model: config.model.clone(),
            dimensions: config.dimensions,
        }
    }
}

#[async_trait]
impl EmbeddingProvider for OpenAiEmbedder {
    async fn embed(&self, texts: &[String]) -> Result<Vec<EmbeddingResult>> {
        if self.api_key.trim().is_empty() {
            return Err(Error::embedding("API key is required for embeddings"));
        }
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let request = EmbeddingRequest {
            model: &self.model,
            input: texts,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<body unavailable>".to_string());
            return Err(Error::embedding(format!(
                "embedding request failed ({status}): {body}"
            )));
        }

        let mut parsed: EmbeddingResponse = response.json().await?;
        if parsed.data.len() != texts.len() {
            return Err(Error::embedding(format!(
                "endpoint returned {} embeddings for {} inputs",
                parsed.data.len(),
                texts.len()
            )));
        }

        // The endpoint tags each item with the index of its input; reorder by
        // that index so results line up with the request batch.
        parsed.data.sort_by_key(|item| item.index);
        let mut results = Vec::with_capacity(texts.len());
        for item in parsed.data {
            let text = texts.get(item.index).ok_or_else(|| {
                Error::embedding(format!("endpoint returned unknown index {}", item.index))
            })?;
            results.push(EmbeddingResult {
                embedding: item.embedding,
                model: self.model.clone(),
                token_count: estimate_token_count(text),
            });
        }
        Ok(results)
    }

    fn model_name(&self) -> &str {
        &self.model
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }
}

#[derive(Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: &'a [String],
}

#[derive(Debug, Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
    index: usize,
}
