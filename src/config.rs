//! Configuration for the ingestion core
//!
//! All runtime knobs live in one serde struct threaded into the pipeline at
//! construction time. Credentials arrive here from the surrounding system
//! (environment, secret store, config file). Nothing in this crate reads
//! process-wide state on its own, so provider selection stays a pure function
//! of the struct.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Main ingestion configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IngestConfig {
    /// Chunking configuration
    #[serde(default)]
    pub chunking: ChunkingConfig,
    /// Embedding configuration
    #[serde(default)]
    pub embeddings: EmbeddingConfig,
}

impl IngestConfig {
    /// Parse a configuration from a TOML string
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        Ok(toml::from_str(raw)?)
    }

    /// Load a configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_toml_str(&raw)
    }
}

/// Text chunking configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkingConfig {
    /// Hard upper bound on estimated tokens per chunk
    #[serde(default = "default_max_tokens")]
    pub max_tokens: usize,
    /// Desired token overlap carried into the next chunk
    #[serde(default = "default_overlap_tokens")]
    pub overlap_tokens: usize,
    /// Respect sentence boundaries (false selects the character-window strategy)
    #[serde(default = "default_preserve_sentences")]
    pub preserve_sentences: bool,
}

fn default_max_tokens() -> usize {
    512
}
fn default_overlap_tokens() -> usize {
    50
}
fn default_preserve_sentences() -> bool {
    true
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            max_tokens: 512,
            overlap_tokens: 50,
            preserve_sentences: true,
        }
    }
}

/// Embedding provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingConfig {
    /// API key for the embedding endpoint; the mock provider is used when absent
    #[serde(default)]
    pub api_key: Option<String>,
    /// Force the mock provider even when a key is configured
    #[serde(default)]
    pub use_mock: bool,
    /// Embedding model name
    #[serde(default = "default_model")]
    pub model: String,
    /// Embedding vector dimensions
    #[serde(default = "default_dimensions")]
    pub dimensions: usize,
    /// Base URL of the embedding endpoint
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_model() -> String {
    "text-embedding-3-small".to_string()
}
fn default_dimensions() -> usize {
    1536
}
fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}
fn default_timeout_secs() -> u64 {
    60
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            use_mock: false,
            model: default_model(),
            dimensions: default_dimensions(),
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}
