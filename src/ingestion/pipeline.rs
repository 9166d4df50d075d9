//! Pipeline orchestration for one resource
//!
//! Drives parse -> chunk -> embed in strict order with no retries. The
//! orchestrator performs no persistence and no network calls of its own; the
//! parser and the embedder it is given are the only suspension points, which
//! makes it independently testable with fakes for both.

use std::sync::Arc;

use uuid::Uuid;

use crate::config::IngestConfig;
use crate::providers::{select_embedder, EmbeddingProvider, EmbeddingResult};
use crate::stamp::{RecordStamper, SystemStamper};
use crate::types::{
    ContentChunk, ExtractedContent, FileType, PipelineResult, RunStatus, StageError,
};

use super::chunker::{strategy_for, ChunkingOptions, ChunkingStrategy};
use super::parser::ParserRegistry;

/// Identifiers and file facts supplied by the calling workflow
#[derive(Debug, Clone)]
pub struct IngestionContext {
    pub resource_id: Uuid,
    pub course_id: Uuid,
    pub user_id: Uuid,
    pub file_type: FileType,
    pub filename: String,
}

/// Orchestrates one resource's ingestion run
pub struct IngestionPipeline {
    registry: ParserRegistry,
    chunker: Box<dyn ChunkingStrategy>,
    options: ChunkingOptions,
    embedder: Arc<dyn EmbeddingProvider>,
    stamper: Arc<dyn RecordStamper>,
}

impl IngestionPipeline {
    /// Wire a pipeline from configuration: default parser registry, strategy
    /// selected by the chunking options, embedder selected by credential and
    /// mock-mode settings
    pub fn new(config: &IngestConfig) -> Self {
        let options = ChunkingOptions::from(&config.chunking);
        Self {
            registry: ParserRegistry::default(),
            chunker: strategy_for(&options),
            options,
            embedder: select_embedder(&config.embeddings),
            stamper: Arc::new(SystemStamper),
        }
    }

    /// Assemble a pipeline from explicit parts, for callers that substitute
    /// fakes or custom parsers
    pub fn with_components(
        registry: ParserRegistry,
        chunker: Box<dyn ChunkingStrategy>,
        options: ChunkingOptions,
        embedder: Arc<dyn EmbeddingProvider>,
        stamper: Arc<dyn RecordStamper>,
    ) -> Self {
        Self {
            registry,
            chunker,
            options,
            embedder,
            stamper,
        }
    }

    /// Run the full pipeline for one resource
    ///
    /// Never returns a bare error: every outcome, including terminal
    /// failures, arrives as a typed [`PipelineResult`].
    pub async fn run(&self, data: &[u8], context: &IngestionContext) -> PipelineResult {
        let resource_id = context.resource_id;
        tracing::info!(
            %resource_id,
            file_type = %context.file_type,
            filename = %context.filename,
            bytes = data.len(),
            "starting ingestion run"
        );

        let Some(parser) = self.registry.get(context.file_type) else {
            tracing::warn!(file_type = %context.file_type, "no parser registered");
            return self.failed(resource_id, StageError::no_parser(context.file_type));
        };

        let parsed = match parser
            .parse(data, &context.filename, resource_id)
            .await
        {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!(%resource_id, error = %e, "parsing failed");
                return self.failed(resource_id, StageError::parse_failure(&e));
            }
        };

        let extracted_content = ExtractedContent {
            id: self.stamper.new_id(),
            resource_id,
            plain_text: parsed.plain_text.clone(),
            segments: parsed.segments.clone(),
            created_at: self.stamper.now(),
        };

        let chunk_results = self.chunker.chunk(&parsed, &self.options);
        if chunk_results.is_empty() {
            tracing::warn!(%resource_id, "parse produced no chunkable content");
            return PipelineResult {
                resource_id,
                extracted_content,
                chunks: Vec::new(),
                status: RunStatus::Partial,
                errors: vec![StageError::empty_chunks()],
            };
        }
        tracing::info!(%resource_id, chunks = chunk_results.len(), "chunking complete");

        let mut errors = Vec::new();
        let texts: Vec<String> = chunk_results.iter().map(|c| c.content.clone()).collect();
        let embeddings = match self.embedder.embed(&texts).await {
            Ok(results) => results,
            Err(e) => {
                // The run still completes: chunks are persisted unembedded
                // and can be re-embedded later.
                tracing::warn!(%resource_id, error = %e, "embedding failed, keeping chunks unembedded");
                errors.push(StageError::embed_failure(&e));
                chunk_results.iter().map(|_| EmbeddingResult::none()).collect()
            }
        };

        let chunks: Vec<ContentChunk> = chunk_results
            .into_iter()
            .enumerate()
            .map(|(i, chunk)| {
                let embedding = embeddings.get(i).cloned().unwrap_or_else(EmbeddingResult::none);
                ContentChunk {
                    id: self.stamper.new_id(),
                    resource_id,
                    content: chunk.content,
                    pointer_start: chunk.pointer_start,
                    pointer_end: chunk.pointer_end,
                    embedding: embedding.embedding,
                    embedding_model: embedding.model,
                    token_count: chunk.token_count,
                    metadata: None,
                    created_at: self.stamper.now(),
                }
            })
            .collect();

        let status = if errors.is_empty() {
            RunStatus::Success
        } else {
            RunStatus::Partial
        };
        tracing::info!(%resource_id, ?status, chunks = chunks.len(), "ingestion run complete");

        PipelineResult {
            resource_id,
            extracted_content,
            chunks,
            status,
            errors,
        }
    }

    /// Terminal failure before any content was extracted: callers still get
    /// the uniform result shape, with an empty parse record
    fn failed(&self, resource_id: Uuid, error: StageError) -> PipelineResult {
        PipelineResult {
            resource_id,
            extracted_content: ExtractedContent {
                id: self.stamper.new_id(),
                resource_id,
                plain_text: String::new(),
                segments: Vec::new(),
                created_at: self.stamper.now(),
            },
            chunks: Vec::new(),
            status: RunStatus::Failed,
            errors: vec![error],
        }
    }
}
