//! learnstar-ingest: resource ingestion core for lesson generation
//!
//! Converts uploaded course materials (PDF, text, markdown, and other file
//! types as parsers are added) into retrievable, citation-traceable knowledge
//! units: every extracted segment and every chunk carries a [`SourcePointer`]
//! back to an exact page, slide, time range, or character offset in the
//! original file.
//!
//! The crate is organised around one orchestrator, [`IngestionPipeline`],
//! which drives parse -> chunk -> embed for a single resource and reports a
//! fully-typed [`PipelineResult`] with explicit partial-failure semantics.
//! Persistence, upload handling, and lesson generation live outside this
//! crate and consume the records produced here.

pub mod config;
pub mod error;
pub mod ingestion;
pub mod providers;
pub mod stamp;
pub mod types;

pub use config::{ChunkingConfig, EmbeddingConfig, IngestConfig};
pub use error::{Error, Result};
pub use ingestion::{
    ChunkingOptions, ChunkingStrategy, FileParser, IngestionContext, IngestionPipeline,
    ParserRegistry, PdfParser, SentenceChunker, TextParser, WindowChunker,
};
pub use providers::{
    select_embedder, EmbeddingProvider, EmbeddingResult, MockEmbedder, OpenAiEmbedder,
};
pub use stamp::{RecordStamper, SystemStamper};
pub use types::{
    ChunkResult, ContentChunk, ExtractedContent, FileType, ParseResult, ParsedSegment,
    PipelineResult, RunStatus, SourcePointer, StageError, StageErrorKind,
};
