//! Ingestion pipeline: format-aware parsing, chunking, and orchestration

mod chunker;
mod parser;
mod pipeline;

pub use chunker::{
    estimate_token_count, ChunkingOptions, ChunkingStrategy, SentenceChunker, WindowChunker,
};
pub use parser::{FileParser, ParserRegistry, PdfParser, TextParser};
pub use pipeline::{IngestionContext, IngestionPipeline};
