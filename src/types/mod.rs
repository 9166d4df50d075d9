//! Shared data model: source pointers, parsed content, and run results

pub mod content;
pub mod pointer;
pub mod run;

pub use content::{ChunkResult, ContentChunk, ExtractedContent, ParseResult, ParsedSegment};
pub use pointer::{FileType, SourcePointer};
pub use run::{PipelineResult, RunStatus, StageError, StageErrorKind};
