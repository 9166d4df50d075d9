//! Pipeline run outcomes

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::content::{ContentChunk, ExtractedContent};
use super::pointer::FileType;
use crate::error::Error;

/// Overall status of one pipeline run
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RunStatus {
    /// Every stage reached completed without recording an error
    Success,
    /// Errors were recorded but extracted content (and possibly chunks) survive
    Partial,
    /// Parser selection or parsing failed; nothing usable was produced
    Failed,
}

/// Classification of a recorded stage error
///
/// Callers branch on the kind; the message alongside it is diagnostics only.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StageErrorKind {
    /// No parser registered for the resource's file type
    NoParser,
    /// Source bytes were malformed or unreadable
    ParseFailure,
    /// Parsing succeeded but produced no chunkable content
    EmptyChunks,
    /// The embedding dependency was unavailable or rejected the request
    EmbedFailure,
}

/// One recorded stage error: a branchable kind plus a human-readable message
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StageError {
    pub kind: StageErrorKind,
    pub message: String,
}

impl StageError {
    pub fn no_parser(file_type: FileType) -> Self {
        Self {
            kind: StageErrorKind::NoParser,
            message: format!("No parser available for file type: {file_type}"),
        }
    }

    pub fn parse_failure(cause: &Error) -> Self {
        Self {
            kind: StageErrorKind::ParseFailure,
            message: format!("Parsing failed: {cause}"),
        }
    }

    pub fn empty_chunks() -> Self {
        Self {
            kind: StageErrorKind::EmptyChunks,
            message: "No chunks generated from content".to_string(),
        }
    }

    pub fn embed_failure(cause: &Error) -> Self {
        Self {
            kind: StageErrorKind::EmbedFailure,
            message: format!("Embedding failed: {cause}"),
        }
    }
}

/// Fully-typed result of one pipeline run
///
/// Every terminal outcome is a value of this type; no error crosses the
/// pipeline boundary as a bare exception.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineResult {
    /// Resource the run ingested
    pub resource_id: Uuid,
    /// Parse record (empty text/segments when parsing never succeeded)
    pub extracted_content: ExtractedContent,
    /// Assembled chunks, possibly unembedded
    pub chunks: Vec<ContentChunk>,
    /// Overall run status
    pub status: RunStatus,
    /// Errors recorded along the way, in stage order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<StageError>,
}

impl PipelineResult {
    /// Human-readable error strings, for diagnostics and persistence
    pub fn error_messages(&self) -> Vec<String> {
        self.errors.iter().map(|e| e.message.clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_parser_message_names_the_file_type() {
        let err = StageError::no_parser(FileType::Pptx);
        assert_eq!(err.kind, StageErrorKind::NoParser);
        assert_eq!(err.message, "No parser available for file type: pptx");
    }

    #[test]
    fn run_status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&RunStatus::Partial).unwrap(),
            "\"partial\""
        );
    }
}
