//! Parsed content and chunk records

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::pointer::SourcePointer;

/// A pointer-tagged span of text produced by a parser
///
/// A parsed document is an ordered sequence of segments. Order reflects
/// reading order; segments are otherwise independent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ParsedSegment {
    /// Location of this span in the original file
    pub pointer: SourcePointer,
    /// Extracted text
    pub text: String,
}

/// A parser's full output for one resource
///
/// `plain_text` is a derived convenience view; the segments are the source of
/// truth for citation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParseResult {
    /// Concatenated plain text of the whole resource
    pub plain_text: String,
    /// Ordered pointer-tagged segments
    pub segments: Vec<ParsedSegment>,
    /// Free-form metadata (page count, filename, character count, ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<HashMap<String, serde_json::Value>>,
}

/// A candidate chunk before an identifier is assigned
#[derive(Debug, Clone, PartialEq)]
pub struct ChunkResult {
    /// Chunk text
    pub content: String,
    /// Pointer of the segment the chunk started in
    pub pointer_start: SourcePointer,
    /// Pointer of a later segment the chunk spans into, if any
    pub pointer_end: Option<SourcePointer>,
    /// Estimated token count of `content`
    pub token_count: usize,
}

/// Persisted record of a completed parse
///
/// One per successfully parsed resource; created once, never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractedContent {
    /// Generated record id
    pub id: Uuid,
    /// Owning resource id
    pub resource_id: Uuid,
    /// Concatenated plain text
    pub plain_text: String,
    /// Ordered pointer-tagged segments
    pub segments: Vec<ParsedSegment>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

/// Persisted record of one chunk
///
/// A chunk with `embedding_model == "none"` carries an empty vector: it still
/// exists for text search and citation, but is not semantically searchable
/// until re-embedded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentChunk {
    /// Generated record id
    pub id: Uuid,
    /// Owning resource id
    pub resource_id: Uuid,
    /// Chunk text
    pub content: String,
    /// Pointer of the segment the chunk started in
    pub pointer_start: SourcePointer,
    /// Pointer of a later segment the chunk spans into, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pointer_end: Option<SourcePointer>,
    /// Embedding vector; empty when `embedding_model` is `"none"`
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub embedding: Vec<f32>,
    /// Name of the model that produced the vector, or `"none"`
    pub embedding_model: String,
    /// Estimated token count of `content`
    pub token_count: usize,
    /// Additional metadata
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<HashMap<String, serde_json::Value>>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::pointer::FileType;

    #[test]
    fn unembedded_chunk_skips_empty_vector() {
        let chunk = ContentChunk {
            id: Uuid::nil(),
            resource_id: Uuid::nil(),
            content: "text".to_string(),
            pointer_start: SourcePointer::page(Uuid::nil(), FileType::Txt, 1),
            pointer_end: None,
            embedding: Vec::new(),
            embedding_model: "none".to_string(),
            token_count: 1,
            metadata: None,
            created_at: Utc::now(),
        };
        let json = serde_json::to_value(&chunk).unwrap();
        assert!(json.get("embedding").is_none());
        assert!(json.get("pointer_end").is_none());
        assert_eq!(json["embedding_model"], "none");
    }
}
