//! Format-specific file parsers and the registry that selects them

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::types::{FileType, ParseResult, ParsedSegment, SourcePointer};

/// Capability implemented by every format parser
///
/// A parser turns raw bytes into plain text plus an ordered sequence of
/// pointer-tagged segments. Parsing is async because implementations may
/// suspend on I/O or external library calls.
#[async_trait]
pub trait FileParser: Send + Sync {
    /// File types this parser handles
    fn file_types(&self) -> &[FileType];

    /// Parse raw bytes into a [`ParseResult`]
    async fn parse(&self, data: &[u8], filename: &str, resource_id: Uuid) -> Result<ParseResult>;
}

/// Maps a file type to a registered parser
///
/// `pptx`, `docx`, `video`, and `audio` are valid file types with no parser
/// registered here; [`ParserRegistry::get`] returning `None` for them is a
/// normal, expected outcome.
pub struct ParserRegistry {
    parsers: Vec<Arc<dyn FileParser>>,
}

impl ParserRegistry {
    /// Create an empty registry
    pub fn empty() -> Self {
        Self {
            parsers: Vec::new(),
        }
    }

    /// Register an additional parser
    pub fn register(&mut self, parser: Arc<dyn FileParser>) {
        self.parsers.push(parser);
    }

    /// Find a parser for the given file type
    pub fn get(&self, file_type: FileType) -> Option<Arc<dyn FileParser>> {
        self.parsers
            .iter()
            .find(|p| p.file_types().contains(&file_type))
            .cloned()
    }
}

impl Default for ParserRegistry {
    fn default() -> Self {
        Self {
            parsers: vec![Arc::new(PdfParser), Arc::new(TextParser)],
        }
    }
}

/// Parser for plain text and markdown files
///
/// Produces exactly one segment covering the whole file, with the pointer's
/// page number fixed at 1.
pub struct TextParser;

const TEXT_TYPES: [FileType; 2] = [FileType::Txt, FileType::Markdown];

#[async_trait]
impl FileParser for TextParser {
    fn file_types(&self) -> &[FileType] {
        &TEXT_TYPES
    }

    async fn parse(&self, data: &[u8], filename: &str, resource_id: Uuid) -> Result<ParseResult> {
        let text = std::str::from_utf8(data)
            .map_err(|e| Error::file_parse(filename, format!("invalid UTF-8: {e}")))?
            .to_string();

        let file_type = if filename.ends_with(".md") {
            FileType::Markdown
        } else {
            FileType::Txt
        };
        let pointer = SourcePointer::page(resource_id, file_type, 1);

        let mut metadata = HashMap::new();
        metadata.insert("filename".to_string(), serde_json::json!(filename));
        metadata.insert(
            "charCount".to_string(),
            serde_json::json!(text.chars().count()),
        );

        Ok(ParseResult {
            plain_text: text.clone(),
            segments: vec![ParsedSegment { pointer, text }],
            metadata: Some(metadata),
        })
    }
}

/// Parser for PDF documents
///
/// Emits one segment per page that yields extractable text; pages with none
/// are skipped so no empty segments appear.
pub struct PdfParser;

const PDF_TYPES: [FileType; 1] = [FileType::Pdf];

#[async_trait]
impl FileParser for PdfParser {
    fn file_types(&self) -> &[FileType] {
        &PDF_TYPES
    }

    async fn parse(&self, data: &[u8], filename: &str, resource_id: Uuid) -> Result<ParseResult> {
        let doc = lopdf::Document::load_mem(data)
            .map_err(|e| Error::file_parse(filename, e.to_string()))?;

        let pages = doc.get_pages();
        let page_count = pages.len();
        let mut segments = Vec::new();
        let mut page_texts = Vec::new();

        for page_number in pages.keys() {
            let text = match doc.extract_text(&[*page_number]) {
                Ok(text) => text,
                Err(e) => {
                    tracing::debug!(page = page_number, error = %e, "no extractable text on page");
                    continue;
                }
            };
            let text = text.trim();
            if text.is_empty() {
                continue;
            }

            segments.push(ParsedSegment {
                pointer: SourcePointer::page(resource_id, FileType::Pdf, *page_number),
                text: text.to_string(),
            });
            page_texts.push(text.to_string());
        }

        let mut metadata = HashMap::new();
        metadata.insert("filename".to_string(), serde_json::json!(filename));
        metadata.insert("pageCount".to_string(), serde_json::json!(page_count));

        Ok(ParseResult {
            plain_text: page_texts.join("\n\n"),
            segments,
            metadata: Some(metadata),
        })
    }
}
