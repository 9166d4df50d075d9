//! File types and source pointers for citation traceability

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// File types accepted by the ingestion core
///
/// Every member is a valid upload; only a subset currently has a registered
/// parser. The rest resolve to a "no parser available" outcome.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    /// PDF document
    Pdf,
    /// PowerPoint presentation (.pptx)
    Pptx,
    /// Word document (.docx)
    Docx,
    /// Video recording
    Video,
    /// Audio recording
    Audio,
    /// Plain text file
    Txt,
    /// Markdown file
    #[serde(rename = "md")]
    Markdown,
}

impl FileType {
    /// Detect file type from extension
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "pdf" => Some(Self::Pdf),
            "pptx" => Some(Self::Pptx),
            "docx" => Some(Self::Docx),
            "mp4" | "mov" | "webm" | "mkv" => Some(Self::Video),
            "mp3" | "wav" | "m4a" | "ogg" => Some(Self::Audio),
            "txt" | "text" => Some(Self::Txt),
            "md" | "markdown" => Some(Self::Markdown),
            _ => None,
        }
    }

    /// Lowercase tag used in serialized records and error messages
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Pptx => "pptx",
            Self::Docx => "docx",
            Self::Video => "video",
            Self::Audio => "audio",
            Self::Txt => "txt",
            Self::Markdown => "md",
        }
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Addressable location inside one resource's original file
///
/// Only the fields relevant to the file type are populated; the rest stay
/// absent, never zero-filled. Pointers are immutable once created: any chunk,
/// and therefore any lesson block built from it, cites back through the
/// pointer to an exact page, slide, time range, or character offset.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SourcePointer {
    /// Owning resource id
    pub resource_id: Uuid,
    /// File type of the original resource
    pub file_type: FileType,
    /// Page number (1-indexed, documents)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_number: Option<u32>,
    /// Slide number (1-indexed, presentations)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slide_number: Option<u32>,
    /// Start of the cited time range in seconds (audio/video)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_start_sec: Option<f64>,
    /// End of the cited time range in seconds (audio/video)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_end_sec: Option<f64>,
    /// Start character offset within the extracted text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_start_offset: Option<usize>,
    /// End character offset within the extracted text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_end_offset: Option<usize>,
}

impl SourcePointer {
    fn bare(resource_id: Uuid, file_type: FileType) -> Self {
        Self {
            resource_id,
            file_type,
            page_number: None,
            slide_number: None,
            time_start_sec: None,
            time_end_sec: None,
            text_start_offset: None,
            text_end_offset: None,
        }
    }

    /// Pointer to a page of a document
    pub fn page(resource_id: Uuid, file_type: FileType, page_number: u32) -> Self {
        Self {
            page_number: Some(page_number),
            ..Self::bare(resource_id, file_type)
        }
    }

    /// Pointer to a slide of a presentation
    pub fn slide(resource_id: Uuid, file_type: FileType, slide_number: u32) -> Self {
        Self {
            slide_number: Some(slide_number),
            ..Self::bare(resource_id, file_type)
        }
    }

    /// Pointer to a time range of an audio or video recording
    pub fn time_range(resource_id: Uuid, file_type: FileType, start_sec: f64, end_sec: f64) -> Self {
        Self {
            time_start_sec: Some(start_sec),
            time_end_sec: Some(end_sec),
            ..Self::bare(resource_id, file_type)
        }
    }

    /// Pointer to a character range of extracted text
    pub fn char_range(resource_id: Uuid, file_type: FileType, start: usize, end: usize) -> Self {
        Self {
            text_start_offset: Some(start),
            text_end_offset: Some(end),
            ..Self::bare(resource_id, file_type)
        }
    }
}
