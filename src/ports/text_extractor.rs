//! Text Extractor Port - Turns uploaded document bytes into plain text.
//!
//! The session manager never parses documents itself. Adapters (like
//! `PdfTextExtractor`) do the format-specific work and hand back text
//! sections in reading order.

use async_trait::async_trait;
use thiserror::Error;

/// Port for extracting plain text from raw document bytes.
///
/// # Contract
///
/// Implementations must:
/// - Return sections (pages, chunks) in document order
/// - Fail with `ExtractionFailure::ParseFailed` for unreadable input, never panic
/// - Not judge whether the text is useful; empty sections are fine
#[async_trait]
pub trait TextExtractor: Send + Sync {
    /// Extract every text section from `bytes`.
    async fn extract(&self, bytes: &[u8]) -> Result<ExtractedText, ExtractionFailure>;
}

/// Text pulled out of a document, one entry per page or section.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedText {
    pub sections: Vec<String>,
}

impl ExtractedText {
    /// Creates extracted text from ordered sections.
    pub fn new(sections: Vec<String>) -> Self {
        Self { sections }
    }

    /// Creates extracted text with a single section.
    pub fn single(text: impl Into<String>) -> Self {
        Self {
            sections: vec![text.into()],
        }
    }

    /// Concatenates all sections in order, without separators.
    pub fn joined(&self) -> String {
        self.sections.concat()
    }
}

/// Why a document could not be attached.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractionFailure {
    /// The document parsed but held no text (e.g. a scanned image).
    #[error("No text could be extracted from the PDF")]
    NoTextExtracted,

    /// The bytes are not a readable document.
    #[error("Failed to read PDF: {0}")]
    ParseFailed(String),
}

impl ExtractionFailure {
    /// Creates a parse failure.
    pub fn parse_failed(reason: impl Into<String>) -> Self {
        Self::ParseFailed(reason.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joined_concatenates_in_order() {
        let text = ExtractedText::new(vec!["Hello ".into(), "World".into()]);
        assert_eq!(text.joined(), "Hello World");
    }

    #[test]
    fn joined_of_nothing_is_empty() {
        assert_eq!(ExtractedText::default().joined(), "");
    }

    #[test]
    fn failures_display_user_facing_messages() {
        assert_eq!(
            ExtractionFailure::NoTextExtracted.to_string(),
            "No text could be extracted from the PDF"
        );
        assert_eq!(
            ExtractionFailure::parse_failed("bad xref").to_string(),
            "Failed to read PDF: bad xref"
        );
    }
}
