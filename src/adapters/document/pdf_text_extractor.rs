//! PDF Text Extractor - Implementation of TextExtractor over `pdf-extract`.
//!
//! Parsing is CPU-bound and synchronous, so it runs on tokio's blocking pool.
//! The parser can panic on some malformed files; a panicked task surfaces as
//! `ExtractionFailure::ParseFailed` instead of taking the request down.

use async_trait::async_trait;

use crate::ports::{ExtractedText, ExtractionFailure, TextExtractor};

/// Extracts text from PDF bytes.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfTextExtractor;

impl PdfTextExtractor {
    pub fn new() -> Self {
        Self
    }

    fn extract_blocking(bytes: &[u8]) -> Result<ExtractedText, ExtractionFailure> {
        pdf_extract::extract_text_from_mem(bytes)
            .map(ExtractedText::single)
            .map_err(|e| ExtractionFailure::parse_failed(e.to_string()))
    }
}

#[async_trait]
impl TextExtractor for PdfTextExtractor {
    async fn extract(&self, bytes: &[u8]) -> Result<ExtractedText, ExtractionFailure> {
        let owned = bytes.to_vec();

        let result = tokio::task::spawn_blocking(move || Self::extract_blocking(&owned))
            .await
            .map_err(|e| {
                tracing::warn!("PDF extraction task failed: {}", e);
                ExtractionFailure::parse_failed("document could not be parsed")
            })?;

        match &result {
            Ok(text) => tracing::debug!(sections = text.sections.len(), "Extracted PDF text"),
            Err(e) => tracing::warn!("PDF extraction failed: {}", e),
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn garbage_bytes_fail_to_parse() {
        let extractor = PdfTextExtractor::new();

        let result = extractor.extract(b"this is not a pdf").await;

        assert!(matches!(result, Err(ExtractionFailure::ParseFailed(_))));
    }

    #[tokio::test]
    async fn empty_input_fails_to_parse() {
        let extractor = PdfTextExtractor::new();
        assert!(extractor.extract(&[]).await.is_err());
    }
}
