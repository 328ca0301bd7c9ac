//! Mock text extractor for testing.
//!
//! Returns queued results in order and records how often it was called, so
//! tests can prove an upload was rejected before extraction ran.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::ports::{ExtractedText, ExtractionFailure, TextExtractor};

/// Mock extractor with queued outcomes.
#[derive(Debug, Clone, Default)]
pub struct MockTextExtractor {
    outcomes: Arc<Mutex<VecDeque<Result<ExtractedText, ExtractionFailure>>>>,
    calls: Arc<Mutex<Vec<usize>>>,
}

impl MockTextExtractor {
    /// Creates an extractor with nothing queued (returns empty text).
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a document made of the given page texts.
    pub fn with_pages<I, S>(self, pages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let text = ExtractedText::new(pages.into_iter().map(Into::into).collect());
        self.outcomes.lock().unwrap().push_back(Ok(text));
        self
    }

    /// Queues a single-page document.
    pub fn with_text(self, text: impl Into<String>) -> Self {
        self.with_pages([text.into()])
    }

    /// Queues a parse failure.
    pub fn with_failure(self, reason: impl Into<String>) -> Self {
        self.outcomes
            .lock()
            .unwrap()
            .push_back(Err(ExtractionFailure::parse_failed(reason)));
        self
    }

    /// Number of extraction calls made.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Byte lengths of every input received, in call order.
    pub fn received_sizes(&self) -> Vec<usize> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextExtractor for MockTextExtractor {
    async fn extract(&self, bytes: &[u8]) -> Result<ExtractedText, ExtractionFailure> {
        self.calls.lock().unwrap().push(bytes.len());
        self.outcomes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(ExtractedText::default()))
    }
}
