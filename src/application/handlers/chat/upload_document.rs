//! Document upload and attachment.
//!
//! Uploads are checked against the upload policy first; only then are the
//! bytes handed to the text extractor. The session is touched only once a
//! non-empty text is in hand, so every failure leaves it exactly as it was.

use tracing::info;

use crate::domain::chat::{AttachedDocument, DEFAULT_FILENAME};
use crate::ports::ExtractionFailure;

use super::errors::ChatError;
use super::session_manager::SessionManager;

/// Command to upload a document.
#[derive(Debug, Clone)]
pub struct UploadDocumentCommand {
    /// Client-supplied filename; blank or missing falls back to `unnamed.pdf`.
    pub filename: Option<String>,
    /// Raw file content.
    pub bytes: Vec<u8>,
}

impl UploadDocumentCommand {
    pub fn new(filename: Option<String>, bytes: Vec<u8>) -> Self {
        Self { filename, bytes }
    }

    fn resolved_filename(&self) -> String {
        self.filename
            .as_deref()
            .filter(|name| !name.is_empty())
            .unwrap_or(DEFAULT_FILENAME)
            .to_string()
    }
}

/// What was attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachOutcome {
    pub filename: String,
    /// Characters of extracted text kept (after trimming).
    pub text_length: usize,
}

impl SessionManager {
    /// Validates an upload, then attaches it.
    ///
    /// # Errors
    ///
    /// - `UploadRejected` for a non-PDF name or an oversized file; the
    ///   extractor is never invoked
    /// - anything `attach_document` returns
    pub async fn upload_document(
        &self,
        cmd: UploadDocumentCommand,
    ) -> Result<AttachOutcome, ChatError> {
        let filename = cmd.resolved_filename();
        self.upload_policy.check(&filename, cmd.bytes.len())?;

        self.attach_document(filename, &cmd.bytes).await
    }

    /// Extracts text from `bytes` and makes it the session's document.
    ///
    /// On success the conversation starts over: history is cleared and the
    /// previous document, if any, is replaced.
    ///
    /// # Errors
    ///
    /// - `Extraction(ParseFailed)` if the bytes cannot be read
    /// - `Extraction(NoTextExtracted)` if only whitespace came out
    pub async fn attach_document(
        &self,
        filename: impl Into<String>,
        bytes: &[u8],
    ) -> Result<AttachOutcome, ChatError> {
        let extracted = self.extractor.extract(bytes).await?;

        let document = AttachedDocument::new(filename, &extracted.joined())
            .ok_or(ExtractionFailure::NoTextExtracted)?;

        let outcome = AttachOutcome {
            filename: document.filename().to_string(),
            text_length: document.text_length(),
        };

        let mut session = self.session.lock().await;
        session.attach(document);
        info!(
            session_id = %session.id(),
            filename = %outcome.filename,
            text_length = outcome.text_length,
            "Document attached"
        );

        Ok(outcome)
    }
}
