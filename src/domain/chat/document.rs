//! Attached document value object and the upload policy.

use thiserror::Error;

/// Largest accepted upload (10 MiB).
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Filename used when the client did not send one.
pub const DEFAULT_FILENAME: &str = "unnamed.pdf";

const PDF_EXTENSION: &str = ".pdf";

/// Text of the one document grounding the conversation.
///
/// # Invariants
///
/// - `text` has no leading/trailing whitespace and is never empty
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachedDocument {
    filename: String,
    text: String,
}

impl AttachedDocument {
    /// Wraps extracted text, trimming it first.
    ///
    /// Returns `None` when nothing but whitespace was extracted.
    pub fn new(filename: impl Into<String>, text: &str) -> Option<Self> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        Some(Self {
            filename: filename.into(),
            text: text.to_string(),
        })
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Full extracted text (never truncated here).
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Length of the text in characters.
    pub fn text_length(&self) -> usize {
        self.text.chars().count()
    }
}

/// Why an upload was refused before any extraction was attempted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UploadRejection {
    #[error("Only PDF files are allowed")]
    UnsupportedFileType { filename: String },

    #[error("File too large. Maximum size is {}MB", .max / (1024 * 1024))]
    TooLarge { size: usize, max: usize },
}

/// Rules an upload must satisfy: a `.pdf` name and a bounded size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadPolicy {
    max_bytes: usize,
}

impl UploadPolicy {
    /// Checks an upload's name and size. Extension match is case-insensitive.
    pub fn check(&self, filename: &str, size: usize) -> Result<(), UploadRejection> {
        if !filename.to_lowercase().ends_with(PDF_EXTENSION) {
            return Err(UploadRejection::UnsupportedFileType {
                filename: filename.to_string(),
            });
        }
        if size > self.max_bytes {
            return Err(UploadRejection::TooLarge {
                size,
                max: self.max_bytes,
            });
        }
        Ok(())
    }
}

impl Default for UploadPolicy {
    fn default() -> Self {
        Self {
            max_bytes: MAX_UPLOAD_BYTES,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attached_document_trims_text() {
        let doc = AttachedDocument::new("a.pdf", "  \n Hello World \t").unwrap();
        assert_eq!(doc.text(), "Hello World");
        assert_eq!(doc.text_length(), 11);
        assert_eq!(doc.filename(), "a.pdf");
    }

    #[test]
    fn attached_document_rejects_blank_text() {
        assert!(AttachedDocument::new("a.pdf", "").is_none());
        assert!(AttachedDocument::new("a.pdf", " \n\t ").is_none());
    }

    #[test]
    fn text_length_counts_characters_not_bytes() {
        let doc = AttachedDocument::new("a.pdf", "héllo").unwrap();
        assert_eq!(doc.text_length(), 5);
    }

    #[test]
    fn policy_accepts_pdf_in_any_case() {
        let policy = UploadPolicy::default();
        assert!(policy.check("report.pdf", 10).is_ok());
        assert!(policy.check("REPORT.PDF", 10).is_ok());
    }

    #[test]
    fn policy_rejects_other_extensions() {
        let policy = UploadPolicy::default();
        let err = policy.check("notes.txt", 10).unwrap_err();
        assert!(matches!(err, UploadRejection::UnsupportedFileType { .. }));
        assert_eq!(err.to_string(), "Only PDF files are allowed");
    }

    #[test]
    fn policy_allows_exactly_the_limit() {
        let policy = UploadPolicy::default();
        assert!(policy.check("big.pdf", MAX_UPLOAD_BYTES).is_ok());
    }

    #[test]
    fn policy_rejects_one_byte_over_limit() {
        let policy = UploadPolicy::default();
        let err = policy.check("big.pdf", MAX_UPLOAD_BYTES + 1).unwrap_err();
        assert_eq!(
            err,
            UploadRejection::TooLarge {
                size: MAX_UPLOAD_BYTES + 1,
                max: MAX_UPLOAD_BYTES
            }
        );
        assert_eq!(err.to_string(), "File too large. Maximum size is 10MB");
    }
}
