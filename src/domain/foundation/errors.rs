//! Error codes shared across the domain and the HTTP boundary.

use std::fmt;

/// Error codes organized by category.
///
/// The string form is what clients see in the `code` field of error bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Validation errors
    ValidationFailed,
    EmptyField,
    UnsupportedFileType,
    FileTooLarge,

    // Document errors
    NoTextExtracted,
    DocumentUnreadable,

    // AI errors
    AIProviderError,
    RateLimited,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::ValidationFailed => "VALIDATION_FAILED",
            ErrorCode::EmptyField => "EMPTY_FIELD",
            ErrorCode::UnsupportedFileType => "UNSUPPORTED_FILE_TYPE",
            ErrorCode::FileTooLarge => "FILE_TOO_LARGE",
            ErrorCode::NoTextExtracted => "NO_TEXT_EXTRACTED",
            ErrorCode::DocumentUnreadable => "DOCUMENT_UNREADABLE",
            ErrorCode::AIProviderError => "AI_PROVIDER_ERROR",
            ErrorCode::RateLimited => "RATE_LIMITED",
        };
        write!(f, "{}", s)
    }
}
