//! Errors surfaced by the session manager.

use thiserror::Error;

use crate::domain::chat::UploadRejection;
use crate::domain::foundation::ErrorCode;
use crate::ports::{AIError, ExtractionFailure};

/// Everything that can go wrong in a session operation.
///
/// None of these leave the session half-updated: a failed operation
/// leaves history and document exactly as they were.
#[derive(Debug, Clone, Error)]
pub enum ChatError {
    /// Caller sent something unusable (e.g. a blank message).
    #[error("{message}")]
    InvalidInput { field: String, message: String },

    /// Upload refused by policy before extraction.
    #[error(transparent)]
    UploadRejected(#[from] UploadRejection),

    /// Document could not be read, or held no text.
    #[error(transparent)]
    Extraction(#[from] ExtractionFailure),

    /// The text-generation service failed.
    #[error(transparent)]
    Generation(#[from] AIError),
}

impl ChatError {
    /// Creates an invalid input error for a specific field.
    pub fn invalid_input(field: impl Into<String>, message: impl Into<String>) -> Self {
        ChatError::InvalidInput {
            field: field.into(),
            message: message.into(),
        }
    }

    /// The error for a blank chat message.
    pub fn empty_message() -> Self {
        Self::invalid_input("message", "Message cannot be empty")
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            ChatError::InvalidInput { .. } => ErrorCode::EmptyField,
            ChatError::UploadRejected(UploadRejection::UnsupportedFileType { .. }) => {
                ErrorCode::UnsupportedFileType
            }
            ChatError::UploadRejected(UploadRejection::TooLarge { .. }) => ErrorCode::FileTooLarge,
            ChatError::Extraction(ExtractionFailure::NoTextExtracted) => ErrorCode::NoTextExtracted,
            ChatError::Extraction(ExtractionFailure::ParseFailed(_)) => {
                ErrorCode::DocumentUnreadable
            }
            ChatError::Generation(AIError::RateLimited { .. }) => ErrorCode::RateLimited,
            ChatError::Generation(_) => ErrorCode::AIProviderError,
        }
    }
}
