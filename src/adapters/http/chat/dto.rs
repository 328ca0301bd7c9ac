//! HTTP DTOs for chat endpoints.
//!
//! These types decouple the HTTP API from application types. Field names are
//! snake_case on the wire.

use serde::{Deserialize, Serialize};

use crate::application::handlers::chat::{AttachOutcome, ChatError, HealthReport, Reply};

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Request to send a chat message.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Reply to a chat message.
#[derive(Debug, Clone, Serialize)]
pub struct ChatResponse {
    pub status: &'static str,
    pub response: String,
    pub has_document_context: bool,
}

impl From<Reply> for ChatResponse {
    fn from(reply: Reply) -> Self {
        Self {
            status: "success",
            response: reply.text,
            has_document_context: reply.has_document_context,
        }
    }
}

impl ChatResponse {
    /// A generation failure folded into an ordinary reply.
    pub fn degraded(error: &ChatError, has_document_context: bool) -> Self {
        Self {
            status: "success",
            response: format!("Error: {}", error),
            has_document_context,
        }
    }
}

/// Bare status acknowledgement (`cleared`, `detached`).
#[derive(Debug, Clone, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
}

impl StatusResponse {
    pub fn cleared() -> Self {
        Self { status: "cleared" }
    }

    pub fn detached() -> Self {
        Self { status: "detached" }
    }
}

/// Result of a successful upload.
#[derive(Debug, Clone, Serialize)]
pub struct UploadResponse {
    pub status: &'static str,
    pub message: String,
    pub filename: String,
    pub text_length: usize,
}

impl From<AttachOutcome> for UploadResponse {
    fn from(outcome: AttachOutcome) -> Self {
        Self {
            status: "success",
            message: "PDF uploaded successfully. You can now ask questions about its content."
                .to_string(),
            filename: outcome.filename,
            text_length: outcome.text_length,
        }
    }
}

/// Health probe result.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub model: String,
    pub has_document_context: bool,
}

impl From<HealthReport> for HealthResponse {
    fn from(report: HealthReport) -> Self {
        Self {
            status: "healthy",
            model: report.model,
            has_document_context: report.has_document_context,
        }
    }
}

/// Standard error response.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub status: &'static str,
    pub code: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status: "error",
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new("BAD_REQUEST", message)
    }
}

impl From<&ChatError> for ErrorResponse {
    fn from(error: &ChatError) -> Self {
        Self::new(error.code().to_string(), error.to_string())
    }
}
