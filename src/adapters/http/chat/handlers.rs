//! HTTP handlers for chat endpoints.

use std::sync::Arc;

use axum::{
    extract::{multipart::MultipartError, rejection::JsonRejection, Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::application::handlers::chat::{ChatError, SessionManager, UploadDocumentCommand};
use crate::domain::chat::{UploadRejection, MAX_UPLOAD_BYTES};
use crate::domain::foundation::ErrorCode;

use super::dto::{
    ChatRequest, ChatResponse, ErrorResponse, HealthResponse, StatusResponse, UploadResponse,
};

/// Multipart field carrying the document.
const FILE_FIELD: &str = "file";

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct ChatAppState {
    manager: Arc<SessionManager>,
    degrade_generation_errors: bool,
}

impl ChatAppState {
    pub fn new(manager: Arc<SessionManager>) -> Self {
        Self {
            manager,
            degrade_generation_errors: true,
        }
    }

    /// When true, generation failures come back as a 200 reply reading
    /// `"Error: ..."` instead of a 502.
    pub fn with_degraded_generation_errors(mut self, degrade: bool) -> Self {
        self.degrade_generation_errors = degrade;
        self
    }

    pub fn manager(&self) -> &Arc<SessionManager> {
        &self.manager
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /chat - Answer a message
pub async fn chat(
    State(state): State<ChatAppState>,
    body: Result<Json<ChatRequest>, JsonRejection>,
) -> Response {
    let Json(req) = match body {
        Ok(body) => body,
        Err(rejection) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::bad_request(rejection.body_text())),
            )
                .into_response()
        }
    };

    match state.manager.respond(&req.message).await {
        Ok(reply) => (StatusCode::OK, Json(ChatResponse::from(reply))).into_response(),
        Err(e @ ChatError::Generation(_)) if state.degrade_generation_errors => {
            let grounded = state.manager.has_document_context().await;
            (StatusCode::OK, Json(ChatResponse::degraded(&e, grounded))).into_response()
        }
        Err(e) => handle_chat_error(e),
    }
}

/// POST /clear - Forget history and document
pub async fn clear(State(state): State<ChatAppState>) -> Response {
    state.manager.reset().await;
    (StatusCode::OK, Json(StatusResponse::cleared())).into_response()
}

/// POST /detach-pdf - Drop the document (and history with it)
pub async fn detach_pdf(State(state): State<ChatAppState>) -> Response {
    state.manager.detach_document().await;
    (StatusCode::OK, Json(StatusResponse::detached())).into_response()
}

/// POST /upload-pdf - Attach a PDF sent as multipart field `file`
pub async fn upload_pdf(State(state): State<ChatAppState>, mut multipart: Multipart) -> Response {
    let cmd = loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(ErrorResponse::new(
                        ErrorCode::ValidationFailed.to_string(),
                        "No file provided",
                    )),
                )
                    .into_response()
            }
            Err(e) => return handle_multipart_error(e),
        };

        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let filename = field.file_name().map(str::to_string);
        match field.bytes().await {
            Ok(bytes) => break UploadDocumentCommand::new(filename, bytes.to_vec()),
            Err(e) => return handle_multipart_error(e),
        }
    };

    match state.manager.upload_document(cmd).await {
        Ok(outcome) => (StatusCode::OK, Json(UploadResponse::from(outcome))).into_response(),
        Err(e) => handle_chat_error(e),
    }
}

/// GET /health - Probe the AI provider
pub async fn health(State(state): State<ChatAppState>) -> Response {
    match state.manager.check_health().await {
        Ok(report) => (StatusCode::OK, Json(HealthResponse::from(report))).into_response(),
        Err(e) => {
            tracing::error!("Health check failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new(
                    e.code().to_string(),
                    format!("Service unhealthy: {}", e),
                )),
            )
                .into_response()
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Error mapping
// ════════════════════════════════════════════════════════════════════════════

fn handle_chat_error(error: ChatError) -> Response {
    let status = match &error {
        ChatError::InvalidInput { .. }
        | ChatError::UploadRejected(_)
        | ChatError::Extraction(_) => {
            tracing::debug!(code = %error.code(), "Rejected request: {}", error);
            StatusCode::BAD_REQUEST
        }
        ChatError::Generation(_) => {
            tracing::warn!(code = %error.code(), "Generation failed: {}", error);
            StatusCode::BAD_GATEWAY
        }
    };

    (status, Json(ErrorResponse::from(&error))).into_response()
}

/// A body that overran the transport limit is reported like any oversized upload.
fn handle_multipart_error(error: MultipartError) -> Response {
    if error.status() == StatusCode::PAYLOAD_TOO_LARGE {
        let rejection = ChatError::UploadRejected(UploadRejection::TooLarge {
            size: MAX_UPLOAD_BYTES + 1,
            max: MAX_UPLOAD_BYTES,
        });
        return handle_chat_error(rejection);
    }

    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse::bad_request(error.body_text())),
    )
        .into_response()
}
