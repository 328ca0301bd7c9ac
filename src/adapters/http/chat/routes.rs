//! HTTP routes for chat endpoints.

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::domain::chat::MAX_UPLOAD_BYTES;

use super::handlers::{chat, clear, detach_pdf, health, upload_pdf, ChatAppState};

/// Transport-level cap on request bodies.
///
/// Sits above the upload policy so that a file just over the policy limit
/// still reaches the handler and gets the policy's own rejection.
pub const UPLOAD_BODY_LIMIT: usize = MAX_UPLOAD_BYTES + 1024 * 1024;

/// Creates the chat router with all endpoints.
pub fn chat_routes(state: ChatAppState) -> Router {
    Router::new()
        .route("/chat", post(chat))
        .route("/clear", post(clear))
        .route("/detach-pdf", post(detach_pdf))
        .route("/upload-pdf", post(upload_pdf))
        .route("/health", get(health))
        .layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::{MockAIProvider, MockError};
    use crate::adapters::document::MockTextExtractor;
    use crate::application::handlers::chat::SessionManager;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use serde_json::Value;
    use std::sync::Arc;
    use tower::ServiceExt;

    const BOUNDARY: &str = "X-CHAT-TEST-BOUNDARY";

    fn app(provider: &MockAIProvider, extractor: &MockTextExtractor) -> (Router, Arc<SessionManager>) {
        let manager = Arc::new(SessionManager::new(
            Arc::new(provider.clone()),
            Arc::new(extractor.clone()),
        ));
        (chat_routes(ChatAppState::new(manager.clone())), manager)
    }

    fn chat_request(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/chat")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn upload_request(field: &str, filename: &str, content: &[u8]) -> Request<Body> {
        let mut body = Vec::new();
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"{filename}\"\r\nContent-Type: application/pdf\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(content);
        body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

        Request::builder()
            .method("POST")
            .uri("/upload-pdf")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    fn post_empty(uri: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    async fn json_body(response: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn chat_returns_reply() {
        let provider = MockAIProvider::new().with_response("Hi there");
        let (app, _) = app(&provider, &MockTextExtractor::new());

        let response = app.oneshot(chat_request(r#"{"message":"hello"}"#)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["status"], "success");
        assert_eq!(body["response"], "Hi there");
        assert_eq!(body["has_document_context"], false);
    }

    #[tokio::test]
    async fn blank_chat_message_is_400() {
        let provider = MockAIProvider::new();
        let (app, _) = app(&provider, &MockTextExtractor::new());

        let response = app.oneshot(chat_request(r#"{"message":"   "}"#)).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body["status"], "error");
        assert_eq!(body["code"], "EMPTY_FIELD");
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn malformed_chat_body_is_400() {
        let (app, _) = app(&MockAIProvider::new(), &MockTextExtractor::new());

        let response = app.oneshot(chat_request(r#"{"msg":"x"}"#)).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn generation_failure_is_degraded_by_default() {
        let provider = MockAIProvider::new().with_error(MockError::Unavailable {
            message: "overloaded".to_string(),
        });
        let (app, manager) = app(&provider, &MockTextExtractor::new());

        let response = app.oneshot(chat_request(r#"{"message":"hello"}"#)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["response"], "Error: provider unavailable: overloaded");
        assert!(manager.history().await.is_empty());
    }

    #[tokio::test]
    async fn generation_failure_is_502_when_not_degraded() {
        let provider = MockAIProvider::new().with_error(MockError::AuthenticationFailed);
        let manager = Arc::new(SessionManager::new(
            Arc::new(provider.clone()),
            Arc::new(MockTextExtractor::new()),
        ));
        let app = chat_routes(ChatAppState::new(manager).with_degraded_generation_errors(false));

        let response = app.oneshot(chat_request(r#"{"message":"hello"}"#)).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let body = json_body(response).await;
        assert_eq!(body["code"], "AI_PROVIDER_ERROR");
    }

    #[tokio::test]
    async fn clear_and_detach_acknowledge() {
        let (app, _) = app(&MockAIProvider::new(), &MockTextExtractor::new());

        let response = app.clone().oneshot(post_empty("/clear")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["status"], "cleared");

        let response = app.oneshot(post_empty("/detach-pdf")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["status"], "detached");
    }

    #[tokio::test]
    async fn upload_reports_filename_and_length() {
        let extractor = MockTextExtractor::new().with_text("Hello World");
        let (app, manager) = app(&MockAIProvider::new(), &extractor);

        let response = app
            .oneshot(upload_request("file", "report.pdf", b"%PDF-1.4"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["status"], "success");
        assert_eq!(body["filename"], "report.pdf");
        assert_eq!(body["text_length"], 11);
        assert_eq!(
            body["message"],
            "PDF uploaded successfully. You can now ask questions about its content."
        );
        assert!(manager.has_document_context().await);
        assert_eq!(extractor.received_sizes(), vec![8]);
    }

    #[tokio::test]
    async fn upload_of_non_pdf_is_400() {
        let extractor = MockTextExtractor::new().with_text("text");
        let (app, _) = app(&MockAIProvider::new(), &extractor);

        let response = app
            .oneshot(upload_request("file", "notes.txt", b"plain"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body["code"], "UNSUPPORTED_FILE_TYPE");
        assert_eq!(body["message"], "Only PDF files are allowed");
        assert_eq!(extractor.call_count(), 0);
    }

    #[tokio::test]
    async fn upload_over_policy_limit_is_400() {
        let extractor = MockTextExtractor::new().with_text("text");
        let (app, _) = app(&MockAIProvider::new(), &extractor);
        let content = vec![b'a'; MAX_UPLOAD_BYTES + 1];

        let response = app
            .oneshot(upload_request("file", "big.pdf", &content))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body["code"], "FILE_TOO_LARGE");
        assert_eq!(body["message"], "File too large. Maximum size is 10MB");
        assert_eq!(extractor.call_count(), 0);
    }

    #[tokio::test]
    async fn upload_over_body_limit_is_400() {
        let extractor = MockTextExtractor::new().with_text("text");
        let (app, manager) = app(&MockAIProvider::new(), &extractor);
        let content = vec![b'a'; UPLOAD_BODY_LIMIT + 1024 * 1024];

        let response = app
            .oneshot(upload_request("file", "huge.pdf", &content))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body["code"], "FILE_TOO_LARGE");
        assert_eq!(body["message"], "File too large. Maximum size is 10MB");
        assert_eq!(extractor.call_count(), 0);
        assert!(!manager.has_document_context().await);
    }

    #[tokio::test]
    async fn upload_with_no_text_is_400() {
        let extractor = MockTextExtractor::new().with_text("  ");
        let (app, manager) = app(&MockAIProvider::new(), &extractor);

        let response = app
            .oneshot(upload_request("file", "scan.pdf", b"%PDF"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body["code"], "NO_TEXT_EXTRACTED");
        assert!(!manager.has_document_context().await);
    }

    #[tokio::test]
    async fn upload_without_file_field_is_400() {
        let extractor = MockTextExtractor::new();
        let (app, _) = app(&MockAIProvider::new(), &extractor);

        let response = app
            .oneshot(upload_request("attachment", "a.pdf", b"%PDF"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["message"], "No file provided");
        assert_eq!(extractor.call_count(), 0);
    }

    #[tokio::test]
    async fn health_reports_model() {
        let (app, _) = app(&MockAIProvider::new(), &MockTextExtractor::new());

        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["model"], "mock-model-1");
        assert_eq!(body["has_document_context"], false);
    }

    #[tokio::test]
    async fn unhealthy_provider_is_500() {
        let provider = MockAIProvider::new().with_health_error(MockError::Network {
            message: "connection refused".to_string(),
        });
        let (app, _) = app(&provider, &MockTextExtractor::new());

        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json_body(response).await["status"], "error");
    }
}
