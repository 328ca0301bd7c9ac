//! HTTP adapters - REST API implementations.
//!
//! `chat` holds the endpoints; this module wraps them in the cross-cutting
//! layers (CORS, request tracing, timeout).

pub mod chat;

pub use chat::{chat_routes, ChatAppState};

use axum::Router;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::{ServerConfig, ValidationError};

/// Builds the complete application router.
///
/// # Errors
///
/// Returns `ValidationError::InvalidCorsOrigin` if a configured origin is not
/// a valid header value.
pub fn build_router(state: ChatAppState, server: &ServerConfig) -> Result<Router, ValidationError> {
    Ok(chat_routes(state)
        .layer(TimeoutLayer::new(server.request_timeout()))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(server)?))
}

/// Any origin unless specific origins are configured.
fn cors_layer(server: &ServerConfig) -> Result<CorsLayer, ValidationError> {
    let origins = server.cors_header_values()?;
    let allow_origin = if origins.is_empty() {
        AllowOrigin::from(Any)
    } else {
        AllowOrigin::list(origins)
    };

    Ok(CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(Any)
        .allow_headers(Any))
}
