//! pdf-chat service entry point.

use std::error::Error;
use std::sync::Arc;

use pdf_chat::adapters::ai::{GeminiConfig, GeminiProvider};
use pdf_chat::adapters::document::PdfTextExtractor;
use pdf_chat::adapters::http::{build_router, ChatAppState};
use pdf_chat::application::{GenerationOptions, SessionManager};
use pdf_chat::config::{init_logging, AppConfig, ValidationError};
use secrecy::ExposeSecret;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = AppConfig::load()?;
    init_logging(&config.server);
    config.validate()?;

    tracing::info!("PDF Chat v{}", env!("CARGO_PKG_VERSION"));

    let api_key = config
        .ai
        .gemini_api_key
        .as_ref()
        .ok_or(ValidationError::MissingRequired("GEMINI_API_KEY"))?;
    let provider = GeminiProvider::new(
        GeminiConfig::new(api_key.expose_secret().clone())
            .with_model(&config.ai.model)
            .with_base_url(&config.ai.base_url)
            .with_timeout(config.ai.timeout()),
    )?;

    let manager = SessionManager::new(Arc::new(provider), Arc::new(PdfTextExtractor::new()))
        .with_generation_options(GenerationOptions {
            system_prompt: config.ai.system_prompt.clone(),
            max_tokens: config.ai.max_output_tokens,
            temperature: config.ai.temperature,
        });

    let state = ChatAppState::new(Arc::new(manager))
        .with_degraded_generation_errors(config.chat.degrade_generation_errors);
    let app = build_router(state, &config.server)?;

    let addr = config.server.socket_addr()?;
    tracing::info!(model = %config.ai.model, "Starting HTTP server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}
