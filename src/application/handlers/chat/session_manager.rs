//! Conversation session manager.
//!
//! Mediates every chat message and document upload through the one
//! `ChatSession`, and decides exactly what is sent to the AI provider.
//!
//! # Serialization
//!
//! All session access goes through a single async mutex. `respond` holds it
//! across the provider call, so two messages can never interleave their turns
//! and an upload can never land between a prompt and its reply.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::domain::chat::{ChatSession, Turn, TurnRole, UploadPolicy};
use crate::domain::foundation::{SessionId, Timestamp};
use crate::ports::{
    AIError, AIProvider, CompletionRequest, MessageRole, RequestMetadata, TextExtractor, TokenUsage,
};

use super::errors::ChatError;

/// Knobs forwarded to the provider on every completion.
#[derive(Debug, Clone, Default)]
pub struct GenerationOptions {
    pub system_prompt: Option<String>,
    pub max_tokens: Option<u32>,
    pub temperature: Option<f32>,
}

/// A successful model reply.
#[derive(Debug, Clone)]
pub struct Reply {
    pub text: String,
    pub has_document_context: bool,
    pub usage: TokenUsage,
}

/// Read-only view of the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub session_id: SessionId,
    pub started_at: Timestamp,
    pub turn_count: usize,
    pub document_filename: Option<String>,
    pub document_length: Option<usize>,
}

impl SessionSnapshot {
    pub fn has_document_context(&self) -> bool {
        self.document_filename.is_some()
    }
}

/// Result of a successful health probe.
#[derive(Debug, Clone)]
pub struct HealthReport {
    pub model: String,
    pub has_document_context: bool,
}

/// Owns the chat session and talks to the collaborators.
pub struct SessionManager {
    pub(super) session: Mutex<ChatSession>,
    pub(super) ai_provider: Arc<dyn AIProvider>,
    pub(super) extractor: Arc<dyn TextExtractor>,
    pub(super) upload_policy: UploadPolicy,
    options: GenerationOptions,
}

impl SessionManager {
    /// Creates a manager with an empty session.
    pub fn new(ai_provider: Arc<dyn AIProvider>, extractor: Arc<dyn TextExtractor>) -> Self {
        Self {
            session: Mutex::new(ChatSession::new()),
            ai_provider,
            extractor,
            upload_policy: UploadPolicy::default(),
            options: GenerationOptions::default(),
        }
    }

    /// Sets the options forwarded with every completion.
    pub fn with_generation_options(mut self, options: GenerationOptions) -> Self {
        self.options = options;
        self
    }

    /// Answers `message`, grounding it in the attached document if there is one.
    ///
    /// # Errors
    ///
    /// - `InvalidInput` if the message is blank (the provider is not called)
    /// - `Generation` if the provider fails; the session is left unchanged
    pub async fn respond(&self, message: &str) -> Result<Reply, ChatError> {
        if message.trim().is_empty() {
            return Err(ChatError::empty_message());
        }

        let mut session = self.session.lock().await;
        let prompt = session.compose_prompt(message);
        let request = self.build_request(&session, &prompt);

        debug!(
            session_id = %session.id(),
            trace_id = %request.metadata.trace_id,
            prior_turns = session.history().len(),
            grounded = session.has_document_context(),
            prompt_chars = prompt.chars().count(),
            "Sending prompt to AI provider"
        );

        let response = match self.ai_provider.complete(request).await {
            Ok(response) => response,
            Err(e) => {
                warn!(session_id = %session.id(), "AI provider failed: {}", e);
                return Err(ChatError::Generation(e));
            }
        };

        if response.content.trim().is_empty() {
            warn!(session_id = %session.id(), "AI provider returned an empty reply");
            return Err(ChatError::Generation(AIError::parse("Empty response from model")));
        }

        session.record_exchange(prompt, response.content.clone());

        Ok(Reply {
            text: response.content,
            has_document_context: session.has_document_context(),
            usage: response.usage,
        })
    }

    /// Forgets history and any attached document. Never fails.
    pub async fn reset(&self) {
        let mut session = self.session.lock().await;
        let previous = *session.id();
        session.reset();
        info!(previous_session = %previous, session_id = %session.id(), "Chat session cleared");
    }

    /// Detaches the document. History is discarded along with it.
    pub async fn detach_document(&self) {
        let mut session = self.session.lock().await;
        let previous = *session.id();
        session.detach();
        info!(previous_session = %previous, session_id = %session.id(), "Document detached");
    }

    /// True when a document is grounding the conversation.
    pub async fn has_document_context(&self) -> bool {
        self.session.lock().await.has_document_context()
    }

    /// Copy of the conversation history.
    pub async fn history(&self) -> Vec<Turn> {
        self.session.lock().await.history().to_vec()
    }

    /// Current session summary.
    pub async fn snapshot(&self) -> SessionSnapshot {
        let session = self.session.lock().await;
        SessionSnapshot {
            session_id: *session.id(),
            started_at: *session.started_at(),
            turn_count: session.history().len(),
            document_filename: session.document().map(|d| d.filename().to_string()),
            document_length: session.document().map(|d| d.text_length()),
        }
    }

    /// Probes the provider without touching the conversation.
    pub async fn check_health(&self) -> Result<HealthReport, ChatError> {
        self.ai_provider.health_check().await?;

        Ok(HealthReport {
            model: self.ai_provider.provider_info().model,
            has_document_context: self.has_document_context().await,
        })
    }

    fn build_request(&self, session: &ChatSession, prompt: &str) -> CompletionRequest {
        let metadata = RequestMetadata::new(*session.id(), Uuid::new_v4().to_string());
        let mut request = CompletionRequest::new(metadata);

        for turn in session.history() {
            let role = match turn.role() {
                TurnRole::User => MessageRole::User,
                TurnRole::Model => MessageRole::Assistant,
            };
            request = request.with_message(role, turn.content());
        }
        request = request.with_message(MessageRole::User, prompt);

        if let Some(system_prompt) = &self.options.system_prompt {
            request = request.with_system_prompt(system_prompt.clone());
        }
        if let Some(max_tokens) = self.options.max_tokens {
            request = request.with_max_tokens(max_tokens);
        }
        if let Some(temperature) = self.options.temperature {
            request = request.with_temperature(temperature);
        }

        request
    }
}
