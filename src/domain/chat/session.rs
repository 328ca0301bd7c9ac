//! Chat session aggregate.
//!
//! There is exactly one conversation at a time. It owns the canonical
//! history sent to the model on every call, plus at most one attached
//! document.
//!
//! # Resets
//!
//! Clearing, detaching, and attaching a new document all replace history and
//! document together. A reset also mints a new `SessionId`.

use crate::domain::foundation::{SessionId, Timestamp};

use super::document::AttachedDocument;
use super::prompt::compose_prompt;
use super::turn::Turn;

/// The single conversation the service holds.
///
/// # Invariants
///
/// - `history` alternates user/model turns and only grows between resets
/// - at most one document is attached
#[derive(Debug, Clone)]
pub struct ChatSession {
    id: SessionId,
    started_at: Timestamp,
    history: Vec<Turn>,
    document: Option<AttachedDocument>,
}

impl ChatSession {
    /// Starts an empty conversation with no document.
    pub fn new() -> Self {
        Self {
            id: SessionId::new(),
            started_at: Timestamp::now(),
            history: Vec::new(),
            document: None,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn started_at(&self) -> &Timestamp {
        &self.started_at
    }

    pub fn history(&self) -> &[Turn] {
        &self.history
    }

    pub fn document(&self) -> Option<&AttachedDocument> {
        self.document.as_ref()
    }

    /// True when a document is grounding the conversation.
    pub fn has_document_context(&self) -> bool {
        self.document.is_some()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Behavior
    // ─────────────────────────────────────────────────────────────────────────

    /// Builds the prompt for `question` from the current document, if any.
    pub fn compose_prompt(&self, question: &str) -> String {
        compose_prompt(self.document.as_ref(), question)
    }

    /// Appends a completed exchange: the prompt as sent, then the reply.
    pub fn record_exchange(&mut self, prompt: impl Into<String>, reply: impl Into<String>) {
        self.history.push(Turn::user(prompt));
        self.history.push(Turn::model(reply));
    }

    /// Forgets history and document.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Starts a fresh conversation grounded in `document`.
    pub fn attach(&mut self, document: AttachedDocument) {
        self.reset();
        self.document = Some(document);
    }

    /// Drops the document. History goes with it.
    pub fn detach(&mut self) {
        self.reset();
    }
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}
