//! Chat module - the single conversation and the document grounding it.
//!
//! - `session` - The `ChatSession` aggregate (history + attached document)
//! - `document` - Attached document text and the upload policy
//! - `prompt` - Composition of the outgoing prompt with bounded context
//! - `turn` - One exchanged message in the conversation history

mod document;
mod prompt;
mod session;
mod turn;

pub use document::{
    AttachedDocument, UploadPolicy, UploadRejection, DEFAULT_FILENAME, MAX_UPLOAD_BYTES,
};
pub use prompt::{
    compose_prompt, context_excerpt, CONTEXT_CHAR_LIMIT, CONTEXT_INTRO, QUESTION_LABEL,
    TRUNCATION_MARKER,
};
pub use session::ChatSession;
pub use turn::{Turn, TurnRole};
