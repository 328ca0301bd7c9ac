//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, error codes)
//! - `chat` - The chat session, attached document, and prompt composition

pub mod chat;
pub mod foundation;
