//! Application handlers.
//!
//! Orchestrate domain operations and coordinate between ports.

pub mod chat;

pub use chat::{
    AttachOutcome, ChatError, GenerationOptions, HealthReport, Reply, SessionManager,
    SessionSnapshot, UploadDocumentCommand,
};
