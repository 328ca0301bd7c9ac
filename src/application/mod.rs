//! Application layer - Session operations and their handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.

pub mod handlers;

pub use handlers::{
    AttachOutcome, ChatError, GenerationOptions, HealthReport, Reply, SessionManager,
    SessionSnapshot, UploadDocumentCommand,
};
