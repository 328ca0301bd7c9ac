//! Chat handlers - the conversation session manager.

mod errors;
mod session_manager;
mod upload_document;

pub use errors::ChatError;
pub use session_manager::{
    GenerationOptions, HealthReport, Reply, SessionManager, SessionSnapshot,
};
pub use upload_document::{AttachOutcome, UploadDocumentCommand};
