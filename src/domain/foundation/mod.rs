//! Foundation module - Shared domain primitives.
//!
//! Contains identifiers, timestamps, and error codes that form the
//! vocabulary of the chat domain.

mod errors;
mod ids;
mod timestamp;

pub use errors::ErrorCode;
pub use ids::SessionId;
pub use timestamp::Timestamp;
