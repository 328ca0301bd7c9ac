//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the core and the outside world. Adapters implement these ports.
//!
//! - `AIProvider` - Remote text generation
//! - `TextExtractor` - Document bytes to plain text

mod ai_provider;
mod text_extractor;

pub use ai_provider::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, FinishReason, Message,
    MessageRole, ProviderInfo, RequestMetadata, TokenUsage,
};
pub use text_extractor::{ExtractedText, ExtractionFailure, TextExtractor};
