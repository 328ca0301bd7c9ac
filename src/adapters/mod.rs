//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the application to external systems:
//! - `ai` - Text generation providers (Gemini, mock)
//! - `document` - PDF text extraction
//! - `http` - REST API

pub mod ai;
pub mod document;
pub mod http;
