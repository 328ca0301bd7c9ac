//! PDF Chat - a single-session chat backend grounded in one uploaded PDF.
//!
//! Messages are forwarded to a remote language model; when a document is
//! attached, the start of its text is woven into each prompt.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
