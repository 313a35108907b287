//! Text generation through an Ollama-compatible HTTP endpoint.

pub mod client;
pub mod prompt;

pub use client::{OllamaClient, REQUEST_TIMEOUT_SECS, Summarizer};
pub use prompt::build_prompt;
