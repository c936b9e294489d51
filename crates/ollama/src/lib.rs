//! Client for a local Ollama instance.
//!
//! Wraps the two endpoints the content workers need: `/api/tags` to check
//! the configured model exists and `/api/generate` (streaming) to produce
//! guide text.

pub mod client;
pub mod prompts;

pub use client::{OllamaClient, OllamaError};
