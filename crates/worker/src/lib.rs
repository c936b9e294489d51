//! Content-generation worker.
//!
//! Pulls (destination, language) work units from the GolfPlex API, drives
//! Ollama to generate or translate a guide, snapshots the result to disk,
//! and submits it back.

pub mod api_client;
pub mod config;
pub mod runner;
pub mod snapshot;
