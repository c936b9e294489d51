//! Domain types shared across the GolfPlex workspace.
//!
//! This crate has no internal dependencies so it can be used by the API,
//! the storage layer, and the standalone content worker alike.

pub mod content;
pub mod error;
pub mod flags;
pub mod language;
pub mod slug;
pub mod types;
pub mod work;
