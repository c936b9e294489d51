//! Destination guide entity model.

use golfplex_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `destination_guides` table: one language version of the
/// long-form Markdown guide for a destination.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DestinationGuide {
    pub id: DbId,
    pub destination_id: DbId,
    pub language_code: String,
    pub title: String,
    pub content: String,
    pub meta_description: String,
    pub slug: String,
    pub word_count: i64,
    pub character_count: i64,
    pub generated_by: String,
    pub generation_model: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub last_generated_at: Option<Timestamp>,
}
