//! Destination entity models and DTOs.

use golfplex_core::slug;
use golfplex_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `destinations` table: one city-level golf-travel location.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Destination {
    pub id: DbId,
    pub name: String,
    pub city: String,
    pub region_or_state: String,
    pub country: String,
    pub description: String,
    pub latitude: f64,
    pub longitude: f64,
    pub image_url: Option<String>,
    pub created_at: Timestamp,
}

impl Destination {
    /// Slug of the destination's golf-course page in the given language.
    pub fn slug(&self, language: &str) -> String {
        slug::destination_slug(&self.city, &self.region_or_state, &self.country, language)
    }
}

/// DTO for inserting a new destination.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateDestination {
    pub name: String,
    pub city: String,
    pub region_or_state: String,
    pub country: String,
    pub description: String,
    pub latitude: f64,
    pub longitude: f64,
    pub image_url: Option<String>,
}
