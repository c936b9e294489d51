//! City guide entity model: broader lifestyle content stored as JSON
//! sections, independent of the long-form golf guides.

use golfplex_core::content;
use golfplex_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::types::Json;
use sqlx::FromRow;

/// A row from the `city_guides` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CityGuide {
    pub id: DbId,
    pub destination_id: DbId,
    pub language_code: String,
    pub title: String,
    pub slug: String,
    pub meta_description: String,
    pub overview: String,
    pub neighborhoods: Json<Value>,
    pub attractions: Json<Value>,
    pub dining: Json<Value>,
    pub nightlife: Json<Value>,
    pub shopping: Json<Value>,
    pub transportation: Json<Value>,
    pub accommodation: Json<Value>,
    pub seasonal_guide: Json<Value>,
    pub practical_info: Json<Value>,
    pub golf_summary: String,
    pub word_count: i64,
    pub character_count: i64,
    pub generated_by: String,
    pub generation_model: String,
    pub is_published: bool,
    pub is_featured: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub last_generated_at: Option<Timestamp>,
}

/// DTO carrying the content sections of a city guide upsert.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CityGuideContent {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub overview: String,
    #[serde(default)]
    pub neighborhoods: Value,
    #[serde(default)]
    pub attractions: Value,
    #[serde(default)]
    pub dining: Value,
    #[serde(default)]
    pub nightlife: Value,
    #[serde(default)]
    pub shopping: Value,
    #[serde(default)]
    pub transportation: Value,
    #[serde(default)]
    pub accommodation: Value,
    #[serde(default)]
    pub seasonal_guide: Value,
    #[serde(default)]
    pub practical_info: Value,
    #[serde(default)]
    pub golf_summary: String,
}

impl CityGuideContent {
    fn sections(&self) -> [&Value; 9] {
        [
            &self.neighborhoods,
            &self.attractions,
            &self.dining,
            &self.nightlife,
            &self.shopping,
            &self.transportation,
            &self.accommodation,
            &self.seasonal_guide,
            &self.practical_info,
        ]
    }

    /// Total words across overview, golf summary, and every JSON section.
    pub fn word_count(&self) -> u32 {
        let mut total = content::word_count(&self.overview) + content::word_count(&self.golf_summary);
        for section in self.sections() {
            total += content::json_word_count(section);
        }
        total
    }

    /// Total characters across overview, golf summary, and every JSON section.
    pub fn character_count(&self) -> u32 {
        let mut total =
            content::character_count(&self.overview) + content::character_count(&self.golf_summary);
        for section in self.sections() {
            total += content::json_character_count(section);
        }
        total
    }
}
