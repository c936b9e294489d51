//! Repository for the `city_guides` table.

use chrono::Utc;
use golfplex_core::slug;
use golfplex_core::types::DbId;
use golfplex_core::work::GuideAction;
use sqlx::types::Json;

use crate::models::city_guide::{CityGuide, CityGuideContent};
use crate::models::destination::Destination;
use crate::DbPool;

/// Column list for `city_guides` queries.
const COLUMNS: &str = "\
    id, destination_id, language_code, title, slug, meta_description, \
    overview, neighborhoods, attractions, dining, nightlife, shopping, \
    transportation, accommodation, seasonal_guide, practical_info, \
    golf_summary, word_count, character_count, generated_by, \
    generation_model, is_published, is_featured, created_at, updated_at, \
    last_generated_at";

/// Provides CRUD operations for city guides.
pub struct CityGuideRepo;

impl CityGuideRepo {
    /// Insert or overwrite the city guide for (destination, language),
    /// recomputing the slug and the aggregate word/character counts.
    pub async fn upsert(
        pool: &DbPool,
        destination: &Destination,
        language_code: &str,
        input: &CityGuideContent,
    ) -> Result<(CityGuide, GuideAction), sqlx::Error> {
        let now = Utc::now();
        let slug = slug::city_guide_slug(
            &destination.city,
            &destination.region_or_state,
            &destination.country,
            language_code,
        );
        let words = input.word_count() as i64;
        let chars = input.character_count() as i64;

        let mut tx = pool.begin().await?;

        let existing: Option<DbId> = sqlx::query_scalar(
            "SELECT id FROM city_guides WHERE destination_id = ?1 AND language_code = ?2",
        )
        .bind(destination.id)
        .bind(language_code)
        .fetch_optional(&mut *tx)
        .await?;

        let (guide, action) = match existing {
            Some(id) => {
                let query = format!(
                    "UPDATE city_guides \
                     SET title = ?2, slug = ?3, overview = ?4, \
                         neighborhoods = ?5, attractions = ?6, dining = ?7, \
                         nightlife = ?8, shopping = ?9, transportation = ?10, \
                         accommodation = ?11, seasonal_guide = ?12, \
                         practical_info = ?13, golf_summary = ?14, \
                         word_count = ?15, character_count = ?16, \
                         updated_at = ?17, last_generated_at = ?17 \
                     WHERE id = ?1 \
                     RETURNING {COLUMNS}"
                );
                let guide = sqlx::query_as::<_, CityGuide>(&query)
                    .bind(id)
                    .bind(&input.title)
                    .bind(&slug)
                    .bind(&input.overview)
                    .bind(Json(&input.neighborhoods))
                    .bind(Json(&input.attractions))
                    .bind(Json(&input.dining))
                    .bind(Json(&input.nightlife))
                    .bind(Json(&input.shopping))
                    .bind(Json(&input.transportation))
                    .bind(Json(&input.accommodation))
                    .bind(Json(&input.seasonal_guide))
                    .bind(Json(&input.practical_info))
                    .bind(&input.golf_summary)
                    .bind(words)
                    .bind(chars)
                    .bind(now)
                    .fetch_one(&mut *tx)
                    .await?;
                (guide, GuideAction::Updated)
            }
            None => {
                let query = format!(
                    "INSERT INTO city_guides \
                         (destination_id, language_code, title, slug, overview, \
                          neighborhoods, attractions, dining, nightlife, shopping, \
                          transportation, accommodation, seasonal_guide, \
                          practical_info, golf_summary, word_count, character_count, \
                          created_at, updated_at, last_generated_at) \
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, \
                             ?13, ?14, ?15, ?16, ?17, ?18, ?18, ?18) \
                     RETURNING {COLUMNS}"
                );
                let guide = sqlx::query_as::<_, CityGuide>(&query)
                    .bind(destination.id)
                    .bind(language_code)
                    .bind(&input.title)
                    .bind(&slug)
                    .bind(&input.overview)
                    .bind(Json(&input.neighborhoods))
                    .bind(Json(&input.attractions))
                    .bind(Json(&input.dining))
                    .bind(Json(&input.nightlife))
                    .bind(Json(&input.shopping))
                    .bind(Json(&input.transportation))
                    .bind(Json(&input.accommodation))
                    .bind(Json(&input.seasonal_guide))
                    .bind(Json(&input.practical_info))
                    .bind(&input.golf_summary)
                    .bind(words)
                    .bind(chars)
                    .bind(now)
                    .fetch_one(&mut *tx)
                    .await?;
                (guide, GuideAction::Created)
            }
        };

        tx.commit().await?;
        Ok((guide, action))
    }

    /// Fetch one city guide by (destination, language).
    pub async fn find(
        pool: &DbPool,
        destination_id: DbId,
        language_code: &str,
    ) -> Result<Option<CityGuide>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM city_guides \
             WHERE destination_id = ?1 AND language_code = ?2"
        );
        sqlx::query_as::<_, CityGuide>(&query)
            .bind(destination_id)
            .bind(language_code)
            .fetch_optional(pool)
            .await
    }

    /// Total number of city guide rows.
    pub async fn count_all(pool: &DbPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM city_guides")
            .fetch_one(pool)
            .await
    }
}
