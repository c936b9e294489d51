//! Repository for the `destination_guides` table.
//!
//! Upserts recompute the slug and word/character counts on every write so
//! stored metadata always matches the content.

use chrono::Utc;
use golfplex_core::content;
use golfplex_core::slug;
use golfplex_core::types::DbId;
use golfplex_core::work::GuideAction;

use crate::models::destination::Destination;
use crate::models::guide::DestinationGuide;
use crate::DbPool;

/// Column list for `destination_guides` queries.
const COLUMNS: &str = "\
    id, destination_id, language_code, title, content, meta_description, \
    slug, word_count, character_count, generated_by, generation_model, \
    created_at, updated_at, last_generated_at";

/// Provides CRUD operations for destination guides.
pub struct GuideRepo;

impl GuideRepo {
    /// Insert or overwrite the guide for (destination, language).
    ///
    /// Existing rows keep their `created_at`; content, counts, and the
    /// generation timestamps are replaced (last-write-wins).
    pub async fn upsert(
        pool: &DbPool,
        destination: &Destination,
        language_code: &str,
        guide_content: &str,
    ) -> Result<(DestinationGuide, GuideAction), sqlx::Error> {
        let now = Utc::now();
        let slug = slug::guide_slug(
            &destination.city,
            &destination.region_or_state,
            &destination.country,
            language_code,
        );
        let words = content::word_count(guide_content) as i64;
        let chars = content::character_count(guide_content) as i64;

        let mut tx = pool.begin().await?;

        let existing: Option<DbId> = sqlx::query_scalar(
            "SELECT id FROM destination_guides \
             WHERE destination_id = ?1 AND language_code = ?2",
        )
        .bind(destination.id)
        .bind(language_code)
        .fetch_optional(&mut *tx)
        .await?;

        let (guide, action) = match existing {
            Some(id) => {
                let query = format!(
                    "UPDATE destination_guides \
                     SET content = ?2, slug = ?3, word_count = ?4, character_count = ?5, \
                         updated_at = ?6, last_generated_at = ?6 \
                     WHERE id = ?1 \
                     RETURNING {COLUMNS}"
                );
                let guide = sqlx::query_as::<_, DestinationGuide>(&query)
                    .bind(id)
                    .bind(guide_content)
                    .bind(&slug)
                    .bind(words)
                    .bind(chars)
                    .bind(now)
                    .fetch_one(&mut *tx)
                    .await?;
                (guide, GuideAction::Updated)
            }
            None => {
                let query = format!(
                    "INSERT INTO destination_guides \
                         (destination_id, language_code, content, slug, \
                          word_count, character_count, created_at, updated_at, \
                          last_generated_at) \
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?7, ?7) \
                     RETURNING {COLUMNS}"
                );
                let guide = sqlx::query_as::<_, DestinationGuide>(&query)
                    .bind(destination.id)
                    .bind(language_code)
                    .bind(guide_content)
                    .bind(&slug)
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

    /// Fetch one guide by (destination, language).
    pub async fn find(
        pool: &DbPool,
        destination_id: DbId,
        language_code: &str,
    ) -> Result<Option<DestinationGuide>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM destination_guides \
             WHERE destination_id = ?1 AND language_code = ?2"
        );
        sqlx::query_as::<_, DestinationGuide>(&query)
            .bind(destination_id)
            .bind(language_code)
            .fetch_optional(pool)
            .await
    }

    /// All guides for a destination, ordered by language code.
    pub async fn list_for_destination(
        pool: &DbPool,
        destination_id: DbId,
    ) -> Result<Vec<DestinationGuide>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM destination_guides \
             WHERE destination_id = ?1 \
             ORDER BY language_code"
        );
        sqlx::query_as::<_, DestinationGuide>(&query)
            .bind(destination_id)
            .fetch_all(pool)
            .await
    }

    /// Total number of guide rows.
    pub async fn count_all(pool: &DbPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM destination_guides")
            .fetch_one(pool)
            .await
    }

    /// Guide counts grouped by language code, one round trip.
    pub async fn count_by_language(pool: &DbPool) -> Result<Vec<(String, i64)>, sqlx::Error> {
        sqlx::query_as(
            "SELECT language_code, COUNT(*) FROM destination_guides \
             GROUP BY language_code",
        )
        .fetch_all(pool)
        .await
    }
}
