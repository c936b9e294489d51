//! Repository for the `destinations` table.

use chrono::Utc;
use golfplex_core::types::DbId;

use crate::models::destination::{CreateDestination, Destination};
use crate::DbPool;

/// Column list for `destinations` queries.
const COLUMNS: &str = "\
    id, name, city, region_or_state, country, description, \
    latitude, longitude, image_url, created_at";

/// Maximum typeahead suggestions per query.
pub const TYPEAHEAD_LIMIT: i64 = 10;

/// Provides CRUD and search operations for destinations.
pub struct DestinationRepo;

impl DestinationRepo {
    /// Insert a new destination.
    pub async fn insert(
        pool: &DbPool,
        input: &CreateDestination,
    ) -> Result<Destination, sqlx::Error> {
        let query = format!(
            "INSERT INTO destinations \
                 (name, city, region_or_state, country, description, \
                  latitude, longitude, image_url, created_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Destination>(&query)
            .bind(&input.name)
            .bind(&input.city)
            .bind(&input.region_or_state)
            .bind(&input.country)
            .bind(&input.description)
            .bind(input.latitude)
            .bind(input.longitude)
            .bind(&input.image_url)
            .bind(Utc::now())
            .fetch_one(pool)
            .await
    }

    /// Fetch a destination by ID.
    pub async fn find_by_id(pool: &DbPool, id: DbId) -> Result<Option<Destination>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM destinations WHERE id = ?1");
        sqlx::query_as::<_, Destination>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Total number of destinations.
    pub async fn count(pool: &DbPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM destinations")
            .fetch_one(pool)
            .await
    }

    /// Number of destinations with at least one guide.
    pub async fn count_with_guides(pool: &DbPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(DISTINCT destination_id) FROM destination_guides")
            .fetch_one(pool)
            .await
    }

    /// Case-insensitive substring search over name, city, region, and
    /// country, restricted to destinations that already have published
    /// guide content. Ordered by name, capped at [`TYPEAHEAD_LIMIT`].
    pub async fn typeahead(pool: &DbPool, term: &str) -> Result<Vec<Destination>, sqlx::Error> {
        let pattern = format!("%{}%", term.to_lowercase());
        let query = format!(
            "SELECT {COLUMNS} FROM destinations d \
             WHERE (lower(d.name) LIKE ?1 \
                    OR lower(d.city) LIKE ?1 \
                    OR lower(d.region_or_state) LIKE ?1 \
                    OR lower(d.country) LIKE ?1) \
               AND EXISTS (SELECT 1 FROM destination_guides g \
                           WHERE g.destination_id = d.id) \
             ORDER BY d.name \
             LIMIT ?2"
        );
        sqlx::query_as::<_, Destination>(&query)
            .bind(&pattern)
            .bind(TYPEAHEAD_LIMIT)
            .fetch_all(pool)
            .await
    }
}
