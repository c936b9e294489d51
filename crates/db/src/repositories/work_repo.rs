//! Work assignment: claim the next (destination, language) pair and
//! reserve it with an expiring lease.
//!
//! The claim and the lease write happen in one transaction, so two
//! concurrent fetch-work callers cannot be handed the same pair while a
//! lease is active. A worker that dies simply lets its lease run out; the
//! pair becomes claimable again after `leased_until`.

use chrono::{Duration, Utc};
use golfplex_core::language;
use golfplex_core::types::DbId;
use golfplex_core::work::WorkPriority;

use crate::models::destination::Destination;
use crate::models::lease::WorkLease;
use crate::DbPool;

/// Column list for `destinations` selects issued by the claim queries.
const DEST_COLUMNS: &str = "\
    id, name, city, region_or_state, country, description, \
    latitude, longitude, image_url, created_at";

/// Column list for `work_leases` queries.
const LEASE_COLUMNS: &str =
    "id, destination_id, language_code, worker_id, leased_at, leased_until";

/// How many times to retry when another claimer wins the lease race.
const CLAIM_ATTEMPTS: usize = 3;

/// A successfully claimed work unit.
#[derive(Debug)]
pub struct ClaimedWork {
    pub destination: Destination,
    pub language_code: String,
    pub priority: WorkPriority,
}

enum ClaimOutcome {
    Claimed(Box<ClaimedWork>),
    NoWork,
    LostRace,
}

/// SQLITE_BUSY (5) and its extended codes BUSY_RECOVERY (261) and
/// BUSY_SNAPSHOT (517), which `busy_timeout` does not retry.
fn is_busy(err: &dyn sqlx::error::DatabaseError) -> bool {
    matches!(err.code().as_deref(), Some("5" | "261" | "517"))
        || err.message().contains("database is locked")
}

/// Provides claim and lease operations for the work queue.
pub struct WorkRepo;

impl WorkRepo {
    /// Claim the next unit of work, if any.
    ///
    /// Priority 1: a destination with no guides at all (target language is
    /// always English). Priority 2: a (destination, language) pair where
    /// guides exist but that language is missing, English preferred.
    /// Pairs under an unexpired lease are skipped; expired leases are
    /// stolen. Returns `None` when nothing is claimable.
    pub async fn claim_next(
        pool: &DbPool,
        lease_ttl: Duration,
        worker_id: Option<&str>,
    ) -> Result<Option<ClaimedWork>, sqlx::Error> {
        for _ in 0..CLAIM_ATTEMPTS {
            match Self::try_claim(pool, lease_ttl, worker_id).await? {
                ClaimOutcome::Claimed(work) => return Ok(Some(*work)),
                ClaimOutcome::NoWork => return Ok(None),
                ClaimOutcome::LostRace => continue,
            }
        }
        // Every attempt lost its race; the competing claimers got the work.
        Ok(None)
    }

    async fn try_claim(
        pool: &DbPool,
        lease_ttl: Duration,
        worker_id: Option<&str>,
    ) -> Result<ClaimOutcome, sqlx::Error> {
        let now = Utc::now();
        let until = now + lease_ttl;

        let mut tx = pool.begin().await?;

        // Priority 1: destinations without any guides, English first.
        let query = format!(
            "SELECT {DEST_COLUMNS} FROM destinations d \
             WHERE NOT EXISTS (SELECT 1 FROM destination_guides g \
                               WHERE g.destination_id = d.id) \
               AND NOT EXISTS (SELECT 1 FROM work_leases l \
                               WHERE l.destination_id = d.id \
                                 AND l.language_code = ?1 \
                                 AND l.leased_until > ?2) \
             ORDER BY RANDOM() \
             LIMIT 1"
        );
        let fresh = sqlx::query_as::<_, Destination>(&query)
            .bind(language::SOURCE_LANGUAGE)
            .bind(now)
            .fetch_optional(&mut *tx)
            .await?;

        let (destination, language_code, priority) = match fresh {
            Some(destination) => (
                destination,
                language::SOURCE_LANGUAGE.to_string(),
                WorkPriority::NoGuides,
            ),
            None => {
                // Priority 2: destinations with guides but missing languages.
                // json_each turns the language catalog into rows so the
                // whole selection stays in SQL.
                let catalog = serde_json::Value::from(language::all_languages()).to_string();
                let pair: Option<(DbId, String)> = sqlx::query_as(
                    "SELECT d.id, j.value FROM destinations d, json_each(?1) j \
                     WHERE EXISTS (SELECT 1 FROM destination_guides g \
                                   WHERE g.destination_id = d.id) \
                       AND NOT EXISTS (SELECT 1 FROM destination_guides g \
                                       WHERE g.destination_id = d.id \
                                         AND g.language_code = j.value) \
                       AND NOT EXISTS (SELECT 1 FROM work_leases l \
                                       WHERE l.destination_id = d.id \
                                         AND l.language_code = j.value \
                                         AND l.leased_until > ?2) \
                     ORDER BY CASE WHEN j.value = ?3 THEN 0 ELSE 1 END, RANDOM() \
                     LIMIT 1",
                )
                .bind(&catalog)
                .bind(now)
                .bind(language::SOURCE_LANGUAGE)
                .fetch_optional(&mut *tx)
                .await?;

                let Some((destination_id, language_code)) = pair else {
                    return Ok(ClaimOutcome::NoWork);
                };

                let query = format!("SELECT {DEST_COLUMNS} FROM destinations WHERE id = ?1");
                let destination = sqlx::query_as::<_, Destination>(&query)
                    .bind(destination_id)
                    .fetch_one(&mut *tx)
                    .await?;

                (destination, language_code, WorkPriority::MissingLanguages)
            }
        };

        // Reserve the pair. The WHERE guard only lets us steal an expired
        // lease; if a concurrent claimer committed first, zero rows change
        // and the caller retries with a fresh selection. Under WAL the
        // transaction upgrades from read to write here, and SQLite reports
        // a busy/snapshot conflict instead when another claimer committed
        // after our selects ran; that is the same lost race.
        let upsert = sqlx::query(
            "INSERT INTO work_leases \
                 (destination_id, language_code, worker_id, leased_at, leased_until) \
             VALUES (?1, ?2, ?3, ?4, ?5) \
             ON CONFLICT (destination_id, language_code) DO UPDATE \
             SET worker_id = excluded.worker_id, \
                 leased_at = excluded.leased_at, \
                 leased_until = excluded.leased_until \
             WHERE work_leases.leased_until <= ?4",
        )
        .bind(destination.id)
        .bind(&language_code)
        .bind(worker_id)
        .bind(now)
        .bind(until)
        .execute(&mut *tx)
        .await;

        let result = match upsert {
            Ok(result) => result,
            Err(sqlx::Error::Database(db_err)) if is_busy(&*db_err) => {
                return Ok(ClaimOutcome::LostRace);
            }
            Err(e) => return Err(e),
        };

        if result.rows_affected() == 0 {
            return Ok(ClaimOutcome::LostRace);
        }

        tx.commit().await?;

        tracing::debug!(
            destination_id = destination.id,
            language = %language_code,
            ?priority,
            "Claimed work unit",
        );

        Ok(ClaimOutcome::Claimed(Box::new(ClaimedWork {
            destination,
            language_code,
            priority,
        })))
    }

    /// Drop the lease on a pair, normally right after its guide is stored.
    pub async fn clear_lease(
        pool: &DbPool,
        destination_id: DbId,
        language_code: &str,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM work_leases WHERE destination_id = ?1 AND language_code = ?2")
            .bind(destination_id)
            .bind(language_code)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Fetch the lease on a pair, if one exists (expired or not).
    pub async fn lease_for(
        pool: &DbPool,
        destination_id: DbId,
        language_code: &str,
    ) -> Result<Option<WorkLease>, sqlx::Error> {
        let query = format!(
            "SELECT {LEASE_COLUMNS} FROM work_leases \
             WHERE destination_id = ?1 AND language_code = ?2"
        );
        sqlx::query_as::<_, WorkLease>(&query)
            .bind(destination_id)
            .bind(language_code)
            .fetch_optional(pool)
            .await
    }

    /// Force a lease to expire immediately. Used by operators to requeue a
    /// pair without waiting out the TTL.
    pub async fn expire_lease(
        pool: &DbPool,
        destination_id: DbId,
        language_code: &str,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE work_leases SET leased_until = ?3 \
             WHERE destination_id = ?1 AND language_code = ?2",
        )
        .bind(destination_id)
        .bind(language_code)
        .bind(Utc::now() - Duration::seconds(1))
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Number of destinations still waiting for their first guide.
    pub async fn pending_no_guides(pool: &DbPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM destinations d \
             WHERE NOT EXISTS (SELECT 1 FROM destination_guides g \
                               WHERE g.destination_id = d.id)",
        )
        .fetch_one(pool)
        .await
    }
}
