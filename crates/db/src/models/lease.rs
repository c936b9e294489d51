//! Work lease entity model.

use golfplex_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `work_leases` table: a short-lived reservation of one
/// (destination, language) pair by a fetch-work caller.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct WorkLease {
    pub id: DbId,
    pub destination_id: DbId,
    pub language_code: String,
    pub worker_id: Option<String>,
    pub leased_at: Timestamp,
    pub leased_until: Timestamp,
}
