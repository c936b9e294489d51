//! Route definitions for the content-generation work queue.
//!
//! All endpoints are unauthenticated: workers run on trusted hosts and
//! the API is not exposed publicly. Paths keep their trailing slash for
//! compatibility with existing worker deployments.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::work;
use crate::state::AppState;

/// Routes mounted at `/api`.
///
/// ```text
/// GET  /fetch-work/   -> fetch_work
/// POST /submit-work/  -> submit_work
/// GET  /work-status/  -> work_status
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/fetch-work/", get(work::fetch_work))
        .route("/submit-work/", post(work::submit_work))
        .route("/work-status/", get(work::work_status))
}
