//! Route definitions for the health check endpoint.

use axum::routing::get;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Routes mounted at the application root.
///
/// ```text
/// GET /health -> health_check
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health_check))
}
