//! Health check handler.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub db_healthy: bool,
}

/// GET /health
///
/// Liveness probe. `db_healthy` reflects a trivial round trip to SQLite;
/// the endpoint itself always returns 200 so orchestrators can tell a
/// degraded instance from a dead one.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_healthy = golfplex_db::health_check(&state.pool).await.is_ok();

    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
    })
}
