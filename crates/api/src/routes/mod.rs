pub mod health;
pub mod search;
pub mod work;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /fetch-work/         claim the next (destination, language) unit (GET)
/// /submit-work/        store generated guide content (POST)
/// /work-status/        aggregate completion counts (GET)
/// /typeahead-search/   destination autocomplete (GET)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().merge(work::router()).merge(search::router())
}
