//! Route definitions for destination search.

use axum::routing::get;
use axum::Router;

use crate::handlers::search;
use crate::state::AppState;

/// Routes mounted at `/api`.
///
/// ```text
/// GET /typeahead-search/?q= -> typeahead_search
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/typeahead-search/", get(search::typeahead_search))
}
