//! Typeahead search over destinations with published guides.

use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use golfplex_core::flags::country_flag;
use golfplex_core::language;
use golfplex_db::repositories::DestinationRepo;

use crate::error::AppResult;
use crate::state::AppState;

/// Minimum query length before the database is consulted.
const MIN_QUERY_CHARS: usize = 2;

#[derive(Debug, Deserialize)]
pub struct TypeaheadQuery {
    #[serde(default)]
    pub q: String,
}

#[derive(Debug, Serialize)]
pub struct TypeaheadResult {
    pub id: golfplex_core::types::DbId,
    pub name: String,
    pub city: String,
    pub region_or_state: String,
    pub country: String,
    pub country_flag: String,
    pub display_text: String,
    pub location_text: String,
    pub url: String,
}

#[derive(Debug, Serialize)]
pub struct TypeaheadResponse {
    pub results: Vec<TypeaheadResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// GET /api/typeahead-search/?q=
///
/// Case-insensitive substring match on name, city, region, or country,
/// limited to destinations that already have at least one guide. Queries
/// shorter than two characters get an empty result with a hint instead
/// of an error.
pub async fn typeahead_search(
    State(state): State<AppState>,
    Query(params): Query<TypeaheadQuery>,
) -> AppResult<Json<TypeaheadResponse>> {
    let query = params.q.trim();
    if query.chars().count() < MIN_QUERY_CHARS {
        return Ok(Json(TypeaheadResponse {
            results: Vec::new(),
            count: None,
            message: Some("Please enter at least 2 characters".into()),
        }));
    }

    let destinations = DestinationRepo::typeahead(&state.pool, query).await?;

    let results: Vec<TypeaheadResult> = destinations
        .into_iter()
        .map(|dest| {
            let slug = dest.slug(language::SOURCE_LANGUAGE);
            TypeaheadResult {
                display_text: format!("{}, {}", dest.name, dest.city),
                location_text: format!(
                    "{}, {}, {}",
                    dest.city, dest.region_or_state, dest.country
                ),
                url: format!("/golf-courses/{slug}/"),
                country_flag: country_flag(&dest.country).to_string(),
                id: dest.id,
                name: dest.name,
                city: dest.city,
                region_or_state: dest.region_or_state,
                country: dest.country,
            }
        })
        .collect();

    let count = results.len();
    Ok(Json(TypeaheadResponse {
        results,
        count: Some(count),
        message: None,
    }))
}
