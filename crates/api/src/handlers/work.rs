//! Handlers for the content-generation work queue.
//!
//! `fetch-work` claims one (destination, language) pair under an expiring
//! lease, `submit-work` stores the produced guide and releases the lease,
//! `work-status` reports aggregate completion.

use std::collections::BTreeMap;

use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Duration;
use serde::Serialize;

use golfplex_core::error::CoreError;
use golfplex_core::work::{
    BulkSubmitResponse, BulkSubmitResults, ExistingGuide, FetchWorkResponse, GuideAction,
    SubmitWorkRequest, SubmitWorkResponse, SubmittedDestination, SubmittedGuide, WorkDestination,
    WorkRequirements, WorkUnit,
};
use golfplex_core::{content, language};
use golfplex_db::models::destination::Destination;
use golfplex_db::repositories::{CityGuideRepo, DestinationRepo, GuideRepo, WorkRepo};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Fetch a destination or map its absence to a 404.
async fn find_destination(
    pool: &golfplex_db::DbPool,
    id: golfplex_core::types::DbId,
) -> AppResult<Destination> {
    DestinationRepo::find_by_id(pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Destination",
            id,
        }))
}

/// Round to one decimal place for percentage reporting.
fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

// ---------------------------------------------------------------------------
// Fetch
// ---------------------------------------------------------------------------

/// GET /api/fetch-work/
///
/// Claim the next (destination, language) unit. The pair is leased for
/// `work_lease_secs`, so concurrent callers get distinct units; a worker
/// crash is handled by lease expiry, with no server-side cleanup needed.
pub async fn fetch_work(State(state): State<AppState>) -> AppResult<Json<FetchWorkResponse>> {
    let lease_ttl = Duration::seconds(state.config.work_lease_secs as i64);

    let Some(claimed) = WorkRepo::claim_next(&state.pool, lease_ttl, None).await? else {
        return Ok(Json(FetchWorkResponse::NoWork {
            message: "All destinations have complete content in all languages".into(),
        }));
    };

    // Existing guides ride along as translation context.
    let guides = GuideRepo::list_for_destination(&state.pool, claimed.destination.id).await?;
    let existing_guides: BTreeMap<String, ExistingGuide> = guides
        .into_iter()
        .map(|g| {
            (
                g.language_code,
                ExistingGuide {
                    content: g.content,
                    created_at: g.created_at,
                    updated_at: g.updated_at,
                },
            )
        })
        .collect();

    let is_translation = claimed.language_code != language::SOURCE_LANGUAGE
        && existing_guides.contains_key(language::SOURCE_LANGUAGE);

    let destination = &claimed.destination;
    tracing::info!(
        destination_id = destination.id,
        city = %destination.city,
        country = %destination.country,
        language = %claimed.language_code,
        "Fetched work unit",
    );

    let unit = WorkUnit {
        priority: claimed.priority,
        destination: WorkDestination {
            id: destination.id,
            name: destination.name.clone(),
            city: destination.city.clone(),
            region_or_state: destination.region_or_state.clone(),
            country: destination.country.clone(),
            description: destination.description.clone(),
            latitude: destination.latitude,
            longitude: destination.longitude,
            slug: destination.slug(language::SOURCE_LANGUAGE),
        },
        target_language: claimed.language_code.clone(),
        language_name: language::language_name(&claimed.language_code).to_string(),
        existing_guides,
        is_translation,
        work_requirements: WorkRequirements::for_language(&claimed.language_code),
    };

    Ok(Json(FetchWorkResponse::WorkAvailable(unit)))
}

// ---------------------------------------------------------------------------
// Submit
// ---------------------------------------------------------------------------

/// POST /api/submit-work/
///
/// Accepts either the atomic format (`destination_id`, `language_code`,
/// `content`) or the legacy bulk format (`destination_id`, `guides`).
/// Content under 1000 trimmed characters is rejected. Successful upserts
/// release the lease on the pair.
pub async fn submit_work(
    State(state): State<AppState>,
    Json(input): Json<SubmitWorkRequest>,
) -> AppResult<Response> {
    let Some(destination_id) = input.destination_id else {
        return Err(AppError::BadRequest("destination_id is required".into()));
    };

    // Atomic format takes precedence when language_code is present.
    if let Some(language_code) = input.language_code {
        let guide_content = input.content.unwrap_or_default();
        content::validate_guide_content(&guide_content)?;

        let destination = find_destination(&state.pool, destination_id).await?;
        let (guide, action) =
            GuideRepo::upsert(&state.pool, &destination, &language_code, &guide_content).await?;
        WorkRepo::clear_lease(&state.pool, destination_id, &language_code).await?;

        tracing::info!(
            destination_id,
            city = %destination.city,
            country = %destination.country,
            language = %language_code,
            ?action,
            "Submitted work",
        );

        let response = SubmitWorkResponse {
            status: "success".into(),
            destination: SubmittedDestination {
                id: destination.id,
                city: destination.city,
                country: destination.country,
            },
            guide: SubmittedGuide {
                language_name: language::language_name(&language_code).to_string(),
                language_code,
                action,
                content_length: content::character_count(&guide_content),
                created_at: guide.created_at,
                updated_at: guide.updated_at,
            },
            worker_info: input.worker_info,
        };
        return Ok(Json(response).into_response());
    }

    // Legacy bulk format.
    let guides = input.guides.unwrap_or_default();
    if guides.is_empty() {
        return Err(AppError::BadRequest(
            "Either language_code+content or guides is required".into(),
        ));
    }

    let destination = find_destination(&state.pool, destination_id).await?;
    let mut results = BulkSubmitResults::default();

    for (lang, guide) in &guides {
        if content::validate_guide_content(&guide.content).is_err() {
            results.errors.push(format!("Content too short for {lang}"));
            continue;
        }

        match GuideRepo::upsert(&state.pool, &destination, lang, &guide.content).await {
            Ok((_, GuideAction::Created)) => {
                results.created_guides.push(lang.clone());
            }
            Ok((_, GuideAction::Updated)) => {
                results.updated_guides.push(lang.clone());
            }
            Err(e) => {
                tracing::warn!(destination_id, language = %lang, error = %e, "Bulk upsert failed");
                results.errors.push(format!("Error processing {lang}: {e}"));
                continue;
            }
        }
        WorkRepo::clear_lease(&state.pool, destination_id, lang).await?;
    }

    Ok(Json(BulkSubmitResponse {
        status: "success".into(),
        results,
        worker_info: input.worker_info,
    })
    .into_response())
}

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct WorkStatusResponse {
    pub overview: StatusOverview,
    pub language_stats: BTreeMap<String, LanguageStat>,
    pub target_languages: BTreeMap<String, String>,
    pub next_priorities: NextPriorities,
}

#[derive(Debug, Serialize)]
pub struct StatusOverview {
    pub total_destinations: i64,
    pub destinations_with_guides: i64,
    pub destinations_without_guides: i64,
    pub total_guides: i64,
    pub total_city_guides: i64,
    pub completion_percentage: f64,
}

#[derive(Debug, Serialize)]
pub struct LanguageStat {
    pub name: String,
    pub count: i64,
    pub percentage: f64,
}

#[derive(Debug, Serialize)]
pub struct NextPriorities {
    pub no_guides: i64,
    pub missing_translations: i64,
}

/// GET /api/work-status/
///
/// Aggregate completion counts: per-language totals plus an overall
/// percentage over `destinations x languages`. Per-language counts come
/// back in a single grouped query.
pub async fn work_status(State(state): State<AppState>) -> AppResult<Json<WorkStatusResponse>> {
    let total_destinations = DestinationRepo::count(&state.pool).await?;
    let destinations_with_guides = DestinationRepo::count_with_guides(&state.pool).await?;
    let total_guides = GuideRepo::count_all(&state.pool).await?;
    let total_city_guides = CityGuideRepo::count_all(&state.pool).await?;
    let by_language: BTreeMap<String, i64> = GuideRepo::count_by_language(&state.pool)
        .await?
        .into_iter()
        .collect();

    let mut language_stats = BTreeMap::new();
    for code in language::all_languages() {
        let count = by_language.get(code).copied().unwrap_or(0);
        let percentage = if total_destinations > 0 {
            round1(count as f64 / total_destinations as f64 * 100.0)
        } else {
            0.0
        };
        language_stats.insert(
            code.to_string(),
            LanguageStat {
                name: language::language_name(code).to_string(),
                count,
                percentage,
            },
        );
    }

    let total_possible = total_destinations * language::language_count() as i64;
    let completion_percentage = if total_possible > 0 {
        round1(total_guides as f64 / total_possible as f64 * 100.0)
    } else {
        0.0
    };

    let target_languages = language::TARGET_LANGUAGES
        .iter()
        .map(|(code, name)| (code.to_string(), name.to_string()))
        .collect();

    Ok(Json(WorkStatusResponse {
        overview: StatusOverview {
            total_destinations,
            destinations_with_guides,
            destinations_without_guides: total_destinations - destinations_with_guides,
            total_guides,
            total_city_guides,
            completion_percentage,
        },
        language_stats,
        target_languages,
        next_priorities: NextPriorities {
            no_guides: WorkRepo::pending_no_guides(&state.pool).await?,
            missing_translations: destinations_with_guides,
        },
    }))
}
