use chrono::Duration;
use serde_json::json;
use sqlx::SqlitePool;

use golfplex_core::work::{GuideAction, WorkPriority};
use golfplex_db::models::city_guide::CityGuideContent;
use golfplex_db::models::destination::{CreateDestination, Destination};
use golfplex_db::repositories::{CityGuideRepo, DestinationRepo, GuideRepo, WorkRepo};

fn create(name: &str, city: &str, country: &str) -> CreateDestination {
    CreateDestination {
        name: name.into(),
        city: city.into(),
        region_or_state: "Fife".into(),
        country: country.into(),
        description: "Links golf".into(),
        latitude: 56.34,
        longitude: -2.8,
        image_url: None,
    }
}

async fn seed(pool: &SqlitePool, name: &str, city: &str) -> Destination {
    DestinationRepo::insert(pool, &create(name, city, "Scotland"))
        .await
        .expect("insert destination")
}

fn guide_body() -> String {
    "Wind off the sea shapes every approach shot. ".repeat(30)
}

// ---------------------------------------------------------------------------
// Guides
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn guide_upsert_is_create_then_overwrite(pool: SqlitePool) {
    let dest = seed(&pool, "Old Course", "St Andrews").await;

    let (guide, action) = GuideRepo::upsert(&pool, &dest, "en", &guide_body())
        .await
        .expect("first upsert");
    assert_eq!(action, GuideAction::Created);
    assert_eq!(guide.slug, "golf-guide-st-andrews-fife-scotland");
    assert_eq!(guide.word_count, 30 * 8);
    let first_created = guide.created_at;

    let (guide, action) = GuideRepo::upsert(&pool, &dest, "en", "short replacement text")
        .await
        .expect("second upsert");
    assert_eq!(action, GuideAction::Updated);
    assert_eq!(guide.content, "short replacement text");
    assert_eq!(guide.word_count, 3);
    // Overwrites keep the original creation time.
    assert_eq!(guide.created_at, first_created);
    assert!(guide.updated_at >= first_created);

    // Still exactly one row for the pair, holding the replacement text.
    assert_eq!(GuideRepo::count_all(&pool).await.unwrap(), 1);
    let stored = GuideRepo::find(&pool, dest.id, "en")
        .await
        .unwrap()
        .expect("stored guide");
    assert_eq!(stored.content, "short replacement text");
    assert!(GuideRepo::find(&pool, dest.id, "fr").await.unwrap().is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn translated_guide_slug_is_language_prefixed(pool: SqlitePool) {
    let dest = seed(&pool, "Old Course", "St Andrews").await;

    let (guide, _) = GuideRepo::upsert(&pool, &dest, "ja", &guide_body())
        .await
        .expect("upsert");
    assert_eq!(guide.slug, "ja-golf-guide-st-andrews-fife-scotland");
}

#[sqlx::test(migrations = "./migrations")]
async fn guides_are_counted_per_language(pool: SqlitePool) {
    let a = seed(&pool, "Old Course", "St Andrews").await;
    let b = seed(&pool, "Carnoustie", "Carnoustie").await;

    GuideRepo::upsert(&pool, &a, "en", &guide_body()).await.unwrap();
    GuideRepo::upsert(&pool, &b, "en", &guide_body()).await.unwrap();
    GuideRepo::upsert(&pool, &a, "de", &guide_body()).await.unwrap();

    let mut counts = GuideRepo::count_by_language(&pool).await.unwrap();
    counts.sort();
    assert_eq!(counts, vec![("de".to_string(), 1), ("en".to_string(), 2)]);
}

// ---------------------------------------------------------------------------
// Work claims and leases
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn fresh_destination_is_claimed_for_english(pool: SqlitePool) {
    let dest = seed(&pool, "Old Course", "St Andrews").await;

    let claimed = WorkRepo::claim_next(&pool, Duration::minutes(15), Some("worker-1"))
        .await
        .expect("claim")
        .expect("work available");
    assert_eq!(claimed.destination.id, dest.id);
    assert_eq!(claimed.language_code, "en");
    assert_eq!(claimed.priority, WorkPriority::NoGuides);

    let lease = WorkRepo::lease_for(&pool, dest.id, "en")
        .await
        .unwrap()
        .expect("lease row");
    assert_eq!(lease.worker_id.as_deref(), Some("worker-1"));
    assert!(lease.leased_until > lease.leased_at);
}

#[sqlx::test(migrations = "./migrations")]
async fn active_lease_blocks_a_second_claim(pool: SqlitePool) {
    seed(&pool, "Old Course", "St Andrews").await;

    let first = WorkRepo::claim_next(&pool, Duration::minutes(15), None)
        .await
        .unwrap();
    assert!(first.is_some());

    let second = WorkRepo::claim_next(&pool, Duration::minutes(15), None)
        .await
        .unwrap();
    assert!(second.is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn expired_lease_is_stolen_by_the_next_claim(pool: SqlitePool) {
    let dest = seed(&pool, "Old Course", "St Andrews").await;

    WorkRepo::claim_next(&pool, Duration::minutes(15), Some("worker-1"))
        .await
        .unwrap()
        .expect("first claim");
    WorkRepo::expire_lease(&pool, dest.id, "en").await.unwrap();

    let reclaimed = WorkRepo::claim_next(&pool, Duration::minutes(15), Some("worker-2"))
        .await
        .unwrap()
        .expect("reclaim after expiry");
    assert_eq!(reclaimed.destination.id, dest.id);

    let lease = WorkRepo::lease_for(&pool, dest.id, "en")
        .await
        .unwrap()
        .expect("lease row");
    assert_eq!(lease.worker_id.as_deref(), Some("worker-2"));
}

#[sqlx::test(migrations = "./migrations")]
async fn destinations_with_guides_yield_missing_languages(pool: SqlitePool) {
    let dest = seed(&pool, "Old Course", "St Andrews").await;
    GuideRepo::upsert(&pool, &dest, "en", &guide_body()).await.unwrap();

    let claimed = WorkRepo::claim_next(&pool, Duration::minutes(15), None)
        .await
        .unwrap()
        .expect("translation work");
    assert_eq!(claimed.destination.id, dest.id);
    assert_eq!(claimed.priority, WorkPriority::MissingLanguages);
    assert_ne!(claimed.language_code, "en");
}

#[sqlx::test(migrations = "./migrations")]
async fn queue_drains_once_every_language_exists(pool: SqlitePool) {
    let dest = seed(&pool, "Old Course", "St Andrews").await;
    for code in golfplex_core::language::all_languages() {
        GuideRepo::upsert(&pool, &dest, code, &guide_body())
            .await
            .unwrap();
    }

    let claimed = WorkRepo::claim_next(&pool, Duration::minutes(15), None)
        .await
        .unwrap();
    assert!(claimed.is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn simultaneous_claims_resolve_without_errors(pool: SqlitePool) {
    seed(&pool, "Old Course", "St Andrews").await;

    // Two workers race for the single claimable pair on separate pool
    // connections. One wins it, the other sees an empty queue; neither
    // call may surface a database-busy error.
    let (a, b) = tokio::join!(
        WorkRepo::claim_next(&pool, Duration::minutes(15), Some("worker-a")),
        WorkRepo::claim_next(&pool, Duration::minutes(15), Some("worker-b")),
    );
    let a = a.expect("first claim errored");
    let b = b.expect("second claim errored");
    assert!(
        a.is_some() != b.is_some(),
        "exactly one claimer should win: a={:?} b={:?}",
        a.map(|w| w.language_code),
        b.map(|w| w.language_code),
    );
}

#[sqlx::test(migrations = "./migrations")]
async fn clearing_a_lease_requeues_the_pair(pool: SqlitePool) {
    let dest = seed(&pool, "Old Course", "St Andrews").await;

    WorkRepo::claim_next(&pool, Duration::minutes(15), None)
        .await
        .unwrap()
        .expect("claim");
    WorkRepo::clear_lease(&pool, dest.id, "en").await.unwrap();

    assert!(WorkRepo::lease_for(&pool, dest.id, "en")
        .await
        .unwrap()
        .is_none());
    assert!(WorkRepo::claim_next(&pool, Duration::minutes(15), None)
        .await
        .unwrap()
        .is_some());
}

// ---------------------------------------------------------------------------
// City guides
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn city_guide_upsert_aggregates_section_counts(pool: SqlitePool) {
    let dest = seed(&pool, "Old Course", "St Andrews").await;

    let content = CityGuideContent {
        title: "St Andrews Beyond the Links".into(),
        overview: "two words".into(),
        golf_summary: "one".into(),
        dining: json!({"seafood": {"description": "fresh catch daily"}}),
        ..Default::default()
    };

    let (guide, action) = CityGuideRepo::upsert(&pool, &dest, "en", &content)
        .await
        .expect("upsert");
    assert_eq!(action, GuideAction::Created);
    assert_eq!(guide.slug, "city-guide-st-andrews-fife-scotland");
    assert_eq!(guide.word_count, 2 + 1 + 3);
    assert!(guide.is_published);

    let fetched = CityGuideRepo::find(&pool, dest.id, "en")
        .await
        .unwrap()
        .expect("stored guide");
    assert_eq!(fetched.dining.0["seafood"]["description"], "fresh catch daily");

    let (_, action) = CityGuideRepo::upsert(&pool, &dest, "en", &content)
        .await
        .expect("second upsert");
    assert_eq!(action, GuideAction::Updated);
    assert_eq!(CityGuideRepo::count_all(&pool).await.unwrap(), 1);
}
