mod common;

use axum::http::StatusCode;
use serde_json::json;
use sqlx::SqlitePool;

#[sqlx::test(migrations = "../db/migrations")]
async fn short_query_gets_a_hint_not_an_error(pool: SqlitePool) {
    let app = common::build_test_app(pool);

    for path in ["/api/typeahead-search/", "/api/typeahead-search/?q=a"] {
        let response = common::get(&app, path).await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = common::body_json(response).await;
        assert_eq!(body["results"], json!([]));
        assert_eq!(body["message"], "Please enter at least 2 characters");
    }
}

#[sqlx::test(migrations = "../db/migrations")]
async fn destinations_without_guides_are_not_suggested(pool: SqlitePool) {
    common::seed_destination(&pool, "Old Course", "St Andrews").await;
    let app = common::build_test_app(pool);

    let body = common::body_json(common::get(&app, "/api/typeahead-search/?q=andrews").await).await;
    assert_eq!(body["results"], json!([]));
    assert_eq!(body["count"], 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn matching_destination_is_fully_described(pool: SqlitePool) {
    let dest = common::seed_destination(&pool, "Old Course", "St Andrews").await;
    let app = common::build_test_app(pool.clone());

    common::post_json(
        &app,
        "/api/submit-work/",
        json!({
            "destination_id": dest.id,
            "language_code": "en",
            "content": common::long_content(),
        }),
    )
    .await;

    // Case-insensitive, matches on city.
    let body = common::body_json(common::get(&app, "/api/typeahead-search/?q=ANDREWS").await).await;
    assert_eq!(body["count"], 1);

    let result = &body["results"][0];
    assert_eq!(result["id"], dest.id);
    assert_eq!(result["name"], "Old Course");
    assert_eq!(
        result["country_flag"],
        golfplex_core::flags::country_flag("Scotland")
    );
    assert_eq!(result["display_text"], "Old Course, St Andrews");
    assert_eq!(result["location_text"], "St Andrews, Fife, Scotland");
    assert_eq!(
        result["url"],
        "/golf-courses/golf-course-st-andrews-fife-scotland/"
    );
}

#[sqlx::test(migrations = "../db/migrations")]
async fn unknown_country_falls_back_to_globe_flag(pool: SqlitePool) {
    let dest = golfplex_db::repositories::DestinationRepo::insert(
        &pool,
        &golfplex_db::models::destination::CreateDestination {
            name: "Royal Atlantis".into(),
            city: "Atlantis".into(),
            region_or_state: "Deep".into(),
            country: "Atlantis".into(),
            description: "Underwater links".into(),
            latitude: 0.0,
            longitude: 0.0,
            image_url: None,
        },
    )
    .await
    .expect("insert destination");
    let app = common::build_test_app(pool);

    common::post_json(
        &app,
        "/api/submit-work/",
        json!({
            "destination_id": dest.id,
            "language_code": "en",
            "content": common::long_content(),
        }),
    )
    .await;

    let body = common::body_json(common::get(&app, "/api/typeahead-search/?q=atlantis").await).await;
    assert_eq!(
        body["results"][0]["country_flag"],
        golfplex_core::flags::DEFAULT_FLAG
    );
}
