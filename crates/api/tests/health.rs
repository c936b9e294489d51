mod common;

use axum::http::StatusCode;
use sqlx::SqlitePool;

#[sqlx::test(migrations = "../db/migrations")]
async fn health_reports_ok_and_db_status(pool: SqlitePool) {
    let app = common::build_test_app(pool);

    let response = common::get(&app, "/health").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = common::body_json(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["db_healthy"], true);
    assert!(body["version"].is_string());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn unknown_route_is_404(pool: SqlitePool) {
    let app = common::build_test_app(pool);

    let response = common::get(&app, "/api/nope/").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
