//! Shared helpers for API integration tests.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use golfplex_api::config::ServerConfig;
use golfplex_api::router::build_app_router;
use golfplex_api::state::AppState;
use golfplex_db::models::destination::{CreateDestination, Destination};
use golfplex_db::repositories::DestinationRepo;
use golfplex_db::DbPool;

/// Build the application router the way `main.rs` does, against a test pool.
pub fn build_test_app(pool: DbPool) -> Router {
    let config = ServerConfig {
        host: "127.0.0.1".into(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".into()],
        request_timeout_secs: 30,
        work_lease_secs: 900,
    };
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

pub async fn get(app: &Router, path: &str) -> Response {
    app.clone()
        .oneshot(
            Request::builder()
                .uri(path)
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response")
}

pub async fn post_json(app: &Router, path: &str, body: Value) -> Response {
    app.clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(path)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .expect("request"),
        )
        .await
        .expect("response")
}

pub async fn body_json(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    serde_json::from_slice(&bytes).expect("json body")
}

/// Assert the standard error envelope and return its message.
pub async fn assert_error(response: Response, status: StatusCode, code: &str) -> String {
    assert_eq!(response.status(), status);
    let body = body_json(response).await;
    assert_eq!(body["status"], "error");
    assert_eq!(body["code"], code);
    body["message"].as_str().expect("message").to_string()
}

/// Insert a destination with recognizable defaults.
pub async fn seed_destination(pool: &DbPool, name: &str, city: &str) -> Destination {
    DestinationRepo::insert(
        pool,
        &CreateDestination {
            name: name.into(),
            city: city.into(),
            region_or_state: "Fife".into(),
            country: "Scotland".into(),
            description: "Links golf by the sea".into(),
            latitude: 56.34,
            longitude: -2.8,
            image_url: None,
        },
    )
    .await
    .expect("insert destination")
}

/// Guide content comfortably above the 1000-character minimum.
pub fn long_content() -> String {
    "The fairways run hard and fast along the dunes. ".repeat(40)
}
