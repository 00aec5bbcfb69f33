//! Integration tests for the health check endpoint and store failures.

mod common;

use std::sync::Arc;

use async_trait::async_trait;
use axum::http::{Method, StatusCode};
use common::{body_json, build_test_app, build_test_app_with, get, send_raw, test_config};
use serde_json::json;
use worlds_core::types::DbId;
use worlds_core::world::{WorldPatch, WorldUpload};
use worlds_db::models::world::World;
use worlds_db::store::WorldStore;

/// A store whose backend is always unreachable.
struct UnreachableStore;

#[async_trait]
impl WorldStore for UnreachableStore {
    async fn list(&self) -> Result<Vec<World>, sqlx::Error> {
        Err(sqlx::Error::PoolTimedOut)
    }

    async fn find_by_id(&self, _id: DbId) -> Result<Option<World>, sqlx::Error> {
        Err(sqlx::Error::PoolTimedOut)
    }

    async fn create(&self, _input: &WorldUpload) -> Result<World, sqlx::Error> {
        Err(sqlx::Error::PoolTimedOut)
    }

    async fn update(&self, _id: DbId, _patch: &WorldPatch) -> Result<Option<World>, sqlx::Error> {
        Err(sqlx::Error::PoolTimedOut)
    }

    async fn delete(&self, _id: DbId) -> Result<bool, sqlx::Error> {
        Err(sqlx::Error::PoolTimedOut)
    }

    async fn record_download(&self, _id: DbId) -> Result<Option<String>, sqlx::Error> {
        Err(sqlx::Error::PoolTimedOut)
    }

    async fn record_report(&self, _id: DbId) -> Result<bool, sqlx::Error> {
        Err(sqlx::Error::PoolTimedOut)
    }

    async fn ping(&self) -> Result<(), sqlx::Error> {
        Err(sqlx::Error::PoolTimedOut)
    }
}

// ---------------------------------------------------------------------------
// Test: GET /health returns 200 with expected JSON fields
// ---------------------------------------------------------------------------

#[tokio::test]
async fn health_check_returns_ok_with_json() {
    let (app, _store) = build_test_app();
    let response = get(app, "/health").await;

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert!(json["version"].is_string());
    assert_eq!(json["db_healthy"], true);
}

#[tokio::test]
async fn health_check_reports_degraded_store() {
    let app = build_test_app_with(Arc::new(UnreachableStore), test_config());
    let json = body_json(get(app, "/health").await).await;

    assert_eq!(json["status"], "degraded");
    assert_eq!(json["db_healthy"], false);
}

// ---------------------------------------------------------------------------
// Test: store failures surface as a sanitized 500
// ---------------------------------------------------------------------------

#[tokio::test]
async fn store_failure_returns_500() {
    let app = build_test_app_with(Arc::new(UnreachableStore), test_config());

    let response = get(app.clone(), "/").await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_json(response).await, json!({"error": "internal server error"}));

    let response = get(app, "/?id=1").await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

// ---------------------------------------------------------------------------
// Test: middleware behaviour
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unknown_route_returns_404() {
    let (app, _store) = build_test_app();
    let response = get(app, "/this-route-does-not-exist").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn response_contains_x_request_id_header() {
    let (app, _store) = build_test_app();
    let response = get(app, "/health").await;

    let request_id = response
        .headers()
        .get("x-request-id")
        .expect("Response must contain an x-request-id header");

    // MakeRequestUuid produces hyphenated UUIDs.
    assert_eq!(request_id.to_str().unwrap().len(), 36);
}

#[tokio::test]
async fn oversized_body_is_rejected() {
    let mut config = test_config();
    config.body_limit_bytes = 64;
    let app = build_test_app_with(Arc::new(worlds_db::store::MemoryWorldStore::new()), config);

    let body = json!({"name": "Castle", "tbw": "x".repeat(256)}).to_string();
    let response = send_raw(app, Method::POST, "/", "application/json", body).await;

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    let json = body_json(response).await;
    let object = json.as_object().expect("error body is a JSON object");
    assert_eq!(object.len(), 1);
    assert!(object["error"].is_string());
}

#[tokio::test]
async fn oversized_multipart_body_is_rejected_as_json() {
    let mut config = test_config();
    config.body_limit_bytes = 64;
    let app = build_test_app_with(Arc::new(worlds_db::store::MemoryWorldStore::new()), config);

    let boundary = "worlds-test-boundary";
    let body = format!(
        "--{boundary}\r\n\
         Content-Disposition: form-data; name=\"tbw\"\r\n\r\n\
         {}\r\n\
         --{boundary}--\r\n",
        "x".repeat(256)
    );
    let response = send_raw(
        app,
        Method::POST,
        "/",
        &format!("multipart/form-data; boundary={boundary}"),
        body,
    )
    .await;

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    assert!(body_json(response).await["error"].is_string());
}
