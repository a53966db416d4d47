//! Integration tests for the role-based onboarding endpoints.

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use common::{body_json, get, post_json_authed};
use gigfolio_store::MemoryStore;
use serde_json::json;

// ---------------------------------------------------------------------------
// Submission
// ---------------------------------------------------------------------------

#[tokio::test]
async fn freelancer_onboarding_is_persisted() {
    let store = Arc::new(MemoryStore::new());
    let app = common::build_test_app(store.clone());

    let response = post_json_authed(
        app,
        "/api/v1/onboarding",
        "user-1",
        json!({
            "role": "freelancer",
            "employmentType": "full_time",
            "freelanceType": "video_editing"
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert_eq!(json["data"]["role"], "freelancer");

    let doc = &store.documents("onboard")[0];
    assert_eq!(doc.data["userId"], "user-1");
    assert_eq!(doc.data["employmentType"], "full_time");
    assert_eq!(doc.data["freelanceType"], "video_editing");
}

#[tokio::test]
async fn client_onboarding_requires_company_size_and_purpose() {
    let store = Arc::new(MemoryStore::new());
    let app = common::build_test_app(store.clone());

    let response = post_json_authed(
        app,
        "/api/v1/onboarding",
        "user-1",
        json!({ "role": "client", "employmentType": "company" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert!(json["fields"]["companySize"].is_array());
    assert!(json["fields"]["purpose"].is_array());
    assert_eq!(store.count("onboard"), 0);
}

#[tokio::test]
async fn onboarding_requires_a_session() {
    let app = common::build_test_app(Arc::new(MemoryStore::new()));

    let response = common::post_json(
        app,
        "/api/v1/onboarding",
        json!({ "role": "client", "employmentType": "company" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// ---------------------------------------------------------------------------
// Tracks
// ---------------------------------------------------------------------------

#[tokio::test]
async fn tracks_differ_per_role() {
    let store = Arc::new(MemoryStore::new());

    let freelancer = get(
        common::build_test_app(store.clone()),
        "/api/v1/onboarding/tracks/freelancer",
    )
    .await;
    let freelancer = body_json(freelancer).await;
    assert_eq!(freelancer["data"]["steps"].as_array().unwrap().len(), 4);

    let client = get(
        common::build_test_app(store),
        "/api/v1/onboarding/tracks/client",
    )
    .await;
    let client = body_json(client).await;
    assert_eq!(client["data"]["steps"].as_array().unwrap().len(), 4);
    assert_ne!(freelancer["data"]["steps"], client["data"]["steps"]);
}

#[tokio::test]
async fn unknown_role_is_rejected() {
    let app = common::build_test_app(Arc::new(MemoryStore::new()));

    let response = get(app, "/api/v1/onboarding/tracks/astronaut").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
