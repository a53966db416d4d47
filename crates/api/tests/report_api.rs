//! Integration tests for the creator report endpoint.

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use common::{body_json, post_json, post_json_authed};
use gigfolio_store::MemoryStore;
use serde_json::json;

fn report_body(details: &str) -> serde_json::Value {
    json!({
        "creatorId": "creator-9",
        "reason": "spam",
        "additionalDetails": details
    })
}

#[tokio::test]
async fn report_is_persisted_with_trimmed_details() {
    let store = Arc::new(MemoryStore::new());
    let app = common::build_test_app(store.clone());

    let response = post_json_authed(
        app,
        "/api/v1/reports",
        "user-1",
        report_body("  This profile keeps posting spam links.  "),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert!(json["data"]["id"].is_string());

    let doc = &store.documents("reports")[0];
    assert_eq!(doc.data["creatorId"], "creator-9");
    assert_eq!(doc.data["userId"], "user-1");
    assert_eq!(doc.data["reason"], "spam");
    assert_eq!(doc.data["details"], "This profile keeps posting spam links.");
    assert!(doc.data["reportedAt"].is_string());
}

#[tokio::test]
async fn short_details_are_rejected() {
    let store = Arc::new(MemoryStore::new());
    let app = common::build_test_app(store.clone());

    let response = post_json_authed(app, "/api/v1/reports", "user-1", report_body("too short")).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert!(json["fields"]["additionalDetails"].is_array());
    assert_eq!(store.count("reports"), 0);
}

#[tokio::test]
async fn unknown_reason_is_rejected() {
    let app = common::build_test_app(Arc::new(MemoryStore::new()));

    let response = post_json_authed(
        app,
        "/api/v1/reports",
        "user-1",
        json!({
            "creatorId": "creator-9",
            "reason": "because",
            "additionalDetails": "A perfectly long explanation here."
        }),
    )
    .await;
    // Unknown enum tags fail deserialization.
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn reporting_requires_a_session() {
    let app = common::build_test_app(Arc::new(MemoryStore::new()));

    let response = post_json(
        app,
        "/api/v1/reports",
        report_body("This profile keeps posting spam links."),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
