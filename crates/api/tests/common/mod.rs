use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use gigfolio_api::config::ServerConfig;
use gigfolio_api::router::build_app_router;
use gigfolio_api::session::{generate_session_token, SessionConfig, LOCAL_SESSION_COOKIE};
use gigfolio_api::state::AppState;
use gigfolio_store::{Collections, MemoryStore, StoreConfig};

/// Build a test `ServerConfig` with safe defaults and a fixed session secret.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        session: SessionConfig {
            secret: "integration-test-secret-0123456789".to_string(),
            session_days: 30,
        },
    }
}

/// Store configuration with short, readable collection names.
pub fn test_store_config() -> StoreConfig {
    StoreConfig {
        endpoint: "http://store.test/v1".into(),
        project_id: "proj".into(),
        api_key: "key".into(),
        database_id: "db".into(),
        profile_picture_bucket: "pics".into(),
        collections: Collections {
            parent_profiles: "parents".into(),
            platform_preferences: "plat".into(),
            basic_info: "basic".into(),
            profile_pictures: "pic-records".into(),
            languages: "langs".into(),
            experience: "exp".into(),
            additional_skills: "skills".into(),
            education: "edu".into(),
            onboarding: "onboard".into(),
            reports: "reports".into(),
        },
    }
}

/// Build the full application router backed by an in-memory store.
///
/// This goes through [`build_app_router`] so integration tests exercise
/// the same middleware stack (CORS, request ID, timeout, tracing, panic
/// recovery) that production uses.
pub fn build_test_app(store: Arc<MemoryStore>) -> Router {
    let config = test_config();
    let state = AppState {
        documents: store.clone(),
        blobs: store.clone(),
        accounts: store,
        store_config: Arc::new(test_store_config()),
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

/// `Cookie` header value holding a valid session for `user_id`.
pub fn session_cookie_for(user_id: &str) -> String {
    let token = generate_session_token(user_id, &test_config().session)
        .expect("test token generation");
    format!("{LOCAL_SESSION_COOKIE}={token}")
}

/// Issue a GET request against the app.
pub async fn get(app: Router, uri: &str) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .uri(uri)
            .body(Body::empty())
            .expect("request build"),
    )
    .await
    .expect("request should not fail")
}

/// Issue an authenticated GET request against the app.
pub async fn get_authed(app: Router, uri: &str, user_id: &str) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .uri(uri)
            .header(header::COOKIE, session_cookie_for(user_id))
            .body(Body::empty())
            .expect("request build"),
    )
    .await
    .expect("request should not fail")
}

/// Issue an anonymous POST with a JSON body.
pub async fn post_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("request build"),
    )
    .await
    .expect("request should not fail")
}

/// Issue an authenticated POST with a JSON body.
pub async fn post_json_authed(
    app: Router,
    uri: &str,
    user_id: &str,
    body: Value,
) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::COOKIE, session_cookie_for(user_id))
            .body(Body::from(body.to_string()))
            .expect("request build"),
    )
    .await
    .expect("request should not fail")
}

/// Collect a response body as JSON.
pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body collect")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be JSON")
}

/// A fully-populated wizard form as a JSON request body.
pub fn complete_form_json() -> Value {
    serde_json::json!({
        "platformPreferences": {
            "platforms": ["youtube"],
            "customPlatform": "",
            "contentTypes": ["short_form"]
        },
        "basicInfo": {
            "firstName": "Ada",
            "lastName": "Lovelace",
            "description": "Video editor focused on short-form cuts."
        },
        "profilePicture": null,
        "languages": [
            { "language": "English", "proficiency": "native" },
            { "language": "French", "proficiency": "intermediate" }
        ],
        "experience": {
            "occupation": "Editor",
            "startDate": "2020-01-01",
            "endDate": null,
            "isCurrentlyWorking": true,
            "skills": ["editing", "color grading"],
            "timezone": "UTC"
        },
        "additionalSkills": [
            { "skillName": "Motion design", "proficiency": 4 },
            { "skillName": "Sound mixing", "proficiency": 3 }
        ],
        "education": {
            "profession": "Film production",
            "country": "France",
            "school": "State University",
            "educationLevel": "bachelor",
            "startDate": "2015-09-01",
            "endDate": "2018-06-01"
        }
    })
}
