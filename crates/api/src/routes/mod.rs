pub mod auth;
pub mod health;
pub mod onboarding;
pub mod profiles;
pub mod reports;

use axum::routing::get;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                 register (public)
/// /auth/login                    login (public)
/// /auth/logout                   logout (public)
/// /auth/session                  session introspection (public)
///
/// /profiles/submit               all-at-once wizard submission
/// /profiles/steps/{step}         per-step wizard submission
/// /profiles/{id}                 fetch parent profile
/// /creators                      completed-creator listing
///
/// /onboarding                    submit onboarding form
/// /onboarding/tracks/{role}      role track step labels
///
/// /reports                       file a creator report
///
/// /catalog                       wizard selection catalogs
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/profiles", profiles::router())
        .route("/creators", get(handlers::profiles::list_creators))
        .nest("/onboarding", onboarding::router())
        .nest("/reports", reports::router())
        .route("/catalog", get(handlers::catalog::get_catalog))
}
