//! Route definitions for the profile wizard. All endpoints require a session.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::profiles;
use crate::state::AppState;

/// Routes mounted at `/profiles`.
///
/// ```text
/// POST /submit          -> submit_complete
/// POST /steps/{step}    -> submit_step
/// GET  /{id}            -> get_profile
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/submit", post(profiles::submit_complete))
        .route("/steps/{step}", post(profiles::submit_step))
        .route("/{id}", get(profiles::get_profile))
}
