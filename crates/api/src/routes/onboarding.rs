//! Route definitions for role-based onboarding.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::onboarding;
use crate::state::AppState;

/// Routes mounted at `/onboarding`.
///
/// ```text
/// POST /                  -> submit_onboarding
/// GET  /tracks/{role}     -> get_track
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(onboarding::submit_onboarding))
        .route("/tracks/{role}", get(onboarding::get_track))
}
