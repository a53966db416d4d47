//! Route definitions for creator reports.

use axum::routing::post;
use axum::Router;

use crate::handlers::reports;
use crate::state::AppState;

/// Routes mounted at `/reports`.
///
/// ```text
/// POST /    -> submit_report
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", post(reports::submit_report))
}
