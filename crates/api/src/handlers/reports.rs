//! Creator report endpoints.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;
use validator::Validate;

use gigfolio_core::report::NewReport;
use gigfolio_core::types::DocId;

use crate::error::AppResult;
use crate::middleware::session::SessionUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Payload returned after a report submission.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportRecord {
    pub id: DocId,
}

/// POST /reports -- file a report against a creator.
pub async fn submit_report(
    State(state): State<AppState>,
    user: SessionUser,
    Json(report): Json<NewReport>,
) -> AppResult<impl IntoResponse> {
    report.validate()?;

    let doc = state
        .documents
        .create(
            &state.store_config.collections.reports,
            report.to_document(&user.user_id),
        )
        .await?;

    tracing::info!(
        report_id = %doc.id,
        creator_id = %report.creator_id,
        reason = report.reason.as_str(),
        "Creator report filed"
    );

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: ReportRecord { id: doc.id },
        }),
    ))
}
