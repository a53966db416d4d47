//! Role-based onboarding endpoints (freelancer/client tracks).

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;
use validator::Validate;

use gigfolio_core::onboarding::{OnboardingForm, Role};
use gigfolio_core::types::DocId;

use crate::error::AppResult;
use crate::middleware::session::SessionUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Payload returned after an onboarding submission.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingRecord {
    pub id: DocId,
    pub role: &'static str,
}

/// The step labels making up one role's onboarding track.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingTrack {
    pub role: &'static str,
    pub steps: Vec<&'static str>,
}

/// POST /onboarding -- persist a completed onboarding form.
pub async fn submit_onboarding(
    State(state): State<AppState>,
    user: SessionUser,
    Json(form): Json<OnboardingForm>,
) -> AppResult<impl IntoResponse> {
    form.validate()?;

    let doc = state
        .documents
        .create(
            &state.store_config.collections.onboarding,
            form.to_document(&user.user_id),
        )
        .await?;

    tracing::info!(
        user_id = %user.user_id,
        role = form.role.as_str(),
        onboarding_id = %doc.id,
        "Onboarding submitted"
    );

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: OnboardingRecord {
                id: doc.id,
                role: form.role.as_str(),
            },
        }),
    ))
}

/// GET /onboarding/tracks/{role} -- the step labels for a role's track.
pub async fn get_track(Path(role): Path<String>) -> AppResult<impl IntoResponse> {
    let role = Role::from_str_db(&role)?;
    Ok(Json(DataResponse {
        data: OnboardingTrack {
            role: role.as_str(),
            steps: role.track().to_vec(),
        },
    }))
}
