//! Profile wizard submission endpoints and creator listing.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use gigfolio_core::profile::{
    LanguageEntry, PictureUpload, ProfileForm, ProfileStatus, ProfileStep, SkillEntry, StepData,
};
use gigfolio_core::types::DocId;

use crate::error::{AppError, AppResult};
use crate::middleware::session::SessionUser;
use crate::response::DataResponse;
use crate::state::AppState;
use crate::submission::Submitter;

// ---------------------------------------------------------------------------
// Request/response shapes
// ---------------------------------------------------------------------------

/// Body of an all-at-once submission: the full form, optionally
/// attached to an already-created parent profile.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitRequest {
    #[serde(default)]
    pub parent_profile_id: Option<DocId>,
    #[serde(flatten)]
    pub form: ProfileForm,
}

/// Body of a per-step submission.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepRequest {
    /// Parent profile to attach to; omitted on the first step.
    #[serde(default)]
    pub profile_id: Option<DocId>,
    /// The step's payload, shaped per step number.
    pub payload: Value,
}

/// A creator entry in the public listing.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatorSummary {
    pub profile_id: DocId,
    pub first_name: String,
    pub last_name: String,
    pub description: String,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Deserialize a step's payload into its typed slice.
fn step_data_from_payload(step: ProfileStep, payload: Value) -> AppResult<StepData> {
    let bad = |err: serde_json::Error| AppError::BadRequest(format!("Malformed payload: {err}"));
    let data = match step {
        ProfileStep::Platforms => StepData::Platforms(serde_json::from_value(payload).map_err(bad)?),
        ProfileStep::BasicInfo => StepData::BasicInfo(serde_json::from_value(payload).map_err(bad)?),
        ProfileStep::ProfilePicture => {
            let upload: Option<PictureUpload> = if payload.is_null() {
                None
            } else {
                Some(serde_json::from_value(payload).map_err(bad)?)
            };
            StepData::Picture(upload)
        }
        ProfileStep::Languages => {
            let entries: Vec<LanguageEntry> = serde_json::from_value(payload).map_err(bad)?;
            StepData::Languages(entries)
        }
        ProfileStep::Experience => StepData::Experience(serde_json::from_value(payload).map_err(bad)?),
        ProfileStep::AdditionalSkills => {
            let entries: Vec<SkillEntry> = serde_json::from_value(payload).map_err(bad)?;
            StepData::Skills(entries)
        }
        ProfileStep::Education => StepData::Education(serde_json::from_value(payload).map_err(bad)?),
    };
    Ok(data)
}

// ---------------------------------------------------------------------------
// POST /profiles/submit
// ---------------------------------------------------------------------------

/// Submit a complete wizard form in one request.
///
/// Validation failures are rejected with 400 before anything is written.
/// Store failures mid-run are reported in the outcome body, not as an
/// HTTP error: the submission partially happened and the client needs
/// the per-step detail to recover.
pub async fn submit_complete(
    State(state): State<AppState>,
    user: SessionUser,
    Json(request): Json<SubmitRequest>,
) -> AppResult<impl IntoResponse> {
    request.form.validate_complete()?;

    let outcome = Submitter::for_state(&state)
        .submit_complete(&user.user_id, &request.form, request.parent_profile_id)
        .await?;

    Ok(Json(DataResponse { data: outcome }))
}

// ---------------------------------------------------------------------------
// POST /profiles/steps/{step}
// ---------------------------------------------------------------------------

/// Submit one wizard step, creating the parent profile on first use.
pub async fn submit_step(
    State(state): State<AppState>,
    user: SessionUser,
    Path(step): Path<u8>,
    Json(request): Json<StepRequest>,
) -> AppResult<impl IntoResponse> {
    let step = ProfileStep::from_number(step)?;
    let data = step_data_from_payload(step, request.payload)?;
    data.validate()?;

    let submission = Submitter::for_state(&state)
        .submit_step(&user.user_id, request.profile_id, &data)
        .await?;

    Ok(Json(DataResponse { data: submission }))
}

// ---------------------------------------------------------------------------
// GET /profiles/{id}
// ---------------------------------------------------------------------------

/// Fetch a parent profile document.
pub async fn get_profile(
    State(state): State<AppState>,
    _user: SessionUser,
    Path(id): Path<DocId>,
) -> AppResult<impl IntoResponse> {
    let doc = state
        .documents
        .get(&state.store_config.collections.parent_profiles, &id)
        .await?;
    Ok(Json(DataResponse { data: doc }))
}

// ---------------------------------------------------------------------------
// GET /creators
// ---------------------------------------------------------------------------

/// List completed creator profiles.
pub async fn list_creators(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let docs = state
        .documents
        .list(&state.store_config.collections.parent_profiles)
        .await?;

    let creators: Vec<CreatorSummary> = docs
        .iter()
        .filter(|doc| doc.str_field("profileStatus") == ProfileStatus::Completed.as_str())
        .map(|doc| CreatorSummary {
            profile_id: doc.id.clone(),
            first_name: doc.str_field("firstName").to_owned(),
            last_name: doc.str_field("lastName").to_owned(),
            description: doc.str_field("description").to_owned(),
        })
        .collect();

    Ok(Json(DataResponse { data: creators }))
}
