//! Registration, login, logout and session introspection.
//!
//! Credentials are checked by the hosted account service; this service
//! only validates inputs and manages the two session cookies
//! (`appSession`, `localSession`).

use axum::extract::State;
use axum::http::header::SET_COOKIE;
use axum::http::StatusCode;
use axum::response::{AppendHeaders, IntoResponse};
use axum::Json;
use serde::Serialize;
use validator::Validate;

use gigfolio_core::account::{LoginInput, RegisterInput};
use gigfolio_core::types::DocId;

use crate::error::AppResult;
use crate::middleware::session::SessionUser;
use crate::response::DataResponse;
use crate::session::{
    expired_cookie, generate_session_token, session_cookie, APP_SESSION_COOKIE,
    LOCAL_SESSION_COOKIE,
};
use crate::state::AppState;

/// Payload returned after registration or login.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionInfo {
    pub user_id: DocId,
}

/// Payload returned by session introspection.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionStatus {
    pub logged_in: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<DocId>,
}

/// Build the two `Set-Cookie` values that establish a login.
fn login_cookies(
    state: &AppState,
    user_id: &str,
    store_secret: &str,
) -> AppResult<[(axum::http::HeaderName, String); 2]> {
    let token = generate_session_token(user_id, &state.config.session)
        .map_err(|err| crate::error::AppError::InternalError(err.to_string()))?;
    let max_age = state.config.session.session_days * 24 * 60 * 60;
    Ok([
        (
            SET_COOKIE,
            session_cookie(LOCAL_SESSION_COOKIE, &token, max_age),
        ),
        (
            SET_COOKIE,
            session_cookie(APP_SESSION_COOKIE, store_secret, max_age),
        ),
    ])
}

/// POST /auth/register -- create an account and log it in.
pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<RegisterInput>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;

    let email = input.email.trim();
    let account = state
        .accounts
        .create_account(email, &input.password, input.derived_name())
        .await?;
    let session = state
        .accounts
        .create_email_session(email, &input.password)
        .await?;

    tracing::info!(user_id = %account.id, "Account registered");

    let cookies = login_cookies(&state, &session.user_id, &session.secret)?;
    Ok((
        StatusCode::CREATED,
        AppendHeaders(cookies),
        Json(DataResponse {
            data: SessionInfo {
                user_id: session.user_id,
            },
        }),
    ))
}

/// POST /auth/login -- exchange credentials for session cookies.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginInput>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;

    let session = state
        .accounts
        .create_email_session(input.email.trim(), &input.password)
        .await?;

    tracing::info!(user_id = %session.user_id, "User logged in");

    let cookies = login_cookies(&state, &session.user_id, &session.secret)?;
    Ok((
        AppendHeaders(cookies),
        Json(DataResponse {
            data: SessionInfo {
                user_id: session.user_id,
            },
        }),
    ))
}

/// POST /auth/logout -- expire both session cookies.
///
/// Always succeeds, logged in or not.
pub async fn logout() -> impl IntoResponse {
    (
        AppendHeaders([
            (SET_COOKIE, expired_cookie(LOCAL_SESSION_COOKIE)),
            (SET_COOKIE, expired_cookie(APP_SESSION_COOKIE)),
        ]),
        Json(DataResponse { data: "logged_out" }),
    )
}

/// GET /auth/session -- report whether the caller has a valid session.
pub async fn session_status(user: Option<SessionUser>) -> Json<DataResponse<SessionStatus>> {
    Json(DataResponse {
        data: SessionStatus {
            logged_in: user.is_some(),
            user_id: user.map(|u| u.user_id),
        },
    })
}
