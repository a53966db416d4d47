//! Cookie-based session extractors and the refresh layer.

use axum::extract::{FromRequestParts, OptionalFromRequestParts, Request, State};
use axum::http::header::{HeaderMap, COOKIE, SET_COOKIE};
use axum::http::request::Parts;
use axum::http::HeaderValue;
use axum::middleware::Next;
use axum::response::Response;

use gigfolio_core::error::CoreError;
use gigfolio_core::types::DocId;

use crate::error::AppError;
use crate::session::{
    cookie_value, session_cookie, verify_session_token, APP_SESSION_COOKIE, LOCAL_SESSION_COOKIE,
};
use crate::state::AppState;

/// Authenticated user resolved from the `localSession` cookie.
///
/// Use this as an extractor parameter in any handler that requires a
/// logged-in user:
///
/// ```ignore
/// async fn my_handler(user: SessionUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = %user.user_id, "handling request");
///     Ok(Json(()))
/// }
/// ```
///
/// As `Option<SessionUser>` it resolves to `None` for anonymous or
/// expired sessions instead of rejecting the request.
#[derive(Debug, Clone)]
pub struct SessionUser {
    /// The user's account id at the hosted store (from `claims.sub`).
    pub user_id: DocId,
    /// Token expiry (UTC Unix timestamp), carried so a re-issued cookie
    /// keeps the original expiry.
    pub expires_at: i64,
}

fn session_from_headers(headers: &HeaderMap, state: &AppState) -> Option<SessionUser> {
    let header = headers.get(COOKIE)?.to_str().ok()?;
    let token = cookie_value(header, LOCAL_SESSION_COOKIE)?;
    let claims = verify_session_token(token, &state.config.session)?;
    Some(SessionUser {
        user_id: claims.sub,
        expires_at: claims.exp,
    })
}

impl FromRequestParts<AppState> for SessionUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        session_from_headers(&parts.headers, state)
            .ok_or_else(|| AppError::Core(CoreError::Unauthorized("No active session".into())))
    }
}

impl OptionalFromRequestParts<AppState> for SessionUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Option<Self>, Self::Rejection> {
        Ok(session_from_headers(&parts.headers, state))
    }
}

/// Middleware that re-issues the session cookies on every authenticated
/// request, preserving the token's original expiry. Keeps browser
/// cookies alive for the token's remaining lifetime without sliding the
/// expiration forward.
pub async fn refresh_session(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let refreshed = session_from_headers(request.headers(), &state).and_then(|user| {
        let remaining = user.expires_at - chrono::Utc::now().timestamp();
        if remaining <= 0 {
            return None;
        }
        let header = request.headers().get(COOKIE)?.to_str().ok()?;
        let local = cookie_value(header, LOCAL_SESSION_COOKIE)?.to_owned();
        let app = cookie_value(header, APP_SESSION_COOKIE).map(str::to_owned);
        Some((local, app, remaining))
    });

    let mut response = next.run(request).await;

    if let Some((local, app, remaining)) = refreshed {
        let mut cookies = vec![session_cookie(LOCAL_SESSION_COOKIE, &local, remaining)];
        if let Some(app) = app {
            cookies.push(session_cookie(APP_SESSION_COOKIE, &app, remaining));
        }
        for cookie in cookies {
            if let Ok(value) = HeaderValue::from_str(&cookie) {
                response.headers_mut().append(SET_COOKIE, value);
            }
        }
    }

    response
}
