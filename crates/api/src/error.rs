use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::{json, Map, Value};
use validator::ValidationErrors;

use gigfolio_core::error::CoreError;
use gigfolio_store::StoreError;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and [`StoreError`] for hosted
/// store failures, and adds HTTP-specific variants. Implements
/// [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `gigfolio_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Input failed validation; carries the per-field error map.
    #[error("Validation failed")]
    Validation(#[from] ValidationErrors),

    /// An error from the hosted document/blob/account store.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message, fields) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} with id {id} not found"),
                    None,
                ),
                CoreError::Validation(msg) => (
                    StatusCode::BAD_REQUEST,
                    "VALIDATION_ERROR",
                    msg.clone(),
                    None,
                ),
                CoreError::Unauthorized(msg) => {
                    (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone(), None)
                }
                CoreError::Forbidden(msg) => {
                    (StatusCode::FORBIDDEN, "FORBIDDEN", msg.clone(), None)
                }
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "INTERNAL_ERROR",
                        "An internal error occurred".to_string(),
                        None,
                    )
                }
            },

            // --- Validation errors ---
            AppError::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
                "Validation failed".to_string(),
                Some(validation_field_map(errors)),
            ),

            // --- Store errors ---
            AppError::Store(err) => classify_store_error(err),

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone(), None)
            }
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                    None,
                )
            }
        };

        let mut body = json!({
            "error": message,
            "code": code,
        });
        if let (Some(map), Some(fields)) = (body.as_object_mut(), fields) {
            map.insert("fields".into(), fields);
        }

        (status, axum::Json(body)).into_response()
    }
}

/// Classify a store error into an HTTP status, error code, and message.
///
/// - `NotFound` maps to 404.
/// - API 401/403 (bad server key, revoked session) and 409 keep their status.
/// - Everything else maps to 502: the store, not this service, failed.
fn classify_store_error(err: &StoreError) -> (StatusCode, &'static str, String, Option<Value>) {
    match err {
        StoreError::NotFound { .. } => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
            None,
        ),
        StoreError::Api { status: 401, .. } => (
            StatusCode::UNAUTHORIZED,
            "UNAUTHORIZED",
            "Invalid credentials".to_string(),
            None,
        ),
        StoreError::Api { status: 403, .. } => (
            StatusCode::FORBIDDEN,
            "FORBIDDEN",
            "Access denied".to_string(),
            None,
        ),
        StoreError::Api {
            status: 409,
            message,
        } => (StatusCode::CONFLICT, "CONFLICT", message.clone(), None),
        other => {
            tracing::error!(error = %other, "Store error");
            (
                StatusCode::BAD_GATEWAY,
                "STORE_ERROR",
                "The backing store is unavailable".to_string(),
                None,
            )
        }
    }
}

/// Flatten [`ValidationErrors`] into a `{ field: [messages] }` JSON map.
///
/// Uses each error's message when set, falling back to its code.
pub fn validation_field_map(errors: &ValidationErrors) -> Value {
    let mut map = Map::new();
    for (field, field_errors) in errors.field_errors() {
        let messages: Vec<Value> = field_errors
            .iter()
            .map(|err| {
                let text = err
                    .message
                    .as_ref()
                    .map(|msg| msg.to_string())
                    .unwrap_or_else(|| err.code.to_string());
                Value::String(text)
            })
            .collect();
        map.insert(field.to_string(), Value::Array(messages));
    }
    Value::Object(map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::ValidationError;

    #[test]
    fn field_map_prefers_message_over_code() {
        let mut errors = ValidationErrors::new();
        errors.add(
            "platforms",
            ValidationError::new("required").with_message("Select at least one platform".into()),
        );
        errors.add("contentTypes", ValidationError::new("required"));

        let map = validation_field_map(&errors);
        assert_eq!(map["platforms"][0], "Select at least one platform");
        assert_eq!(map["contentTypes"][0], "required");
    }
}
