//! Session token generation/verification and session cookie helpers.
//!
//! Two cookies make up a login: `appSession` carries the hosted store's
//! opaque session secret, `localSession` carries an HS256-signed JWT with
//! the user id. The backend only ever verifies `localSession`; the store
//! secret is passed through untouched. Verification failures are silent,
//! a bad or expired token simply resolves to no session.

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use gigfolio_core::types::DocId;

/// Cookie holding the hosted store's opaque session secret.
pub const APP_SESSION_COOKIE: &str = "appSession";
/// Cookie holding the backend-signed session JWT.
pub const LOCAL_SESSION_COOKIE: &str = "localSession";

/// JWT claims embedded in the `localSession` token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SessionClaims {
    /// Subject -- the user's account id at the hosted store.
    pub sub: DocId,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
}

/// Configuration for session token generation and validation.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// HMAC-SHA256 secret used to sign and verify session tokens.
    pub secret: String,
    /// Session lifetime in days (default: 30).
    pub session_days: i64,
}

const DEFAULT_SESSION_DAYS: i64 = 30;

impl SessionConfig {
    /// Load session configuration from environment variables.
    ///
    /// | Env Var          | Required | Default |
    /// |------------------|----------|---------|
    /// | `SESSION_SECRET` | **yes**  | --      |
    /// | `SESSION_DAYS`   | no       | `30`    |
    ///
    /// # Panics
    ///
    /// Panics if `SESSION_SECRET` is not set or is empty.
    pub fn from_env() -> Self {
        let secret =
            std::env::var("SESSION_SECRET").expect("SESSION_SECRET must be set in the environment");
        assert!(!secret.is_empty(), "SESSION_SECRET must not be empty");

        let session_days: i64 = std::env::var("SESSION_DAYS")
            .unwrap_or_else(|_| DEFAULT_SESSION_DAYS.to_string())
            .parse()
            .expect("SESSION_DAYS must be a valid i64");

        Self {
            secret,
            session_days,
        }
    }
}

/// Generate an HS256 session token for the given user.
pub fn generate_session_token(
    user_id: &str,
    config: &SessionConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now().timestamp();
    let claims = SessionClaims {
        sub: user_id.to_owned(),
        exp: now + config.session_days * 24 * 60 * 60,
        iat: now,
    };
    encode(
        &Header::default(), // HS256
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Verify a session token, returning its claims.
///
/// Returns `None` on any failure (bad signature, malformed token,
/// expired). Callers treat that as "not logged in" rather than an error.
pub fn verify_session_token(token: &str, config: &SessionConfig) -> Option<SessionClaims> {
    decode::<SessionClaims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &Validation::default(), // HS256, validates exp
    )
    .ok()
    .map(|data| data.claims)
}

/// Build a `Set-Cookie` header value for a session cookie.
///
/// All session cookies are `HttpOnly; Secure; SameSite=Strict; Path=/`.
pub fn session_cookie(name: &str, value: &str, max_age_secs: i64) -> String {
    format!("{name}={value}; Max-Age={max_age_secs}; Path=/; HttpOnly; Secure; SameSite=Strict")
}

/// Build a `Set-Cookie` header value that expires a session cookie.
pub fn expired_cookie(name: &str) -> String {
    session_cookie(name, "", 0)
}

/// Extract a named cookie's value from a raw `Cookie` request header.
pub fn cookie_value<'a>(header: &'a str, name: &str) -> Option<&'a str> {
    header.split(';').find_map(|pair| {
        let (key, value) = pair.trim().split_once('=')?;
        (key == name).then_some(value)
    })
}
