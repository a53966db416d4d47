use async_trait::async_trait;
use gigfolio_core::types::DocId;

use crate::error::StoreError;

/// A user account held by the hosted store.
#[derive(Debug, Clone)]
pub struct Account {
    pub id: DocId,
    pub email: String,
    pub name: String,
}

/// An email/password session issued by the hosted store.
///
/// The `secret` is the opaque token the store expects back on
/// authenticated calls; it is what the backend wraps into its own JWT.
#[derive(Debug, Clone)]
pub struct AccountSession {
    pub secret: String,
    pub user_id: DocId,
    /// RFC 3339 expiry reported by the store.
    pub expires_at: String,
}

/// Account management against the hosted store's auth service.
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Register a new account. Fails with `Api { status: 409, .. }` when
    /// the email is already taken.
    async fn create_account(
        &self,
        email: &str,
        password: &str,
        name: &str,
    ) -> Result<Account, StoreError>;

    /// Exchange email/password credentials for a session. Fails with
    /// `Api { status: 401, .. }` on bad credentials.
    async fn create_email_session(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AccountSession, StoreError>;
}
