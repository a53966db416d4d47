use gigfolio_core::types::DocId;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Transport-level failure (connection refused, timeout, TLS).
    #[error("Store transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The store answered with a non-success status.
    #[error("Store API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// A document lookup came back empty.
    #[error("Document not found: {collection}/{id}")]
    NotFound { collection: String, id: DocId },

    /// A blob upload failed.
    #[error("Upload failed: {0}")]
    Upload(String),

    /// The store answered 2xx but with an unexpected body.
    #[error("Unexpected store response: {0}")]
    Decode(String),
}

impl StoreError {
    /// Whether this error is an authentication/authorization rejection.
    pub fn is_auth(&self) -> bool {
        matches!(self, Self::Api { status, .. } if *status == 401 || *status == 403)
    }
}
