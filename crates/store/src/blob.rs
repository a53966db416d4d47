use async_trait::async_trait;
use gigfolio_core::types::DocId;

use crate::error::StoreError;

/// Handle for an uploaded file.
#[derive(Debug, Clone)]
pub struct StoredFile {
    pub id: DocId,
}

/// Binary file storage, bucket-scoped.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Upload a file into a bucket, returning the server-assigned file id.
    async fn upload(
        &self,
        bucket: &str,
        file_name: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<StoredFile, StoreError>;
}
