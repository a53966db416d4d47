use async_trait::async_trait;
use gigfolio_core::types::DocId;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::StoreError;

/// A document returned by the store: its server-assigned id plus the
/// attribute payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub id: DocId,
    pub data: Value,
}

impl Document {
    /// Read a string attribute, returning `""` when absent or non-string.
    pub fn str_field(&self, name: &str) -> &str {
        self.data.get(name).and_then(Value::as_str).unwrap_or("")
    }
}

/// Create/read/update access to a collection-based document store.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Create a document with a server-generated id.
    async fn create(&self, collection: &str, data: Value) -> Result<Document, StoreError>;

    /// Patch an existing document. Only the attributes present in `data`
    /// are changed.
    async fn update(&self, collection: &str, id: &str, data: Value)
        -> Result<Document, StoreError>;

    /// Fetch a single document by id.
    async fn get(&self, collection: &str, id: &str) -> Result<Document, StoreError>;

    /// List every document in a collection.
    async fn list(&self, collection: &str) -> Result<Vec<Document>, StoreError>;
}
