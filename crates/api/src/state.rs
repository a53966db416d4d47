use std::sync::Arc;

use gigfolio_store::{AccountStore, BlobStore, DocumentStore, StoreConfig};

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Document CRUD against the hosted store.
    pub documents: Arc<dyn DocumentStore>,
    /// File storage against the hosted store.
    pub blobs: Arc<dyn BlobStore>,
    /// Account/session management against the hosted store.
    pub accounts: Arc<dyn AccountStore>,
    /// Store endpoint/collection configuration.
    pub store_config: Arc<StoreConfig>,
    /// Server configuration (accessed by middleware and handlers).
    pub config: Arc<ServerConfig>,
}
