//! Client for the hosted document/blob/account store.
//!
//! The API crate only sees the [`DocumentStore`], [`BlobStore`] and
//! [`AccountStore`] traits; production wires in the HTTP implementation,
//! tests swap in the in-memory one (which can inject write failures).

pub mod account;
pub mod blob;
pub mod config;
pub mod document;
pub mod error;
pub mod http;
pub mod memory;

pub use account::{Account, AccountSession, AccountStore};
pub use blob::{BlobStore, StoredFile};
pub use config::{Collections, StoreConfig};
pub use document::{Document, DocumentStore};
pub use error::StoreError;
pub use http::HttpStore;
pub use memory::MemoryStore;
