use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;
use uuid::Uuid;

use crate::account::{Account, AccountSession, AccountStore};
use crate::blob::{BlobStore, StoredFile};
use crate::document::{Document, DocumentStore};
use crate::error::StoreError;

#[derive(Debug, Clone)]
struct MemoryAccount {
    id: String,
    email: String,
    password: String,
    name: String,
}

#[derive(Debug, Clone)]
struct MemoryFile {
    id: String,
    file_name: String,
    content_type: String,
    bytes: Vec<u8>,
}

#[derive(Debug, Default)]
struct Inner {
    collections: HashMap<String, Vec<Document>>,
    accounts: Vec<MemoryAccount>,
    files: HashMap<String, Vec<MemoryFile>>,
    failing_collections: HashSet<String>,
    fail_uploads: bool,
}

/// In-memory store used by tests. Mirrors the hosted store's observable
/// behavior: server-assigned ids, patch-style updates, 409 on duplicate
/// email, 401 on bad credentials. Writes to a collection registered via
/// [`MemoryStore::fail_on`] fail with a 503, which is how tests exercise
/// partial-failure paths.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent write to `collection` fail.
    pub fn fail_on(&self, collection: &str) {
        self.with_inner(|inner| {
            inner.failing_collections.insert(collection.to_owned());
        });
    }

    /// Make every subsequent blob upload fail.
    pub fn fail_uploads(&self) {
        self.with_inner(|inner| inner.fail_uploads = true);
    }

    /// Number of documents currently held in a collection.
    pub fn count(&self, collection: &str) -> usize {
        self.with_inner(|inner| {
            inner
                .collections
                .get(collection)
                .map(Vec::len)
                .unwrap_or(0)
        })
    }

    /// Snapshot of a collection's documents, in insertion order.
    pub fn documents(&self, collection: &str) -> Vec<Document> {
        self.with_inner(|inner| inner.collections.get(collection).cloned().unwrap_or_default())
    }

    /// Number of files uploaded to a bucket.
    pub fn file_count(&self, bucket: &str) -> usize {
        self.with_inner(|inner| inner.files.get(bucket).map(Vec::len).unwrap_or(0))
    }

    fn with_inner<T>(&self, f: impl FnOnce(&mut Inner) -> T) -> T {
        let mut inner = match self.inner.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        f(&mut inner)
    }

    fn check_writable(inner: &Inner, collection: &str) -> Result<(), StoreError> {
        if inner.failing_collections.contains(collection) {
            return Err(StoreError::Api {
                status: 503,
                message: format!("write to {collection} rejected"),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn create(&self, collection: &str, data: Value) -> Result<Document, StoreError> {
        self.with_inner(|inner| {
            Self::check_writable(inner, collection)?;
            let doc = Document {
                id: Uuid::new_v4().to_string(),
                data,
            };
            inner
                .collections
                .entry(collection.to_owned())
                .or_default()
                .push(doc.clone());
            Ok(doc)
        })
    }

    async fn update(
        &self,
        collection: &str,
        id: &str,
        data: Value,
    ) -> Result<Document, StoreError> {
        self.with_inner(|inner| {
            Self::check_writable(inner, collection)?;
            let doc = inner
                .collections
                .get_mut(collection)
                .and_then(|docs| docs.iter_mut().find(|doc| doc.id == id))
                .ok_or_else(|| StoreError::NotFound {
                    collection: collection.to_owned(),
                    id: id.to_owned(),
                })?;
            if let (Some(existing), Some(patch)) = (doc.data.as_object_mut(), data.as_object()) {
                for (key, value) in patch {
                    existing.insert(key.clone(), value.clone());
                }
            } else {
                doc.data = data;
            }
            Ok(doc.clone())
        })
    }

    async fn get(&self, collection: &str, id: &str) -> Result<Document, StoreError> {
        self.with_inner(|inner| {
            inner
                .collections
                .get(collection)
                .and_then(|docs| docs.iter().find(|doc| doc.id == id))
                .cloned()
                .ok_or_else(|| StoreError::NotFound {
                    collection: collection.to_owned(),
                    id: id.to_owned(),
                })
        })
    }

    async fn list(&self, collection: &str) -> Result<Vec<Document>, StoreError> {
        Ok(self.documents(collection))
    }
}

#[async_trait]
impl BlobStore for MemoryStore {
    async fn upload(
        &self,
        bucket: &str,
        file_name: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<StoredFile, StoreError> {
        self.with_inner(|inner| {
            if inner.fail_uploads {
                return Err(StoreError::Upload("upload rejected".into()));
            }
            let file = MemoryFile {
                id: Uuid::new_v4().to_string(),
                file_name: file_name.to_owned(),
                content_type: content_type.to_owned(),
                bytes,
            };
            let id = file.id.clone();
            inner.files.entry(bucket.to_owned()).or_default().push(file);
            Ok(StoredFile { id })
        })
    }
}

#[async_trait]
impl AccountStore for MemoryStore {
    async fn create_account(
        &self,
        email: &str,
        password: &str,
        name: &str,
    ) -> Result<Account, StoreError> {
        self.with_inner(|inner| {
            if inner
                .accounts
                .iter()
                .any(|account| account.email.eq_ignore_ascii_case(email))
            {
                return Err(StoreError::Api {
                    status: 409,
                    message: "A user with the same email already exists".into(),
                });
            }
            let account = MemoryAccount {
                id: Uuid::new_v4().to_string(),
                email: email.to_owned(),
                password: password.to_owned(),
                name: name.to_owned(),
            };
            let public = Account {
                id: account.id.clone(),
                email: account.email.clone(),
                name: account.name.clone(),
            };
            inner.accounts.push(account);
            Ok(public)
        })
    }

    async fn create_email_session(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AccountSession, StoreError> {
        self.with_inner(|inner| {
            let account = inner
                .accounts
                .iter()
                .find(|account| {
                    account.email.eq_ignore_ascii_case(email) && account.password == password
                })
                .ok_or_else(|| StoreError::Api {
                    status: 401,
                    message: "Invalid credentials".into(),
                })?;
            Ok(AccountSession {
                secret: Uuid::new_v4().to_string(),
                user_id: account.id.clone(),
                expires_at: (chrono::Utc::now() + chrono::Duration::days(30)).to_rfc3339(),
            })
        })
    }
}
