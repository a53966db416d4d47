use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde_json::{json, Value};

use crate::account::{Account, AccountSession, AccountStore};
use crate::blob::{BlobStore, StoredFile};
use crate::config::StoreConfig;
use crate::document::{Document, DocumentStore};
use crate::error::StoreError;

/// REST client for the hosted document/blob/account store.
///
/// Documents live under `/databases/{db}/collections/{coll}/documents`,
/// files under `/storage/buckets/{bucket}/files`, accounts under
/// `/account` and `/users`. Every request carries the project id and
/// server API key as headers. Failed writes are surfaced as-is; callers
/// decide whether to retry.
#[derive(Clone)]
pub struct HttpStore {
    client: Client,
    config: StoreConfig,
}

impl HttpStore {
    pub fn new(config: StoreConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    fn documents_url(&self, collection: &str) -> String {
        format!(
            "{}/databases/{}/collections/{}/documents",
            self.config.endpoint, self.config.database_id, collection
        )
    }

    fn document_url(&self, collection: &str, id: &str) -> String {
        format!("{}/{}", self.documents_url(collection), id)
    }

    fn authed(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .header("X-Store-Project", &self.config.project_id)
            .header("X-Store-Key", &self.config.api_key)
    }

    /// Turn a response into JSON, mapping non-2xx statuses to
    /// `StoreError::Api` with the store's message when one is present.
    async fn json_body(response: Response) -> Result<Value, StoreError> {
        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<Value>()
                .await
                .ok()
                .and_then(|body| {
                    body.get("message")
                        .and_then(Value::as_str)
                        .map(str::to_owned)
                })
                .unwrap_or_else(|| status.to_string());
            return Err(StoreError::Api {
                status: status.as_u16(),
                message,
            });
        }
        response.json::<Value>().await.map_err(StoreError::from)
    }

    /// Split a store document body (`$id` plus attributes) into id and data.
    fn parse_document(mut body: Value) -> Result<Document, StoreError> {
        let id = body
            .get("$id")
            .and_then(Value::as_str)
            .map(str::to_owned)
            .ok_or_else(|| StoreError::Decode("document body missing $id".into()))?;
        if let Some(map) = body.as_object_mut() {
            map.retain(|key, _| !key.starts_with('$'));
        }
        Ok(Document { id, data: body })
    }
}

#[async_trait]
impl DocumentStore for HttpStore {
    async fn create(&self, collection: &str, data: Value) -> Result<Document, StoreError> {
        tracing::debug!(collection, "Creating document");
        let response = self
            .authed(self.client.post(self.documents_url(collection)))
            .json(&json!({ "documentId": "unique()", "data": data }))
            .send()
            .await?;
        Self::parse_document(Self::json_body(response).await?)
    }

    async fn update(
        &self,
        collection: &str,
        id: &str,
        data: Value,
    ) -> Result<Document, StoreError> {
        let response = self
            .authed(self.client.patch(self.document_url(collection, id)))
            .json(&json!({ "data": data }))
            .send()
            .await?;
        Self::parse_document(Self::json_body(response).await?)
    }

    async fn get(&self, collection: &str, id: &str) -> Result<Document, StoreError> {
        let response = self
            .authed(self.client.get(self.document_url(collection, id)))
            .send()
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(StoreError::NotFound {
                collection: collection.to_owned(),
                id: id.to_owned(),
            });
        }
        Self::parse_document(Self::json_body(response).await?)
    }

    async fn list(&self, collection: &str) -> Result<Vec<Document>, StoreError> {
        let response = self
            .authed(self.client.get(self.documents_url(collection)))
            .send()
            .await?;
        let body = Self::json_body(response).await?;
        body.get("documents")
            .and_then(Value::as_array)
            .ok_or_else(|| StoreError::Decode("list body missing documents array".into()))?
            .iter()
            .cloned()
            .map(Self::parse_document)
            .collect()
    }
}

#[async_trait]
impl BlobStore for HttpStore {
    async fn upload(
        &self,
        bucket: &str,
        file_name: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<StoredFile, StoreError> {
        tracing::debug!(bucket, file_name, "Uploading file");
        let part = reqwest::multipart::Part::bytes(bytes)
            .file_name(file_name.to_owned())
            .mime_str(content_type)
            .map_err(|err| StoreError::Upload(err.to_string()))?;
        let form = reqwest::multipart::Form::new()
            .text("fileId", "unique()")
            .part("file", part);

        let url = format!("{}/storage/buckets/{}/files", self.config.endpoint, bucket);
        let response = self
            .authed(self.client.post(url))
            .multipart(form)
            .send()
            .await?;
        let body = Self::json_body(response).await?;
        let id = body
            .get("$id")
            .and_then(Value::as_str)
            .map(str::to_owned)
            .ok_or_else(|| StoreError::Decode("upload body missing $id".into()))?;
        Ok(StoredFile { id })
    }
}

#[async_trait]
impl AccountStore for HttpStore {
    async fn create_account(
        &self,
        email: &str,
        password: &str,
        name: &str,
    ) -> Result<Account, StoreError> {
        let response = self
            .authed(self.client.post(format!("{}/users", self.config.endpoint)))
            .json(&json!({
                "userId": "unique()",
                "email": email,
                "password": password,
                "name": name,
            }))
            .send()
            .await?;
        let body = Self::json_body(response).await?;
        let id = body
            .get("$id")
            .and_then(Value::as_str)
            .map(str::to_owned)
            .ok_or_else(|| StoreError::Decode("account body missing $id".into()))?;
        Ok(Account {
            id,
            email: body
                .get("email")
                .and_then(Value::as_str)
                .unwrap_or(email)
                .to_owned(),
            name: body
                .get("name")
                .and_then(Value::as_str)
                .unwrap_or(name)
                .to_owned(),
        })
    }

    async fn create_email_session(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AccountSession, StoreError> {
        let response = self
            .authed(
                self.client
                    .post(format!("{}/account/sessions/email", self.config.endpoint)),
            )
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await?;
        let body = Self::json_body(response).await?;
        let field = |name: &str| -> Result<String, StoreError> {
            body.get(name)
                .and_then(Value::as_str)
                .map(str::to_owned)
                .ok_or_else(|| StoreError::Decode(format!("session body missing {name}")))
        };
        Ok(AccountSession {
            secret: field("secret")?,
            user_id: field("userId")?,
            expires_at: field("expire")?,
        })
    }
}
