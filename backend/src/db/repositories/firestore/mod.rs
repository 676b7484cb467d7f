//! Firestore REST repository implementation.
//!
//! Collections are listed page by page until the listing is exhausted, so a
//! read always returns the full collection.

pub mod value;

use async_trait::async_trait;

use crate::db::config::FirestoreConfig;
use crate::db::repository::{DocumentRepository, ErrorContext, RepositoryError, RepositoryResult};
use crate::models::RawDocument;
use value::ListDocumentsResponse;

/// Read-only client for one Firestore database.
pub struct FirestoreRepository {
    client: reqwest::Client,
    config: FirestoreConfig,
}

impl FirestoreRepository {
    pub fn new(config: FirestoreConfig) -> RepositoryResult<Self> {
        if config.project_id.is_empty() {
            return Err(RepositoryError::configuration(
                "Firestore repository requires a project id",
            ));
        }
        // Reads are never cut short; a slow store keeps the page loading.
        let client = reqwest::Client::builder().build().map_err(|e| {
            RepositoryError::configuration(format!("Failed to build HTTP client: {}", e))
        })?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &FirestoreConfig {
        &self.config
    }

    async fn fetch_page(
        &self,
        collection: &str,
        page_token: Option<&str>,
    ) -> RepositoryResult<Option<ListDocumentsResponse>> {
        let page_size = self.config.page_size.to_string();
        let mut request = self
            .client
            .get(self.config.collection_url(collection))
            .query(&[("pageSize", page_size.as_str())]);
        if let Some(key) = &self.config.api_key {
            request = request.query(&[("key", key.as_str())]);
        }
        if let Some(token) = page_token {
            request = request.query(&[("pageToken", token)]);
        }

        let resp = request
            .send()
            .await
            .map_err(|e| RepositoryError::from(e).with_operation("fetch_collection"))?;

        let status = resp.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(
                RepositoryError::query(format!("HTTP {}: {}", status.as_u16(), body))
                    .in_context(ErrorContext::new("fetch_collection").collection(collection)),
            );
        }

        Ok(Some(resp.json().await?))
    }
}

#[async_trait]
impl DocumentRepository for FirestoreRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        let resp = self
            .client
            .get(self.config.collection_url(crate::api::SLEEP_COLLECTION))
            .query(&[("pageSize", "1")])
            .send()
            .await?;
        Ok(resp.status().is_success() || resp.status() == reqwest::StatusCode::NOT_FOUND)
    }

    async fn fetch_collection(&self, collection: &str) -> RepositoryResult<Vec<RawDocument>> {
        let mut documents = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let Some(page) = self.fetch_page(collection, page_token.as_deref()).await? else {
                log::debug!("Collection {} not found, reading as empty", collection);
                break;
            };

            documents.extend(
                page.documents
                    .iter()
                    .map(|doc| RawDocument::new(doc.id(), doc.decoded_fields())),
            );

            match page.next_page_token.filter(|t| !t.is_empty()) {
                Some(token) => page_token = Some(token),
                None => break,
            }
        }

        Ok(documents)
    }

    fn backend_name(&self) -> &'static str {
        "firestore"
    }
}
