//! In-memory local repository implementation.
//!
//! Collections live in memory as `collection -> document id -> body` maps,
//! which keeps unit tests fast and isolated. A JSON seed file of the same
//! shape can be loaded for local development:
//!
//! ```json
//! { "sleep": { "2024-01-01": { "entry-1": { "camera_id": 1 } } } }
//! ```

use async_trait::async_trait;
use parking_lot::RwLock;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use crate::db::repository::{DocumentRepository, ErrorContext, RepositoryError, RepositoryResult};
use crate::models::RawDocument;

type Collection = BTreeMap<String, Map<String, Value>>;

/// In-memory document store.
///
/// # Example
/// ```
/// use serde_json::Map;
/// use sleep_monitor::db::repositories::LocalRepository;
///
/// let repo = LocalRepository::new();
/// repo.insert_document("sleep", "2024-01-01", Map::new());
/// assert_eq!(repo.document_count("sleep"), 1);
/// ```
#[derive(Clone)]
pub struct LocalRepository {
    data: Arc<RwLock<LocalData>>,
}

struct LocalData {
    collections: BTreeMap<String, Collection>,
    // Connection health
    is_healthy: bool,
    /// Forced read failure, for exercising error paths.
    failure: Option<String>,
}

impl Default for LocalData {
    fn default() -> Self {
        Self {
            collections: BTreeMap::new(),
            is_healthy: true,
            failure: None,
        }
    }
}

impl LocalRepository {
    /// Create a new empty local repository.
    pub fn new() -> Self {
        Self {
            data: Arc::new(RwLock::new(LocalData::default())),
        }
    }

    /// Build a repository from a seed value shaped
    /// `{ collection: { document_id: { entry_id: entry } } }`.
    pub fn from_seed_value(seed: Value) -> RepositoryResult<Self> {
        let Value::Object(collections) = seed else {
            return Err(
                RepositoryError::validation("Seed must be a JSON object of collections")
                    .in_context(ErrorContext::new("load_seed")),
            );
        };

        let repo = Self::new();
        for (collection, documents) in collections {
            let Value::Object(documents) = documents else {
                return Err(
                    RepositoryError::validation("Collection must be a JSON object of documents")
                        .in_context(ErrorContext::new("load_seed").collection(collection)),
                );
            };
            for (id, body) in documents {
                let Value::Object(body) = body else {
                    return Err(
                        RepositoryError::validation("Document body must be a JSON object")
                            .in_context(
                                ErrorContext::new("load_seed")
                                    .collection(collection.clone())
                                    .document(id),
                            ),
                    );
                };
                repo.insert_document(&collection, id, body);
            }
        }
        Ok(repo)
    }

    /// Build a repository from a JSON seed file.
    pub fn from_seed_file<P: AsRef<Path>>(path: P) -> RepositoryResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            RepositoryError::configuration(format!("Failed to read seed file: {}", e))
                .in_context(ErrorContext::new("load_seed").detail(path.display().to_string()))
        })?;
        let seed: Value = serde_json::from_str(&content)?;
        let repo = Self::from_seed_value(seed)?;
        log::info!(
            "Loaded local seed {} ({} collections)",
            path.display(),
            repo.data.read().collections.len()
        );
        Ok(repo)
    }

    /// Insert or replace one document.
    pub fn insert_document(
        &self,
        collection: &str,
        id: impl Into<String>,
        body: Map<String, Value>,
    ) {
        let mut data = self.data.write();
        data.collections
            .entry(collection.to_string())
            .or_default()
            .insert(id.into(), body);
    }

    /// Set the health status for testing connection failures.
    pub fn set_healthy(&self, healthy: bool) {
        self.data.write().is_healthy = healthy;
    }

    /// Make every collection read fail with `message`, or clear the failure.
    pub fn set_failure(&self, message: Option<String>) {
        self.data.write().failure = message;
    }

    /// Clear all data from the repository.
    pub fn clear(&self) {
        self.data.write().collections.clear();
    }

    /// Get the number of documents stored in `collection`.
    pub fn document_count(&self, collection: &str) -> usize {
        self.data
            .read()
            .collections
            .get(collection)
            .map_or(0, |docs| docs.len())
    }
}

impl Default for LocalRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DocumentRepository for LocalRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        Ok(self.data.read().is_healthy)
    }

    async fn fetch_collection(&self, collection: &str) -> RepositoryResult<Vec<RawDocument>> {
        let data = self.data.read();
        let context = || ErrorContext::new("fetch_collection").collection(collection);

        if let Some(message) = &data.failure {
            return Err(RepositoryError::connection(message.clone()).in_context(context()));
        }
        if !data.is_healthy {
            return Err(RepositoryError::connection("Store is not healthy").in_context(context()));
        }

        Ok(data
            .collections
            .get(collection)
            .map(|docs| {
                docs.iter()
                    .map(|(id, body)| RawDocument::new(id.clone(), body.clone()))
                    .collect()
            })
            .unwrap_or_default())
    }

    fn backend_name(&self) -> &'static str {
        "local"
    }
}
