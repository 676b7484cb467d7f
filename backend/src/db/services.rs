//! High-level database service layer.
//!
//! Repository-agnostic read operations with the logging every caller wants.
//! View processors and HTTP handlers go through these functions rather than
//! calling the repository directly.
//!
//! # Usage
//!
//! ```no_run
//! use sleep_monitor::db::{services, repositories::LocalRepository};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let repo = LocalRepository::new();
//!     let documents = services::fetch_collection(&repo, "sleep").await?;
//!     println!("Found {} documents", documents.len());
//!     Ok(())
//! }
//! ```

use log::{debug, warn};

use super::repository::{DocumentRepository, RepositoryResult};
use crate::models::RawDocument;
use crate::services::date_index::{index_dates, DateIndex};

// ==================== Health & Connection ====================

/// Check if the store is reachable.
pub async fn health_check<R: DocumentRepository + ?Sized>(repo: &R) -> RepositoryResult<bool> {
    repo.health_check().await
}

// ==================== Collection Reads ====================

/// Read every document of `collection`.
pub async fn fetch_collection<R: DocumentRepository + ?Sized>(
    repo: &R,
    collection: &str,
) -> RepositoryResult<Vec<RawDocument>> {
    match repo.fetch_collection(collection).await {
        Ok(documents) => {
            debug!(
                "Fetched {} documents from {} ({})",
                documents.len(),
                collection,
                repo.backend_name()
            );
            Ok(documents)
        }
        Err(e) => {
            warn!("Failed to fetch collection {}: {}", collection, e);
            Err(e.with_operation("fetch_collection"))
        }
    }
}

/// Read `collection` and index its document dates, most recent first.
pub async fn fetch_date_index<R: DocumentRepository + ?Sized>(
    repo: &R,
    collection: &str,
) -> RepositoryResult<DateIndex> {
    let documents = fetch_collection(repo, collection).await?;
    Ok(index_dates(&documents))
}
