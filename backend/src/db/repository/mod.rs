//! Repository trait for the detection document store.
//!
//! The dashboard only ever reads whole collections: every document is keyed
//! by its `YYYY-MM-DD` date and holds one entry per detection or session.
//!
//! - [`error`]: Error types for repository operations

pub mod error;

pub use error::{ErrorContext, RepositoryError, RepositoryResult};

use async_trait::async_trait;

use crate::models::RawDocument;

/// Read access to a collection-of-documents store.
///
/// # Thread Safety
/// Implementations must be `Send + Sync`; a single handle is shared by every
/// view processor.
#[async_trait]
pub trait DocumentRepository: Send + Sync {
    /// Check whether the store is reachable.
    async fn health_check(&self) -> RepositoryResult<bool>;

    /// Read every document of `collection`.
    ///
    /// A collection that does not exist reads as empty. Document order is
    /// unspecified.
    async fn fetch_collection(&self, collection: &str) -> RepositoryResult<Vec<RawDocument>>;

    /// Short backend name for logs and the health endpoint.
    fn backend_name(&self) -> &'static str;
}
