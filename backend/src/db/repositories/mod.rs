//! Repository implementations module.
//!
//! This module contains the implementations of the `DocumentRepository` trait:
//! - `firestore`: hosted store over the Firestore REST API
//! - `local`: In-memory implementation for unit testing and local development
#[cfg(feature = "firestore-repo")]
pub mod firestore;
pub mod local;

#[cfg(feature = "firestore-repo")]
pub use firestore::FirestoreRepository;
pub use local::LocalRepository;
