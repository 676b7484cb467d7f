//! Repository factory for dependency injection.
//!
//! This module provides utilities for creating and configuring repository instances
//! based on runtime configuration.

use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use super::config::FirestoreConfig;
use super::repo_config::RepositoryConfig;
#[cfg(feature = "firestore-repo")]
use super::repositories::FirestoreRepository;
use super::repositories::LocalRepository;
use super::repository::{DocumentRepository, RepositoryError, RepositoryResult};

/// Repository type configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepositoryType {
    /// Firestore REST implementation
    Firestore,
    /// In-memory local repository
    Local,
}

impl FromStr for RepositoryType {
    type Err = String;

    /// Parse repository type from string.
    ///
    /// # Arguments
    /// * `s` - String representation ("firestore", "local")
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "firestore" | "fs" => Ok(Self::Firestore),
            "local" | "memory" => Ok(Self::Local),
            _ => Err(format!("Unknown repository type: {}", s)),
        }
    }
}

impl RepositoryType {
    /// Get repository type from environment variable.
    ///
    /// Reads `REPOSITORY_TYPE`. Without it, defaults to Firestore if a project
    /// id is present, otherwise Local.
    pub fn from_env() -> Self {
        if let Ok(val) = std::env::var("REPOSITORY_TYPE") {
            return val.parse().unwrap_or(Self::Local);
        }

        if std::env::var("FIRESTORE_PROJECT_ID").is_ok() {
            Self::Firestore
        } else {
            Self::Local
        }
    }
}

/// Repository factory for creating repository instances.
///
/// # Example
/// ```ignore
/// use sleep_monitor::db::{RepositoryFactory, RepositoryType};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let repo = RepositoryFactory::create(RepositoryType::Local, None).await?;
///     assert!(repo.health_check().await?);
///     Ok(())
/// }
/// ```
pub struct RepositoryFactory;

impl RepositoryFactory {
    /// Create a repository instance based on type.
    ///
    /// # Arguments
    /// * `repo_type` - Type of repository to create
    /// * `firestore_config` - Connection settings (required for Firestore)
    pub async fn create(
        repo_type: RepositoryType,
        firestore_config: Option<&FirestoreConfig>,
    ) -> RepositoryResult<Arc<dyn DocumentRepository>> {
        match repo_type {
            RepositoryType::Firestore => {
                let config = firestore_config.ok_or_else(|| {
                    RepositoryError::configuration(
                        "Firestore repository requires FirestoreConfig",
                    )
                })?;
                Self::create_firestore(config)
            }
            RepositoryType::Local => Ok(Self::create_local()),
        }
    }

    /// Create a Firestore repository.
    #[cfg(feature = "firestore-repo")]
    pub fn create_firestore(
        config: &FirestoreConfig,
    ) -> RepositoryResult<Arc<dyn DocumentRepository>> {
        let repo = FirestoreRepository::new(config.clone())?;
        log::info!(
            "Using Firestore repository (project {}, database {})",
            config.project_id,
            config.database
        );
        Ok(Arc::new(repo))
    }

    /// Create a Firestore repository when the feature is disabled.
    #[cfg(not(feature = "firestore-repo"))]
    pub fn create_firestore(
        config: &FirestoreConfig,
    ) -> RepositoryResult<Arc<dyn DocumentRepository>> {
        let _ = config;
        Err(RepositoryError::configuration(
            "Firestore repository feature not enabled",
        ))
    }

    /// Create an empty in-memory local repository.
    pub fn create_local() -> Arc<dyn DocumentRepository> {
        Arc::new(LocalRepository::new())
    }

    /// Create an in-memory local repository, seeded from `seed_path` if given.
    pub fn create_local_seeded(
        seed_path: Option<&Path>,
    ) -> RepositoryResult<Arc<dyn DocumentRepository>> {
        match seed_path {
            Some(path) => Ok(Arc::new(LocalRepository::from_seed_file(path)?)),
            None => Ok(Self::create_local()),
        }
    }

    /// Create repository from environment configuration.
    ///
    /// Reads `REPOSITORY_TYPE` to determine which repository to create, then
    /// `LOCAL_SEED_PATH` or the `FIRESTORE_*` variables.
    pub async fn from_env() -> RepositoryResult<Arc<dyn DocumentRepository>> {
        match RepositoryType::from_env() {
            RepositoryType::Firestore => {
                let config = FirestoreConfig::from_env().map_err(RepositoryError::configuration)?;
                Self::create_firestore(&config)
            }
            RepositoryType::Local => {
                let seed_path = std::env::var("LOCAL_SEED_PATH").ok();
                Self::create_local_seeded(seed_path.as_deref().map(Path::new))
            }
        }
    }

    /// Create repository from a TOML configuration file.
    pub async fn from_config_file<P: AsRef<Path>>(
        config_path: P,
    ) -> RepositoryResult<Arc<dyn DocumentRepository>> {
        let config = RepositoryConfig::from_file(config_path)?;
        Self::from_repository_config(&config).await
    }

    /// Create repository from the default configuration file location.
    pub async fn from_default_config() -> RepositoryResult<Arc<dyn DocumentRepository>> {
        let config = RepositoryConfig::from_default_location()?;
        Self::from_repository_config(&config).await
    }

    /// Create repository from a RepositoryConfig instance.
    pub async fn from_repository_config(
        config: &RepositoryConfig,
    ) -> RepositoryResult<Arc<dyn DocumentRepository>> {
        let repo_type = config.repository_type().map_err(|e| {
            RepositoryError::configuration(format!("Invalid repository type: {}", e))
        })?;

        match repo_type {
            RepositoryType::Firestore => {
                let fs_config = config.to_firestore_config()?.ok_or_else(|| {
                    RepositoryError::configuration(
                        "Firestore repository requires firestore configuration",
                    )
                })?;
                Self::create_firestore(&fs_config)
            }
            RepositoryType::Local => Self::create_local_seeded(config.local.seed_path.as_deref()),
        }
    }
}
