//! Document store access for the dashboard.
//!
//! This module provides abstractions for reading day documents via the
//! Repository pattern, allowing different storage backends to be swapped easily.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  View processors / HTTP handlers                        │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Service Layer (services.rs) - logging, date indexing   │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Repository Trait (repository/) - Abstract Interface    │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//!     ┌───────────────┴────────────────┐
//!     │                                │
//! ┌───▼──────────────────┐  ┌──────────▼──────────────┐
//! │ Firestore Repository │  │ Local Repository        │
//! │ (REST API)           │  │ (in-memory)             │
//! └──────────────────────┘  └─────────────────────────┘
//! ```
//!
//! # Recommended Usage
//!
//! ```ignore
//! use sleep_monitor::db::{self, services};
//!
//! async fn example() -> anyhow::Result<()> {
//!     let repo = db::init_repository().await?;
//!     let documents = services::fetch_collection(repo.as_ref(), "sleep").await?;
//!     Ok(())
//! }
//! ```

#[cfg(not(any(feature = "firestore-repo", feature = "local-repo")))]
compile_error!("Enable at least one repository backend feature.");

pub mod config;
pub mod factory;
pub mod repo_config;
pub mod repositories;
pub mod repository;
pub mod services;

pub use services::{fetch_collection, fetch_date_index, health_check};

pub use config::FirestoreConfig;
pub use factory::{RepositoryFactory, RepositoryType};
pub use repo_config::{DisplaySettings, RepositoryConfig};
#[cfg(feature = "firestore-repo")]
pub use repositories::FirestoreRepository;
pub use repositories::LocalRepository;
pub use repository::{DocumentRepository, ErrorContext, RepositoryError, RepositoryResult};

use anyhow::{Context, Result};
use std::path::Path;
use std::sync::Arc;

/// Resolved startup configuration: file settings if a `repository.toml` is
/// found, defaults otherwise, with environment overrides on top.
pub fn load_config() -> Result<RepositoryConfig> {
    load_config_from(RepositoryConfig::default_location().as_deref())
}

/// [`load_config`] with the config file location already decided.
///
/// A file that exists but cannot be read or parsed is an error; only a
/// missing file falls back to environment configuration.
pub fn load_config_from(path: Option<&Path>) -> Result<RepositoryConfig> {
    let mut config = match path {
        Some(path) => {
            let config = RepositoryConfig::from_file(path)
                .with_context(|| format!("Invalid config file {}", path.display()))?;
            log::info!("Loaded configuration from {}", path.display());
            config
        }
        None => {
            log::info!("No repository.toml found; using environment configuration");
            let mut config = RepositoryConfig::local();
            if RepositoryType::from_env() == RepositoryType::Firestore {
                config.repository.repo_type = "firestore".to_string();
            }
            config
        }
    };
    config
        .apply_env_overrides()
        .context("Invalid environment configuration")?;
    Ok(config)
}

/// Create the store handle shared by every view for this process.
pub async fn init_repository() -> Result<Arc<dyn DocumentRepository>> {
    let config = load_config()?;
    init_repository_with(&config).await
}

/// Create the store handle from an already resolved configuration.
pub async fn init_repository_with(config: &RepositoryConfig) -> Result<Arc<dyn DocumentRepository>> {
    let repo = RepositoryFactory::from_repository_config(config)
        .await
        .map_err(|e| anyhow::Error::msg(e.to_string()))
        .context("Failed to initialize repository")?;
    log::info!("Repository initialized ({})", repo.backend_name());
    Ok(repo)
}
