//! Repository configuration file support.
//!
//! This module provides utilities for reading repository and display
//! configuration from `repository.toml`.

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use super::config::{
    emulator_base_url, FirestoreConfig, DEFAULT_FIRESTORE_BASE_URL, DEFAULT_FIRESTORE_DATABASE,
    DEFAULT_FIRESTORE_PAGE_SIZE,
};
use super::factory::RepositoryType;
use super::repository::RepositoryError;
use crate::models::TABLE_UTC_OFFSET_HOURS;

/// Where `repository.toml` is looked for, in order.
pub const DEFAULT_CONFIG_PATHS: [&str; 3] =
    ["repository.toml", "backend/repository.toml", "../repository.toml"];

/// Repository configuration from file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositoryConfig {
    pub repository: RepositorySettings,
    #[serde(default)]
    pub local: LocalSettings,
    #[serde(default)]
    pub firestore: FirestoreSettings,
    #[serde(default)]
    pub display: DisplaySettings,
}

/// Repository type settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositorySettings {
    #[serde(rename = "type")]
    pub repo_type: String,
}

/// In-memory store settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LocalSettings {
    /// JSON seed loaded at startup; the store starts empty without one.
    #[serde(default)]
    pub seed_path: Option<PathBuf>,
}

/// Firestore connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FirestoreSettings {
    #[serde(default)]
    pub project_id: String,
    #[serde(default = "default_database")]
    pub database: String,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

impl Default for FirestoreSettings {
    fn default() -> Self {
        Self {
            project_id: String::new(),
            database: default_database(),
            api_key: None,
            base_url: default_base_url(),
            page_size: default_page_size(),
        }
    }
}

/// Presentation settings shared by the views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplaySettings {
    /// Fixed hour offset applied to table capture times.
    #[serde(default = "default_table_offset")]
    pub table_utc_offset_hours: i32,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            table_utc_offset_hours: default_table_offset(),
        }
    }
}

impl DisplaySettings {
    /// Defaults overlaid with `TABLE_UTC_OFFSET_HOURS`.
    pub fn from_env() -> Result<Self, RepositoryError> {
        let mut settings = Self::default();
        settings.apply_env_overrides()?;
        Ok(settings)
    }

    pub fn apply_env_overrides(&mut self) -> Result<(), RepositoryError> {
        if let Ok(value) = env::var("TABLE_UTC_OFFSET_HOURS") {
            self.table_utc_offset_hours = value
                .trim()
                .parse()
                .ok()
                .filter(|hours: &i32| (-23..=23).contains(hours))
                .ok_or_else(|| {
                    RepositoryError::configuration(format!(
                        "TABLE_UTC_OFFSET_HOURS must be an hour offset in -23..=23, got '{}'",
                        value
                    ))
                })?;
        }
        Ok(())
    }
}

fn default_database() -> String {
    DEFAULT_FIRESTORE_DATABASE.to_string()
}

fn default_base_url() -> String {
    DEFAULT_FIRESTORE_BASE_URL.to_string()
}

fn default_page_size() -> u32 {
    DEFAULT_FIRESTORE_PAGE_SIZE
}

fn default_table_offset() -> i32 {
    TABLE_UTC_OFFSET_HOURS
}

impl RepositoryConfig {
    /// Local store with default display settings.
    pub fn local() -> Self {
        Self {
            repository: RepositorySettings {
                repo_type: "local".to_string(),
            },
            local: LocalSettings::default(),
            firestore: FirestoreSettings::default(),
            display: DisplaySettings::default(),
        }
    }

    /// Load repository configuration from a TOML file.
    ///
    /// # Arguments
    /// * `path` - Path to the configuration file
    ///
    /// # Returns
    /// * `Ok(RepositoryConfig)` if successful
    /// * `Err(RepositoryError)` if file cannot be read or parsed
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, RepositoryError> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            RepositoryError::configuration(format!("Failed to read config file: {}", e))
        })?;

        let config: RepositoryConfig = toml::from_str(&content).map_err(|e| {
            RepositoryError::configuration(format!("Failed to parse config file: {}", e))
        })?;

        Ok(config)
    }

    /// First existing `repository.toml` among [`DEFAULT_CONFIG_PATHS`].
    pub fn default_location() -> Option<PathBuf> {
        DEFAULT_CONFIG_PATHS
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
    }

    /// Load repository configuration from the default location.
    ///
    /// Fails when no file is found, and when the file found cannot be read
    /// or parsed.
    pub fn from_default_location() -> Result<Self, RepositoryError> {
        match Self::default_location() {
            Some(path) => Self::from_file(path),
            None => Err(RepositoryError::configuration(
                "No repository.toml found in standard locations",
            )),
        }
    }

    /// Overlay environment variables onto the file settings.
    ///
    /// `REPOSITORY_TYPE`, `LOCAL_SEED_PATH`, the `FIRESTORE_*` variables and
    /// `TABLE_UTC_OFFSET_HOURS` each replace their file counterpart.
    pub fn apply_env_overrides(&mut self) -> Result<(), RepositoryError> {
        if let Ok(repo_type) = env::var("REPOSITORY_TYPE") {
            self.repository.repo_type = repo_type;
        }
        if let Ok(seed_path) = env::var("LOCAL_SEED_PATH") {
            self.local.seed_path = Some(PathBuf::from(seed_path));
        }
        if let Ok(project_id) = env::var("FIRESTORE_PROJECT_ID") {
            self.firestore.project_id = project_id;
        }
        if let Ok(database) = env::var("FIRESTORE_DATABASE") {
            self.firestore.database = database;
        }
        if let Ok(api_key) = env::var("FIRESTORE_API_KEY") {
            self.firestore.api_key = Some(api_key).filter(|k| !k.is_empty());
        }
        if let Ok(host) = env::var("FIRESTORE_EMULATOR_HOST") {
            self.firestore.base_url = emulator_base_url(&host);
        }
        if let Ok(page_size) = env::var("FIRESTORE_PAGE_SIZE") {
            self.firestore.page_size = page_size.parse().map_err(|_| {
                RepositoryError::configuration("FIRESTORE_PAGE_SIZE must be a positive integer")
            })?;
        }
        self.display.apply_env_overrides()
    }

    /// Get the repository type from configuration.
    pub fn repository_type(&self) -> Result<RepositoryType, String> {
        RepositoryType::from_str(&self.repository.repo_type)
    }

    /// Convert to FirestoreConfig if this is a Firestore configuration.
    pub fn to_firestore_config(&self) -> Result<Option<FirestoreConfig>, RepositoryError> {
        let repo_type = self.repository_type().map_err(|e| {
            RepositoryError::configuration(format!("Invalid repository type: {}", e))
        })?;

        if repo_type != RepositoryType::Firestore {
            return Ok(None);
        }

        if self.firestore.project_id.is_empty() {
            return Err(RepositoryError::configuration(
                "Firestore repository requires 'firestore.project_id' setting",
            ));
        }
        if self.firestore.page_size == 0 {
            return Err(RepositoryError::configuration(
                "'firestore.page_size' must be positive",
            ));
        }

        Ok(Some(FirestoreConfig {
            project_id: self.firestore.project_id.clone(),
            database: self.firestore.database.clone(),
            api_key: self.firestore.api_key.clone(),
            base_url: self.firestore.base_url.clone(),
            page_size: self.firestore.page_size,
        }))
    }
}
