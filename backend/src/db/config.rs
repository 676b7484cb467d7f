//! Hosted document store configuration and environment variable handling.

use std::env;

/// Public REST endpoint of the hosted store.
pub const DEFAULT_FIRESTORE_BASE_URL: &str = "https://firestore.googleapis.com/v1";
/// Database name used when none is configured.
pub const DEFAULT_FIRESTORE_DATABASE: &str = "(default)";
/// Documents requested per listing page.
pub const DEFAULT_FIRESTORE_PAGE_SIZE: u32 = 300;

/// Connection settings for the Firestore REST adapter.
#[derive(Debug, Clone, PartialEq)]
pub struct FirestoreConfig {
    /// Cloud project owning the database
    pub project_id: String,
    /// Database name, usually `(default)`
    pub database: String,
    /// Web API key appended as `key=`; the emulator needs none
    pub api_key: Option<String>,
    /// REST root, ending in `/v1`
    pub base_url: String,
    /// Page size for collection listings
    pub page_size: u32,
}

impl FirestoreConfig {
    pub fn new(project_id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            database: DEFAULT_FIRESTORE_DATABASE.to_string(),
            api_key: None,
            base_url: DEFAULT_FIRESTORE_BASE_URL.to_string(),
            page_size: DEFAULT_FIRESTORE_PAGE_SIZE,
        }
    }

    /// Create a configuration from environment variables.
    ///
    /// # Environment Variables
    /// - `FIRESTORE_PROJECT_ID` (required): Cloud project id
    /// - `FIRESTORE_DATABASE` (optional, default: `(default)`)
    /// - `FIRESTORE_API_KEY` (optional): Web API key
    /// - `FIRESTORE_EMULATOR_HOST` (optional): `host:port` of a local emulator;
    ///   switches the base URL to `http://host:port/v1`
    /// - `FIRESTORE_PAGE_SIZE` (optional, default: 300)
    ///
    /// # Errors
    /// Returns an error if the project id is missing or the page size is not a
    /// positive integer.
    pub fn from_env() -> Result<Self, String> {
        let project_id = env::var("FIRESTORE_PROJECT_ID")
            .map_err(|_| "FIRESTORE_PROJECT_ID environment variable not set".to_string())?;
        let mut config = Self::new(project_id);
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Overlay optional `FIRESTORE_*` variables onto this configuration.
    pub fn apply_env_overrides(&mut self) -> Result<(), String> {
        if let Ok(database) = env::var("FIRESTORE_DATABASE") {
            self.database = database;
        }
        if let Ok(api_key) = env::var("FIRESTORE_API_KEY") {
            self.api_key = Some(api_key).filter(|k| !k.is_empty());
        }
        if let Ok(host) = env::var("FIRESTORE_EMULATOR_HOST") {
            self.base_url = emulator_base_url(&host);
        }
        if let Ok(page_size) = env::var("FIRESTORE_PAGE_SIZE") {
            self.page_size = page_size
                .parse()
                .ok()
                .filter(|n| *n > 0)
                .ok_or_else(|| "FIRESTORE_PAGE_SIZE must be a positive integer".to_string())?;
        }
        Ok(())
    }

    /// REST URL listing every document of `collection`.
    pub fn collection_url(&self, collection: &str) -> String {
        format!(
            "{}/projects/{}/databases/{}/documents/{}",
            self.base_url.trim_end_matches('/'),
            self.project_id,
            self.database,
            collection
        )
    }
}

/// Base URL of an emulator listening on `host` (`host:port`).
pub fn emulator_base_url(host: &str) -> String {
    format!("http://{}/v1", host.trim_end_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collection_url() {
        let config = FirestoreConfig::new("demo");
        assert_eq!(
            config.collection_url("sleep"),
            "https://firestore.googleapis.com/v1/projects/demo/databases/(default)/documents/sleep"
        );
    }

    #[test]
    fn test_emulator_base_url() {
        let mut config = FirestoreConfig::new("demo");
        config.base_url = emulator_base_url("localhost:8081");
        assert_eq!(
            config.collection_url("duration"),
            "http://localhost:8081/v1/projects/demo/databases/(default)/documents/duration"
        );
    }
}
