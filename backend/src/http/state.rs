//! Application state for the HTTP server.

use std::sync::Arc;

use crate::db::repo_config::DisplaySettings;
use crate::db::repository::DocumentRepository;
use crate::services::views::DashboardViews;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Store handle shared with every view processor
    pub repository: Arc<dyn DocumentRepository>,
    /// One processor per dashboard page
    pub views: Arc<DashboardViews>,
}

impl AppState {
    /// Create a new application state with the given repository.
    pub fn new(repository: Arc<dyn DocumentRepository>, display: DisplaySettings) -> Self {
        let views = DashboardViews::new(repository.clone(), display.table_utc_offset_hours);
        Self {
            repository,
            views: Arc::new(views),
        }
    }
}
