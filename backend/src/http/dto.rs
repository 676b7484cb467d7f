//! Data Transfer Objects for the HTTP API.
//!
//! Page payloads are re-exported from the routes module since they already
//! derive Serialize/Deserialize.

use serde::{Deserialize, Serialize};

pub use crate::api::{
    DateKey, DateSelection, DurationHistogramData, PageInfo, RowDistributionData, TableData,
    TimeSeriesData, ViewName,
};
pub use crate::services::view_processor::{ViewSnapshot, ViewStatus};

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    /// Store backend name, e.g. `local` or `firestore`
    pub backend: String,
    pub database: String,
}

/// Optional date selector value of a page request.
///
/// An absent `date` keeps the current selection; an empty one selects
/// "All Dates".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DateQuery {
    #[serde(default)]
    pub date: Option<String>,
}

impl DateQuery {
    pub fn selection(&self) -> Option<DateSelection> {
        self.date.clone().map(DateSelection::from)
    }
}

/// Navigation destinations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PagesResponse {
    pub pages: Vec<PageInfo>,
}

/// Date selector options of one collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DateIndexResponse {
    pub collection: String,
    pub dates: Vec<DateKey>,
    pub default: Option<DateKey>,
}
