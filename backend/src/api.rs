//! Public API surface for the Rust backend.
//!
//! This file consolidates the DTO types served to the dashboard frontend,
//! together with the identifier types shared by every layer.
//! All types derive Serialize/Deserialize for JSON serialization.

pub use crate::routes::analytics::TimeSeriesData;
pub use crate::routes::chart::ChartData;
pub use crate::routes::chart::ChartDataset;
pub use crate::routes::chart::ChartStyle;
pub use crate::routes::durations::DurationBin;
pub use crate::routes::durations::DurationHistogramData;
pub use crate::routes::pages::PageInfo;
pub use crate::routes::pages::ViewName;
pub use crate::routes::rows::RowDistributionData;
pub use crate::routes::rows::RowOccupancy;
pub use crate::routes::table::CameraCapture;
pub use crate::routes::table::TableData;
pub use crate::routes::table::TimeRow;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Collection holding one document per day of per-camera sleep detections.
pub const SLEEP_COLLECTION: &str = "sleep";

/// Collection holding one document per day of per-student sleep sessions.
pub const DURATION_COLLECTION: &str = "duration";

/// Identifier of a single day's document in the store.
///
/// Keys are expected in `YYYY-MM-DD` form so that plain string ordering is
/// chronological ordering.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DateKey(pub String);

impl DateKey {
    pub fn new(value: impl Into<String>) -> Self {
        DateKey(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parse the key as a calendar date, if it is in canonical `YYYY-MM-DD` form.
    pub fn as_calendar_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.0, "%Y-%m-%d")
            .ok()
            .filter(|date| date.format("%Y-%m-%d").to_string() == self.0)
    }

    /// Whether string ordering of this key agrees with calendar ordering.
    pub fn is_canonical(&self) -> bool {
        self.as_calendar_date().is_some()
    }
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DateKey {
    fn from(value: &str) -> Self {
        DateKey(value.to_string())
    }
}

impl From<String> for DateKey {
    fn from(value: String) -> Self {
        DateKey(value)
    }
}

/// Value of a view's date selector.
///
/// The empty selector value is "All Dates"; on the wire it is the empty string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DateSelection {
    All,
    Date(DateKey),
}

impl DateSelection {
    /// The raw selector value, `""` for "All Dates".
    pub fn as_filter_str(&self) -> &str {
        match self {
            DateSelection::All => "",
            DateSelection::Date(key) => key.as_str(),
        }
    }

    pub fn date(&self) -> Option<&DateKey> {
        match self {
            DateSelection::All => None,
            DateSelection::Date(key) => Some(key),
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, DateSelection::All)
    }
}

impl From<String> for DateSelection {
    fn from(value: String) -> Self {
        if value.is_empty() {
            DateSelection::All
        } else {
            DateSelection::Date(DateKey(value))
        }
    }
}

impl From<&str> for DateSelection {
    fn from(value: &str) -> Self {
        DateSelection::from(value.to_string())
    }
}

impl From<DateKey> for DateSelection {
    fn from(value: DateKey) -> Self {
        DateSelection::Date(value)
    }
}

impl From<DateSelection> for String {
    fn from(value: DateSelection) -> Self {
        match value {
            DateSelection::All => String::new(),
            DateSelection::Date(key) => key.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_key_canonical() {
        assert!(DateKey::new("2024-01-02").is_canonical());
        assert!(!DateKey::new("2024-1-2").is_canonical());
        assert!(!DateKey::new("yesterday").is_canonical());
    }

    #[test]
    fn test_date_key_ordering_is_chronological_for_canonical_keys() {
        let earlier = DateKey::new("2023-12-31");
        let later = DateKey::new("2024-01-01");
        assert!(earlier < later);
        assert!(earlier.as_calendar_date() < later.as_calendar_date());
    }

    #[test]
    fn test_date_selection_from_empty_string_is_all() {
        assert_eq!(DateSelection::from(""), DateSelection::All);
        assert_eq!(
            DateSelection::from("2024-01-01"),
            DateSelection::Date(DateKey::new("2024-01-01"))
        );
    }

    #[test]
    fn test_date_selection_serializes_as_plain_string() {
        let all = serde_json::to_string(&DateSelection::All).unwrap();
        assert_eq!(all, "\"\"");

        let date = serde_json::to_string(&DateSelection::from("2024-01-01")).unwrap();
        assert_eq!(date, "\"2024-01-01\"");

        let parsed: DateSelection = serde_json::from_str("\"2024-03-05\"").unwrap();
        assert_eq!(parsed.date(), Some(&DateKey::new("2024-03-05")));
    }

    #[test]
    fn test_filter_str() {
        assert_eq!(DateSelection::All.as_filter_str(), "");
        assert_eq!(DateSelection::from("2024-01-01").as_filter_str(), "2024-01-01");
    }
}
