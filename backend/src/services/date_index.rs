//! Date selector index derived from a collection read.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::api::DateKey;
use crate::models::RawDocument;

/// Available days, most recent first, and the day selected by default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateIndex {
    pub all: Vec<DateKey>,
    pub default: Option<DateKey>,
}

impl DateIndex {
    pub fn is_empty(&self) -> bool {
        self.all.is_empty()
    }
}

/// Collect the distinct document IDs and sort them descending.
///
/// Keys are compared as plain strings, which is chronological for canonical
/// `YYYY-MM-DD` keys. Keys in any other form are kept but logged, since their
/// position in the list may not match the calendar.
pub fn index_dates(documents: &[RawDocument]) -> DateIndex {
    let distinct: BTreeSet<DateKey> = documents.iter().map(RawDocument::date_key).collect();

    for key in distinct.iter().filter(|key| !key.is_canonical()) {
        log::warn!(
            "Date key '{}' is not in YYYY-MM-DD form; ordering may not be chronological",
            key
        );
    }

    let all: Vec<DateKey> = distinct.into_iter().rev().collect();
    let default = all.first().cloned();
    DateIndex { all, default }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Map;

    fn docs(ids: &[&str]) -> Vec<RawDocument> {
        ids.iter().map(|id| RawDocument::new(*id, Map::new())).collect()
    }

    #[test]
    fn test_sorted_descending_with_latest_default() {
        let index = index_dates(&docs(&["2024-01-01", "2024-01-02"]));
        assert_eq!(
            index.all,
            vec![DateKey::new("2024-01-02"), DateKey::new("2024-01-01")]
        );
        assert_eq!(index.default, Some(DateKey::new("2024-01-02")));
    }

    #[test]
    fn test_duplicates_are_collapsed() {
        let index = index_dates(&docs(&["2024-02-10", "2024-02-10", "2023-12-31"]));
        assert_eq!(index.all.len(), 2);
        assert_eq!(index.default, Some(DateKey::new("2024-02-10")));
    }

    #[test]
    fn test_empty_collection_has_no_default() {
        let index = index_dates(&[]);
        assert!(index.is_empty());
        assert_eq!(index.default, None);
    }

    #[test]
    fn test_year_boundary_ordering() {
        let index = index_dates(&docs(&["2023-12-31", "2024-01-01", "2023-06-15"]));
        assert_eq!(index.all[0], DateKey::new("2024-01-01"));
        assert_eq!(index.all[2], DateKey::new("2023-06-15"));
        assert_eq!(index.all[1], DateKey::new("2023-12-31"));
    }
}
