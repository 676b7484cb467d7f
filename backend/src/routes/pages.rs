use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::{analytics, durations, rows, table};

/// The four dashboard destinations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewName {
    Table,
    Analytics,
    Durations,
    Rows,
}

impl ViewName {
    pub const ALL: [ViewName; 4] = [
        ViewName::Table,
        ViewName::Analytics,
        ViewName::Durations,
        ViewName::Rows,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ViewName::Table => "table",
            ViewName::Analytics => "analytics",
            ViewName::Durations => "durations",
            ViewName::Rows => "rows",
        }
    }

    /// Route path of the page, relative to the API version prefix.
    pub fn path(&self) -> &'static str {
        match self {
            ViewName::Table => table::TABLE_PATH,
            ViewName::Analytics => analytics::ANALYTICS_PATH,
            ViewName::Durations => durations::DURATIONS_PATH,
            ViewName::Rows => rows::ROWS_PATH,
        }
    }

    /// Navigation label.
    pub fn title(&self) -> &'static str {
        match self {
            ViewName::Table => "Daily Data",
            ViewName::Analytics => "Analytics",
            ViewName::Durations => "Sleep Duration",
            ViewName::Rows => "Sleeping Rows",
        }
    }
}

impl fmt::Display for ViewName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ViewName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(ViewName::Table),
            "analytics" => Ok(ViewName::Analytics),
            "durations" => Ok(ViewName::Durations),
            "rows" => Ok(ViewName::Rows),
            _ => Err(format!("Unknown view: {}", s)),
        }
    }
}

/// Navigation entry for one page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInfo {
    pub view: ViewName,
    pub path: String,
    pub title: String,
}

impl From<ViewName> for PageInfo {
    fn from(view: ViewName) -> Self {
        Self {
            view,
            path: view.path().to_string(),
            title: view.title().to_string(),
        }
    }
}

/// Navigation entries in sidebar order.
pub fn pages() -> Vec<PageInfo> {
    ViewName::ALL.into_iter().map(PageInfo::from).collect()
}
