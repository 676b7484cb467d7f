use serde::{Deserialize, Serialize};

use super::chart::{ChartData, ChartStyle};

// =========================================================
// Duration histogram types + route
// =========================================================

/// Number of sessions that fell into one duration range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DurationBin {
    pub label: String,
    pub count: usize,
}

/// Payload of the duration histogram page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DurationHistogramData {
    pub title: String,
    pub bins: Vec<DurationBin>,
    pub chart: ChartData,
}

impl DurationHistogramData {
    /// Bar chart of `bins` for `date`.
    pub fn new(date: &str, bins: Vec<DurationBin>) -> Self {
        let chart = ChartData::single(
            bins.iter().map(|bin| bin.label.clone()).collect(),
            "Number of Students",
            bins.iter().map(|bin| bin.count as f64).collect(),
            ChartStyle::bar("rgba(75, 192, 192, 0.5)", "rgba(75, 192, 192, 1)"),
        );
        Self {
            title: format!("Students by Average Sleep Duration ({})", date),
            bins,
            chart,
        }
    }
}

/// Route path for the duration histogram page
pub const DURATIONS_PATH: &str = "/durations";
