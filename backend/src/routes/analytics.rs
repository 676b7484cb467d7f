use serde::{Deserialize, Serialize};

use super::chart::{ChartData, ChartStyle};

/// Dataset label of the sleep count line.
pub const SLEEP_COUNT_LABEL: &str = "Number of Sleeping Students";

/// Sleep count over the selected day, as a line chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSeriesData {
    pub title: String,
    pub chart: ChartData,
}

impl TimeSeriesData {
    /// Line chart of `values` against clock `labels` for `date`.
    pub fn new(date: &str, labels: Vec<String>, values: Vec<f64>) -> Self {
        Self {
            title: format!("Sleep Count on {}", date),
            chart: ChartData::single(
                labels,
                SLEEP_COUNT_LABEL,
                values,
                ChartStyle::filled_line("#3b82f6", "rgba(59, 130, 246, 0.2)", 0.3),
            ),
        }
    }
}

/// Route path for the sleep count page
pub const ANALYTICS_PATH: &str = "/analytics";
