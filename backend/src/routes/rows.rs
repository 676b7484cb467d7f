use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::chart::{ChartData, ChartStyle};
use crate::services::row_classifier::RowBucket;

// =========================================================
// Row distribution types + route
// =========================================================

/// Qualifying detections per seat row. All four rows are always present.
///
/// Serialized as `{"1": n, "2": n, "3": n, "4": n}`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "BTreeMap<u8, usize>", from = "BTreeMap<u8, usize>")]
pub struct RowOccupancy {
    counts: [usize; 4],
}

impl RowOccupancy {
    pub fn new(counts: [usize; 4]) -> Self {
        Self { counts }
    }

    pub fn get(&self, bucket: RowBucket) -> usize {
        self.counts[bucket.index()]
    }

    pub fn increment(&mut self, bucket: RowBucket) {
        self.counts[bucket.index()] += 1;
    }

    pub fn counts(&self) -> [usize; 4] {
        self.counts
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// No qualifying detections in any row.
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

impl From<RowOccupancy> for BTreeMap<u8, usize> {
    fn from(value: RowOccupancy) -> Self {
        RowBucket::ALL
            .iter()
            .map(|bucket| (bucket.number(), value.get(*bucket)))
            .collect()
    }
}

impl From<BTreeMap<u8, usize>> for RowOccupancy {
    fn from(value: BTreeMap<u8, usize>) -> Self {
        let mut counts = [0; 4];
        for bucket in RowBucket::ALL {
            counts[bucket.index()] = value.get(&bucket.number()).copied().unwrap_or(0);
        }
        Self { counts }
    }
}

/// Payload of the row distribution page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowDistributionData {
    pub title: String,
    pub occupancy: RowOccupancy,
    pub chart: ChartData,
}

impl RowDistributionData {
    /// Bar chart of `occupancy` for `date`, front row first.
    pub fn new(date: &str, occupancy: RowOccupancy) -> Self {
        let chart = ChartData::single(
            RowBucket::ALL.iter().map(|bucket| bucket.label()).collect(),
            "Sleep Detections",
            occupancy.counts().iter().map(|n| *n as f64).collect(),
            ChartStyle::bar("rgba(255, 99, 132, 0.5)", "rgba(255, 99, 132, 1)"),
        );
        Self {
            title: format!("Most Frequently Sleeping Rows ({})", date),
            occupancy,
            chart,
        }
    }
}

/// Route path for the row distribution page
pub const ROWS_PATH: &str = "/rows";
