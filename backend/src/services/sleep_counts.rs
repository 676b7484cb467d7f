//! Sleep count over the course of one day.

use crate::api::DateKey;
use crate::models::{format_clock, ClockFormat, DetectionRecord};

/// Clock labels and sleep counts of one day, in capture order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SleepCountSeries {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

impl SleepCountSeries {
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// Build the series for `date`, ordered by timestamp.
///
/// Records without a usable timestamp sort first and are labelled `00:00`.
/// Labels are UTC `HH:MM`.
pub fn sleep_count_series(records: &[DetectionRecord], date: &DateKey) -> SleepCountSeries {
    let mut day: Vec<&DetectionRecord> = records.iter().filter(|r| r.date == *date).collect();
    day.sort_by(|a, b| {
        let ta = a.unix_timestamp.unwrap_or(0.0);
        let tb = b.unix_timestamp.unwrap_or(0.0);
        ta.total_cmp(&tb)
    });

    SleepCountSeries {
        labels: day
            .iter()
            .map(|r| format_clock(r.unix_timestamp, 0, ClockFormat::HourMinute))
            .collect(),
        values: day.iter().map(|r| r.sleep_count).collect(),
    }
}
