//! Per-row counts of detections that carry sleep time.

use crate::api::RowOccupancy;
use crate::models::{CoordsRelative, DetectionRecord};
use crate::services::row_classifier::{classify_row, RowBucket};

/// Row of a detection that counts as sleeping, if any.
///
/// A detection qualifies when it has a non-zero top edge and a positive
/// total duration.
pub fn qualifying_bucket(coords: Option<&CoordsRelative>, total_duration: f64) -> Option<RowBucket> {
    let top = coords?.classifiable_top()?;
    if total_duration > 0.0 {
        Some(classify_row(top))
    } else {
        None
    }
}

/// Sleeping flags for the four rows of a single capture.
pub fn row_status(coords: Option<&CoordsRelative>, total_duration: f64) -> [bool; 4] {
    let mut status = [false; 4];
    if let Some(bucket) = qualifying_bucket(coords, total_duration) {
        status[bucket.index()] = true;
    }
    status
}

/// Count qualifying detections per row for one day.
///
/// Only records whose date key equals `date_filter` exactly contribute, so
/// an empty filter matches no record.
pub fn aggregate_row_occupancy(records: &[DetectionRecord], date_filter: &str) -> RowOccupancy {
    let mut occupancy = RowOccupancy::default();
    records
        .iter()
        .filter(|record| record.date.as_str() == date_filter)
        .filter_map(|record| qualifying_bucket(record.coords.as_ref(), record.total_duration))
        .for_each(|bucket| occupancy.increment(bucket));
    occupancy
}
