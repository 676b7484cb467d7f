//! Pairing of camera 1 and camera 2 detections into table rows.

use std::collections::HashMap;

use crate::api::{CameraCapture, DateKey, TimeRow};
use crate::models::{format_clock, ClockFormat, DetectionRecord};
use crate::services::row_occupancy::row_status;

impl From<&DetectionRecord> for CameraCapture {
    fn from(record: &DetectionRecord) -> Self {
        Self {
            image_url: record.image_url.clone(),
            coords: record.coords,
            total_duration: record.total_duration,
            row_status: row_status(record.coords.as_ref(), record.total_duration),
        }
    }
}

/// Group detections into one row per formatted capture time.
///
/// Times are rendered as `HH:MM:SS` shifted by `offset_hours`. With a
/// `date_filter`, records from other days are skipped. Camera 1 and camera 2
/// fill their own slot; any other camera id is dropped. When two records
/// land in the same slot, the later one replaces the earlier.
///
/// Rows come back in first-seen order; see [`sort_rows_by_time`].
pub fn group_by_time(
    records: &[DetectionRecord],
    date_filter: Option<&DateKey>,
    offset_hours: i32,
) -> Vec<TimeRow> {
    let mut rows: Vec<TimeRow> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();

    for record in records {
        if date_filter.is_some_and(|date| *date != record.date) {
            continue;
        }

        let time = format_clock(
            record.unix_timestamp,
            offset_hours,
            ClockFormat::HourMinuteSecond,
        );
        let position = *positions.entry(time.clone()).or_insert_with(|| {
            rows.push(TimeRow::new(time, record.coords, record.total_duration));
            rows.len() - 1
        });

        let row = &mut rows[position];
        match record.camera_id {
            1 => row.camera1 = Some(CameraCapture::from(record)),
            2 => row.camera2 = Some(CameraCapture::from(record)),
            _ => {}
        }
    }

    rows
}

/// Order rows by their clock string, earliest first.
pub fn sort_rows_by_time(rows: &mut [TimeRow]) {
    rows.sort_by(|a, b| a.time.cmp(&b.time));
}
