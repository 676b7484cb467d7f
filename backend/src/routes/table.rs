use serde::{Deserialize, Serialize};

use crate::models::CoordsRelative;

// =========================================================
// Detection table types + route
// =========================================================

/// One camera's capture shown in a table cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CameraCapture {
    pub image_url: Option<String>,
    pub coords: Option<CoordsRelative>,
    pub total_duration: f64,
    /// Seat rows flagged as sleeping in the drill-down panel, front row first.
    pub row_status: [bool; 4],
}

/// Table row pairing the two cameras' captures that share a clock time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeRow {
    /// Capture time as `HH:MM:SS` in display time.
    pub time: String,
    pub camera1: Option<CameraCapture>,
    pub camera2: Option<CameraCapture>,
    /// Coordinates of the record that opened this row.
    pub coords: Option<CoordsRelative>,
    /// Duration of the record that opened this row.
    pub total_duration: f64,
}

impl TimeRow {
    pub fn new(time: impl Into<String>, coords: Option<CoordsRelative>, total_duration: f64) -> Self {
        Self {
            time: time.into(),
            camera1: None,
            camera2: None,
            coords,
            total_duration,
        }
    }
}

/// Payload of the detection table page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableData {
    pub rows: Vec<TimeRow>,
    pub total: usize,
}

/// Route path for the detection table page
pub const TABLE_PATH: &str = "/table";
