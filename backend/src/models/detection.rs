// ============================================================================
// Store documents and the records flattened out of them
// ============================================================================
//
// Every day is one store document keyed by its date. The document body is a
// map from entry id to entry payload. Payloads are loosely typed on the wire,
// so every field is defaulted rather than validated.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::api::DateKey;

/// Key that is never an entry inside a day document.
const RESERVED_ID_KEY: &str = "id";

/// One document as returned by a collection read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawDocument {
    /// Document ID, which is also the day's [`DateKey`].
    pub id: String,
    /// Entry id → entry payload.
    #[serde(default)]
    pub data: Map<String, Value>,
}

impl RawDocument {
    pub fn new(id: impl Into<String>, data: Map<String, Value>) -> Self {
        Self {
            id: id.into(),
            data,
        }
    }

    pub fn date_key(&self) -> DateKey {
        DateKey::new(self.id.clone())
    }

    /// Iterate over the entry payloads, skipping the reserved `id` key.
    pub fn entries(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.data.iter().filter(|(key, _)| key.as_str() != RESERVED_ID_KEY)
    }
}

/// Normalized bounding box of a detected region, all edges in `[0, 1]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CoordsRelative {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x1: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y1: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x2: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y2: Option<f64>,
}

impl CoordsRelative {
    fn from_value(value: &Value) -> Option<Self> {
        let obj = value.as_object()?;
        Some(Self {
            x1: numeric(obj.get("x1")),
            y1: numeric(obj.get("y1")),
            x2: numeric(obj.get("x2")),
            y2: numeric(obj.get("y2")),
        })
    }

    /// Top edge usable for row classification.
    ///
    /// A top edge of exactly `0.0` counts as missing.
    pub fn classifiable_top(&self) -> Option<f64> {
        self.y1.filter(|y| *y != 0.0 && !y.is_nan())
    }
}

/// One camera detection event inside a day document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionRecord {
    pub id: String,
    pub date: DateKey,
    pub unix_timestamp: Option<f64>,
    pub image_url: Option<String>,
    /// Camera that captured the event; `0` when the payload has none.
    pub camera_id: i64,
    pub coords: Option<CoordsRelative>,
    /// Seconds of sleep attributed to this detection; `0.0` when absent.
    pub total_duration: f64,
    pub sleep_count: f64,
}

impl DetectionRecord {
    /// Build a record from one entry payload. Non-object payloads yield `None`.
    pub fn from_entry(date: &DateKey, id: &str, payload: &Value) -> Option<Self> {
        let obj = payload.as_object()?;
        Some(Self {
            id: id.to_string(),
            date: date.clone(),
            unix_timestamp: numeric(obj.get("unix_timestamp")),
            image_url: obj
                .get("url_image")
                .and_then(Value::as_str)
                .map(str::to_string),
            camera_id: obj.get("camera_id").and_then(integer).unwrap_or(0),
            coords: obj.get("coords_rel").and_then(CoordsRelative::from_value),
            total_duration: numeric(obj.get("total_duration")).unwrap_or(0.0),
            sleep_count: numeric(obj.get("sleep_count")).unwrap_or(0.0),
        })
    }
}

/// One student's sleep session summary inside a `duration` day document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DurationSession {
    pub id: String,
    pub date: DateKey,
    /// Average sleep duration in seconds. `None` when missing or non-numeric.
    pub duration_seconds: Option<f64>,
}

impl DurationSession {
    pub fn new(id: impl Into<String>, date: DateKey, duration_seconds: Option<f64>) -> Self {
        Self {
            id: id.into(),
            date,
            duration_seconds,
        }
    }

    fn from_entry(date: &DateKey, id: &str, payload: &Value) -> Self {
        Self {
            id: id.to_string(),
            date: date.clone(),
            duration_seconds: numeric(payload.get("duration")),
        }
    }
}

/// Flatten `sleep` documents into detection records, in document order.
pub fn extract_detections(documents: &[RawDocument]) -> Vec<DetectionRecord> {
    documents
        .iter()
        .flat_map(|doc| {
            let date = doc.date_key();
            doc.entries()
                .filter_map(|(id, payload)| DetectionRecord::from_entry(&date, id, payload))
                .collect::<Vec<_>>()
        })
        .collect()
}

/// Flatten `duration` documents into sessions, in document order.
pub fn extract_sessions(documents: &[RawDocument]) -> Vec<DurationSession> {
    documents
        .iter()
        .flat_map(|doc| {
            let date = doc.date_key();
            doc.entries()
                .map(|(id, payload)| DurationSession::from_entry(&date, id, payload))
                .collect::<Vec<_>>()
        })
        .collect()
}

/// Numbers are accepted as JSON numbers or numeric strings.
fn numeric(value: Option<&Value>) -> Option<f64> {
    match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
        _ => None,
    }
}

/// Camera ids are compared strictly, so only integral JSON numbers qualify.
fn integer(value: &Value) -> Option<i64> {
    value.as_i64().or_else(|| {
        value
            .as_f64()
            .filter(|v| v.fract() == 0.0 && v.is_finite())
            .map(|v| v as i64)
    })
}
