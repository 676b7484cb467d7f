//! Decoding of Firestore REST typed values into plain JSON.
//!
//! The REST API wraps every field as `{"<kind>Value": ...}`. Integers arrive
//! as decimal strings.

use serde::Deserialize;
use serde_json::{Map, Number, Value};

/// One document as listed by the REST API.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FirestoreDocument {
    /// Full resource name ending in `/documents/{collection}/{id}`.
    pub name: String,
    #[serde(default)]
    pub fields: Map<String, Value>,
}

impl FirestoreDocument {
    /// Document ID, the last segment of the resource name.
    pub fn id(&self) -> &str {
        self.name.rsplit('/').next().unwrap_or(&self.name)
    }

    /// Field map decoded into plain JSON.
    pub fn decoded_fields(&self) -> Map<String, Value> {
        decode_fields(&self.fields)
    }
}

/// One page of a collection listing.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListDocumentsResponse {
    #[serde(default)]
    pub documents: Vec<FirestoreDocument>,
    #[serde(default)]
    pub next_page_token: Option<String>,
}

pub fn decode_fields(fields: &Map<String, Value>) -> Map<String, Value> {
    fields
        .iter()
        .map(|(key, value)| (key.clone(), decode_value(value)))
        .collect()
}

/// Decode one typed value. Unknown wrappers decode to `null`.
pub fn decode_value(value: &Value) -> Value {
    let Some(obj) = value.as_object() else {
        return Value::Null;
    };
    let Some((kind, inner)) = obj.iter().next() else {
        return Value::Null;
    };

    match kind.as_str() {
        "stringValue" | "timestampValue" | "referenceValue" | "bytesValue" => inner.clone(),
        "booleanValue" => inner.clone(),
        "nullValue" => Value::Null,
        "integerValue" => decode_integer(inner),
        "doubleValue" => decode_double(inner),
        "mapValue" => {
            let fields = inner
                .get("fields")
                .and_then(Value::as_object)
                .map(decode_fields)
                .unwrap_or_default();
            Value::Object(fields)
        }
        "arrayValue" => {
            let values = inner
                .get("values")
                .and_then(Value::as_array)
                .map(|values| values.iter().map(decode_value).collect())
                .unwrap_or_default();
            Value::Array(values)
        }
        "geoPointValue" => {
            let mut point = Map::new();
            for axis in ["latitude", "longitude"] {
                point.insert(
                    axis.to_string(),
                    inner.get(axis).cloned().unwrap_or(Value::from(0.0)),
                );
            }
            Value::Object(point)
        }
        other => {
            log::debug!("Unknown Firestore value kind {}", other);
            Value::Null
        }
    }
}

fn decode_integer(inner: &Value) -> Value {
    match inner {
        Value::String(s) => s
            .parse::<i64>()
            .map(Value::from)
            .unwrap_or_else(|_| Value::String(s.clone())),
        Value::Number(_) => inner.clone(),
        _ => Value::Null,
    }
}

fn decode_double(inner: &Value) -> Value {
    match inner {
        Value::Number(_) => inner.clone(),
        // NaN and Infinity are sent as strings and have no JSON number form.
        Value::String(s) => s
            .parse::<f64>()
            .ok()
            .and_then(Number::from_f64)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        _ => Value::Null,
    }
}
