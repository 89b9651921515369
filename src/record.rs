// src/record.rs
//! Positional fix records and their per-point metadata

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Open property bag attached to a record. Insertion order is preserved.
pub type Props = serde_json::Map<String, serde_json::Value>;

/// Position and accuracy figures of a single fix, as reported by the device
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coords {
    pub longitude: f64,
    pub latitude: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub altitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accuracy: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub altitude_accuracy: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heading: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed: Option<f64>,
}

impl Coords {
    pub fn new(longitude: f64, latitude: f64) -> Self {
        Self {
            longitude,
            latitude,
            altitude: None,
            accuracy: None,
            altitude_accuracy: None,
            heading: None,
            speed: None,
        }
    }

    /// Whether this fix carries an altitude component
    pub fn has_altitude(&self) -> bool {
        self.altitude.is_some()
    }

    /// `lon,lat[,alt]` as used by markup coordinate blocks
    pub fn to_coordinate_string(&self) -> String {
        match self.altitude {
            Some(alt) => format!("{},{},{}", self.longitude, self.latitude, alt),
            None => format!("{},{}", self.longitude, self.latitude),
        }
    }
}

/// Identifier of a record or of a whole collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Number(serde_json::Number),
    Text(String),
}

impl RecordId {
    /// Interpret a property value as an identifier. Only strings and numbers qualify.
    pub fn from_value(value: &serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::String(s) => Some(RecordId::Text(s.clone())),
            serde_json::Value::Number(n) => Some(RecordId::Number(n.clone())),
            _ => None,
        }
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Number(n) => write!(f, "{}", n),
            RecordId::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        RecordId::Text(value.to_string())
    }
}

impl From<String> for RecordId {
    fn from(value: String) -> Self {
        RecordId::Text(value)
    }
}

impl From<u64> for RecordId {
    fn from(value: u64) -> Self {
        RecordId::Number(value.into())
    }
}

impl From<i64> for RecordId {
    fn from(value: i64) -> Self {
        RecordId::Number(value.into())
    }
}

impl From<RecordId> for geojson::feature::Id {
    fn from(value: RecordId) -> Self {
        match value {
            RecordId::Number(n) => geojson::feature::Id::Number(n),
            RecordId::Text(s) => geojson::feature::Id::String(s),
        }
    }
}

/// One timestamped positional fix with optional id and properties
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionalRecord {
    pub coords: Coords,
    #[serde(default)]
    pub mocked: bool,
    /// Milliseconds since the Unix epoch
    pub timestamp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub props: Option<Props>,
}

impl PositionalRecord {
    pub fn new(coords: Coords, timestamp: i64) -> Self {
        Self {
            coords,
            mocked: false,
            timestamp,
            id: None,
            props: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<RecordId>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_props(mut self, props: Props) -> Self {
        self.props = Some(props);
        self
    }

    /// Copy of this record without altitude or altitude accuracy.
    /// The original is left untouched.
    pub fn flatten(&self) -> PositionalRecord {
        let mut flat = self.clone();
        flat.coords.altitude = None;
        flat.coords.altitude_accuracy = None;
        flat
    }

    /// Capture time as an RFC 3339 UTC string with millisecond precision
    pub fn iso_time(&self) -> Option<String> {
        format_timestamp(self.timestamp)
    }

    /// Look up a string-valued property
    pub fn prop_str(&self, key: &str) -> Option<&str> {
        self.props.as_ref()?.get(key)?.as_str()
    }
}

/// Format epoch milliseconds the way JavaScript's `toISOString` does
pub fn format_timestamp(millis: i64) -> Option<String> {
    DateTime::<Utc>::from_timestamp_millis(millis)
        .map(|dt| dt.to_rfc3339_opts(SecondsFormat::Millis, true))
}
