use std::{borrow::Borrow, fmt};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{Coordinates, MISSING_VALUE, timestamp_from_json};

/// Name used for reports that arrive without a vessel name.
pub static UNNAMED_VESSEL: &str = "Unnamed vessel";

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VesselName(String);

/// A single position of a vessel as reported by the backend.
///
/// Coordinates that could not be read as numbers are kept as `NaN` so that the report
/// still participates in name bookkeeping while being excluded from anything drawn.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "WireReport")]
pub struct PositionReport {
    pub vessel_name: VesselName,
    pub latitude: f64,
    pub longitude: f64,
    pub observed_at: Option<DateTime<Utc>>,
    pub sequence_id: Option<i64>,
}

/// A raw GPS frame row as stored by the backend.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "WireReport")]
pub struct Frame {
    pub report: PositionReport,
    pub raw_frame: String,
    /// Latitude exactly as the backend sent it, for display.
    pub latitude_text: String,
    pub longitude_text: String,
    /// Vessel name as sent, `None` when the backend left it out.
    pub boat_name: Option<String>,
}

/// Wire shape shared by `/boats/latest` and `/frames` entries.
#[derive(Debug, Default, Deserialize)]
struct WireReport {
    #[serde(default)]
    boat_name: Option<String>,
    #[serde(default)]
    latitude: Option<Value>,
    #[serde(default)]
    longitude: Option<Value>,
    #[serde(default)]
    id: Option<Value>,
    #[serde(default)]
    date: Option<Value>,
    #[serde(default)]
    created_at: Option<Value>,
    #[serde(default)]
    timestamp: Option<Value>,
    #[serde(default)]
    raw_frame: Option<Value>,
}

impl VesselName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn eq_ignore_case(&self, other: &str) -> bool {
        self.0.to_lowercase() == other.to_lowercase()
    }
}

impl From<&str> for VesselName {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl AsRef<str> for VesselName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for VesselName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VesselName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl PositionReport {
    pub fn new(vessel_name: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            vessel_name: VesselName::new(vessel_name),
            latitude,
            longitude,
            observed_at: None,
            sequence_id: None,
        }
    }

    pub fn with_sequence_id(mut self, sequence_id: i64) -> Self {
        self.sequence_id = Some(sequence_id);
        self
    }

    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.latitude, self.longitude)
    }

    /// Coordinates of the report if both components are finite.
    pub fn valid_coordinates(&self) -> Option<Coordinates> {
        let c = self.coordinates();
        c.is_finite().then_some(c)
    }
}

impl AsRef<PositionReport> for PositionReport {
    fn as_ref(&self) -> &PositionReport {
        self
    }
}

impl AsRef<PositionReport> for Frame {
    fn as_ref(&self) -> &PositionReport {
        &self.report
    }
}

/// Lenient numeric read: numbers and numeric strings are accepted, everything else is `NaN`.
pub fn coordinate_from_json(value: Option<&Value>) -> f64 {
    match value {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(f64::NAN),
        Some(Value::String(s)) => s.trim().parse::<f64>().unwrap_or(f64::NAN),
        Some(Value::Null | Value::Bool(_) | Value::Array(_) | Value::Object(_)) | None => {
            f64::NAN
        }
    }
}

fn sequence_id_from_json(value: Option<&Value>) -> Option<i64> {
    match value? {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        Value::Null | Value::Bool(_) | Value::Array(_) | Value::Object(_) => None,
    }
}

fn display_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => MISSING_VALUE.to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(v) => v.to_string(),
    }
}

impl WireReport {
    fn vessel_name(&self) -> VesselName {
        match self.boat_name.as_deref() {
            Some(name) if !name.is_empty() => VesselName::new(name),
            _ => VesselName::new(UNNAMED_VESSEL),
        }
    }

    fn observed_at(&self) -> Option<DateTime<Utc>> {
        [&self.date, &self.created_at, &self.timestamp]
            .into_iter()
            .flatten()
            .find_map(timestamp_from_json)
    }
}

impl From<WireReport> for PositionReport {
    fn from(value: WireReport) -> Self {
        PositionReport {
            vessel_name: value.vessel_name(),
            latitude: coordinate_from_json(value.latitude.as_ref()),
            longitude: coordinate_from_json(value.longitude.as_ref()),
            observed_at: value.observed_at(),
            sequence_id: sequence_id_from_json(value.id.as_ref()),
        }
    }
}

impl From<WireReport> for Frame {
    fn from(value: WireReport) -> Self {
        let raw_frame = match &value.raw_frame {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(s)) => s.clone(),
            Some(v) => v.to_string(),
        };
        let latitude_text = display_text(value.latitude.as_ref());
        let longitude_text = display_text(value.longitude.as_ref());
        let boat_name = value.boat_name.clone().filter(|n| !n.is_empty());

        Frame {
            report: PositionReport::from(value),
            raw_frame,
            latitude_text,
            longitude_text,
            boat_name,
        }
    }
}
