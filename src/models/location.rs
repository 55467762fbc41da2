//! Location model for query coordinates and labeled reference points

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::Result;
use crate::error::DashboardError;

/// Coordinates in decimal degrees. No range validation is applied here.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct Coordinate {
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
}

impl Coordinate {
    /// Create a new coordinate
    #[must_use]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Format coordinate as a string
    #[must_use]
    pub fn format_coordinates(&self) -> String {
        format!("{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

/// Name of the field under which a metadata entry nests its coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordinateField {
    /// Weather areas and air-quality regions
    LabelLocation,
    /// Sensor stations
    Location,
}

impl CoordinateField {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            CoordinateField::LabelLocation => "label_location",
            CoordinateField::Location => "location",
        }
    }
}

/// A region or sensor station reported by the upstream metadata
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct Candidate {
    /// Display name (region names arrive lowercased)
    pub name: String,
    /// Station id, distinct from the name. Regions have none.
    pub id: Option<String>,
    pub coordinate: Coordinate,
}

impl Candidate {
    #[must_use]
    pub fn new(name: impl Into<String>, coordinate: Coordinate) -> Self {
        Self {
            name: name.into(),
            id: None,
            coordinate,
        }
    }

    /// Build a candidate from one metadata entry, reading its coordinate from `field`.
    pub fn from_json(entry: &Value, field: CoordinateField) -> Result<Self> {
        let name = entry
            .get("name")
            .and_then(Value::as_str)
            .ok_or_else(|| DashboardError::payload("metadata entry without a name"))?;

        let nested = entry.get(field.as_str()).ok_or_else(|| {
            DashboardError::payload(format!("'{name}' has no '{}' field", field.as_str()))
        })?;
        let latitude = nested.get("latitude").and_then(Value::as_f64);
        let longitude = nested.get("longitude").and_then(Value::as_f64);
        let (Some(latitude), Some(longitude)) = (latitude, longitude) else {
            return Err(DashboardError::payload(format!(
                "'{name}' has a non-numeric '{}'",
                field.as_str()
            )));
        };

        Ok(Self {
            name: name.to_string(),
            id: entry.get("id").and_then(id_string),
            coordinate: Coordinate::new(latitude, longitude),
        })
    }
}

/// Station ids show up both as strings ("S109") and as bare numbers.
pub(crate) fn id_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
