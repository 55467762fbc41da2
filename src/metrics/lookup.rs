//! Navigation helpers over upstream JSON payloads

use chrono::{DateTime, NaiveDateTime};
use serde_json::Value;
use tracing::debug;

use crate::Result;
use crate::error::DashboardError;
use crate::models::location::id_string;
use crate::models::{Candidate, CoordinateField, MetricValue};

/// Where name-keyed readings live in a payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameReadings {
    /// Object keyed by region name, e.g. `{"north": 8, "south": 10}`
    Keyed(&'static str),
    /// Array of entries each carrying its own key and value fields
    Listed {
        pointer: &'static str,
        key: &'static str,
        value: &'static str,
    },
}

pub fn pointer<'a>(payload: &'a Value, path: &str) -> Result<&'a Value> {
    payload
        .pointer(path)
        .ok_or_else(|| DashboardError::payload(format!("missing {path}")))
}

fn array<'a>(payload: &'a Value, path: &str) -> Result<&'a Vec<Value>> {
    pointer(payload, path)?
        .as_array()
        .ok_or_else(|| DashboardError::payload(format!("{path} is not an array")))
}

/// Collect every candidate listed under `path`.
pub fn candidates(payload: &Value, path: &str, field: CoordinateField) -> Result<Vec<Candidate>> {
    let entries = array(payload, path)?;
    let candidates = entries
        .iter()
        .map(|entry| Candidate::from_json(entry, field))
        .collect::<Result<Vec<_>>>()?;
    debug!("{} candidates under {}", candidates.len(), path);
    Ok(candidates)
}

/// Convert a raw reading into a tile value.
pub fn reading_value(raw: &Value) -> Result<MetricValue> {
    match raw {
        Value::Number(n) => n
            .as_f64()
            .map(MetricValue::Number)
            .ok_or_else(|| DashboardError::payload(format!("unrepresentable reading {n}"))),
        Value::String(text) => Ok(MetricValue::Text(text.clone())),
        other => Err(DashboardError::payload(format!(
            "unexpected reading {other}"
        ))),
    }
}

/// Find the reading recorded under a region or area name.
pub fn by_name<'a>(payload: &'a Value, readings: NameReadings, name: &str) -> Result<&'a Value> {
    let found = match readings {
        NameReadings::Keyed(path) => pointer(payload, path)?.get(name),
        NameReadings::Listed {
            pointer: path,
            key,
            value,
        } => array(payload, path)?
            .iter()
            .find(|entry| entry.get(key).and_then(Value::as_str) == Some(name))
            .and_then(|entry| entry.get(value)),
    };
    found.ok_or_else(|| DashboardError::not_found(format!("no reading for '{name}'")))
}

/// Find the reading entry whose `station_id` matches `id`.
pub fn station_reading<'a>(payload: &'a Value, path: &str, id: &str) -> Result<&'a Value> {
    array(payload, path)?
        .iter()
        .find(|entry| {
            entry
                .get("station_id")
                .and_then(id_string)
                .is_some_and(|station| station == id)
        })
        .ok_or_else(|| DashboardError::not_found(format!("no reading for station {id}")))
}

/// Map a station id back to the station's display name.
pub fn station_name<'a>(stations: &'a [Candidate], id: &str) -> Result<&'a str> {
    stations
        .iter()
        .find(|station| station.id.as_deref() == Some(id))
        .map(|station| station.name.as_str())
        .ok_or_else(|| DashboardError::not_found(format!("unknown station {id}")))
}

/// `HH:MM` of an ISO-8601 timestamp, in the timestamp's own offset.
///
/// Returns `None` when the input does not parse.
#[must_use]
pub fn time_of_day(raw: &str) -> Option<String> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.format("%H:%M").to_string());
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S")
        .ok()
        .map(|parsed| parsed.format("%H:%M").to_string())
}

/// Uppercase the first character only; the rest is left untouched.
#[must_use]
pub fn capitalize_first(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
