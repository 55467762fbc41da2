//! Canned upstream payloads and an in-memory source for tests

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use serde_json::{Value, json};

use crate::Result;
use crate::data_gov::{Endpoint, EnvironmentSource};
use crate::error::DashboardError;

/// Serves fixed payloads; endpoints without one fail like an unreachable host.
#[derive(Default)]
pub struct FixtureSource {
    payloads: HashMap<Endpoint, Value>,
}

impl FixtureSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every endpoint answered with the payloads below
    pub fn complete() -> Self {
        Self::new()
            .with(Endpoint::TwoHourForecast, two_hour_forecast())
            .with(Endpoint::FourDayForecast, four_day_forecast())
            .with(
                Endpoint::AirTemperature,
                stations(&[("S109", 31.2), ("S50", 30.4), ("S107", 29.8)]),
            )
            .with(
                Endpoint::RelativeHumidity,
                stations(&[("S109", 71.0), ("S50", 74.5), ("S107", 80.1)]),
            )
            .with(
                Endpoint::Rainfall,
                stations(&[("S109", 0.0), ("S50", 0.2), ("S107", 1.4)]),
            )
            .with(Endpoint::Pm25, regions("pm25_one_hourly"))
            .with(Endpoint::Psi, regions("psi_twenty_four_hourly"))
            .with(Endpoint::UvIndex, uv_index())
    }

    pub fn with(mut self, endpoint: Endpoint, payload: Value) -> Self {
        self.payloads.insert(endpoint, payload);
        self
    }

    pub fn without(mut self, endpoint: Endpoint) -> Self {
        self.payloads.remove(&endpoint);
        self
    }
}

#[async_trait]
impl EnvironmentSource for FixtureSource {
    async fn fetch(&self, endpoint: Endpoint, _at: DateTime<Utc>) -> Result<Value> {
        self.payloads
            .get(&endpoint)
            .cloned()
            .ok_or_else(|| DashboardError::upstream(format!("{} unreachable", endpoint.path())))
    }
}

pub fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 6, 40, 0).unwrap()
}

/// Near the Clementi area and the S50 station
pub const CLEMENTI: (f64, f64) = (1.33, 103.78);

pub fn two_hour_forecast() -> Value {
    json!({
        "area_metadata": [
            { "name": "Ang Mo Kio", "label_location": { "latitude": 1.375, "longitude": 103.839 } },
            { "name": "Bedok", "label_location": { "latitude": 1.321, "longitude": 103.924 } },
            { "name": "Clementi", "label_location": { "latitude": 1.315, "longitude": 103.76 } }
        ],
        "items": [{
            "update_timestamp": "2024-05-01T14:38:50+08:00",
            "timestamp": "2024-05-01T14:30:00+08:00",
            "valid_period": {
                "start": "2024-05-01T14:30:00+08:00",
                "end": "2024-05-01T16:30:00+08:00"
            },
            "forecasts": [
                { "area": "Ang Mo Kio", "forecast": "Partly Cloudy (Day)" },
                { "area": "Bedok", "forecast": "Light Showers" },
                { "area": "Clementi", "forecast": "Thundery Showers" }
            ]
        }],
        "api_info": { "status": "healthy" }
    })
}

pub fn four_day_forecast() -> Value {
    let days = [
        ("2024-05-02", "Afternoon thundery showers"),
        ("2024-05-03", "Partly cloudy"),
        ("2024-05-04", "Late morning showers"),
        ("2024-05-05", "Fair and warm"),
    ];
    let forecasts: Vec<Value> = days
        .iter()
        .map(|(date, text)| {
            json!({
                "date": date,
                "forecast": text,
                "temperature": { "low": 25, "high": 34 },
                "relative_humidity": { "low": 60, "high": 95 },
                "wind": { "speed": { "low": 10, "high": 20 }, "direction": "SSE" },
                "timestamp": format!("{date}T00:00:00+08:00")
            })
        })
        .collect();

    json!({
        "items": [{
            "update_timestamp": "2024-05-01T11:45:21+08:00",
            "timestamp": "2024-05-01T11:30:00+08:00",
            "forecasts": forecasts
        }],
        "api_info": { "status": "healthy" }
    })
}

/// Station payload in the shape of the temperature/humidity/rainfall endpoints
pub fn stations(readings: &[(&str, f64)]) -> Value {
    let readings: Vec<Value> = readings
        .iter()
        .map(|(id, value)| json!({ "station_id": id, "value": value }))
        .collect();

    json!({
        "metadata": {
            "stations": [
                {
                    "id": "S109", "device_id": "S109", "name": "Ang Mo Kio Avenue 5",
                    "location": { "latitude": 1.3764, "longitude": 103.8492 }
                },
                {
                    "id": "S50", "device_id": "S50", "name": "Clementi Road",
                    "location": { "latitude": 1.3337, "longitude": 103.7768 }
                },
                {
                    "id": "S107", "device_id": "S107", "name": "East Coast Parkway",
                    "location": { "latitude": 1.3135, "longitude": 103.9625 }
                }
            ],
            "reading_type": "DBT 1M F",
            "reading_unit": "deg C"
        },
        "items": [{
            "timestamp": "2024-05-01T14:35:00+08:00",
            "readings": readings
        }],
        "api_info": { "status": "healthy" }
    })
}

/// Region payload in the shape of the PM2.5/PSI endpoints
pub fn regions(reading_key: &str) -> Value {
    let mut readings = serde_json::Map::new();
    readings.insert(
        reading_key.to_string(),
        json!({ "national": 12, "west": 12, "east": 9, "central": 14, "south": 10, "north": 8 }),
    );

    json!({
        "region_metadata": [
            { "name": "west", "label_location": { "latitude": 1.35735, "longitude": 103.7 } },
            { "name": "national", "label_location": { "latitude": 0, "longitude": 0 } },
            { "name": "east", "label_location": { "latitude": 1.35735, "longitude": 103.94 } },
            { "name": "central", "label_location": { "latitude": 1.35735, "longitude": 103.82 } },
            { "name": "south", "label_location": { "latitude": 1.29587, "longitude": 103.82 } },
            { "name": "north", "label_location": { "latitude": 1.41803, "longitude": 103.82 } }
        ],
        "items": [{
            "timestamp": "2024-05-01T14:00:00+08:00",
            "update_timestamp": "2024-05-01T14:08:52+08:00",
            "readings": readings
        }],
        "api_info": { "status": "healthy" }
    })
}

pub fn uv_index() -> Value {
    json!({
        "items": [{
            "timestamp": "2024-05-01T14:00:00+08:00",
            "update_timestamp": "2024-05-01T14:07:12+08:00",
            "index": [
                { "value": 7, "timestamp": "2024-05-01T14:00:00+08:00" },
                { "value": 6, "timestamp": "2024-05-01T13:00:00+08:00" }
            ]
        }],
        "api_info": { "status": "healthy" }
    })
}
