//! Metric selection and the normalized per-metric result record

use std::fmt::{self, Display};
use std::str::FromStr;

use serde::{Serialize, Serializer};

use crate::error::DashboardError;

/// Wire form of [`MetricValue::Unavailable`]
pub const UNAVAILABLE: &str = "Unavailable";

/// Number of days covered by the 4-day outlook
pub const FORECAST_DAYS: u8 = 4;

/// A dashboard tile the user can select
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    /// 2-hour forecast text for the nearest area
    Weather,
    /// 4-day outlook, `day` days from today
    Forecast { day: u8 },
    Temperature,
    Humidity,
    Rainfall,
    Pm25,
    Psi,
    /// Single nationwide value
    UvIndex,
}

impl Metric {
    /// Every tile, with today's outlook standing in for the forecast days
    pub const DEFAULT_SELECTION: [Metric; 8] = [
        Metric::Weather,
        Metric::Forecast { day: 0 },
        Metric::Temperature,
        Metric::Humidity,
        Metric::Rainfall,
        Metric::Pm25,
        Metric::Psi,
        Metric::UvIndex,
    ];

    /// Whether the metric needs a query coordinate
    #[must_use]
    pub fn is_spatial(self) -> bool {
        !matches!(self, Metric::Forecast { .. } | Metric::UvIndex)
    }

    /// Parse a comma separated selection such as `"temperature, pm25,forecast1"`.
    pub fn parse_selection(raw: &str) -> Result<Vec<Metric>, DashboardError> {
        raw.split(',')
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .map(str::parse)
            .collect()
    }
}

impl FromStr for Metric {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        let metric = match key.as_str() {
            "weather" => Metric::Weather,
            "temperature" => Metric::Temperature,
            "humidity" => Metric::Humidity,
            "rainfall" => Metric::Rainfall,
            "pm25" => Metric::Pm25,
            "psi" => Metric::Psi,
            "uv" => Metric::UvIndex,
            other => {
                let day = other
                    .strip_prefix("forecast")
                    .and_then(|d| d.parse::<u8>().ok())
                    .filter(|d| *d < FORECAST_DAYS)
                    .ok_or_else(|| DashboardError::validation(format!("unknown metric '{s}'")))?;
                Metric::Forecast { day }
            }
        };
        Ok(metric)
    }
}

impl Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Metric::Weather => write!(f, "weather"),
            Metric::Forecast { day } => write!(f, "forecast{day}"),
            Metric::Temperature => write!(f, "temperature"),
            Metric::Humidity => write!(f, "humidity"),
            Metric::Rainfall => write!(f, "rainfall"),
            Metric::Pm25 => write!(f, "pm25"),
            Metric::Psi => write!(f, "psi"),
            Metric::UvIndex => write!(f, "uv"),
        }
    }
}

/// A reading as shown on a tile
#[derive(Debug, Clone, PartialEq)]
pub enum MetricValue {
    Number(f64),
    Text(String),
    /// Upstream failed; distinct from an absent value
    Unavailable,
}

impl Serialize for MetricValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            MetricValue::Number(n) => serializer.serialize_f64(*n),
            MetricValue::Text(text) => serializer.serialize_str(text),
            MetricValue::Unavailable => serializer.serialize_str(UNAVAILABLE),
        }
    }
}

impl Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricValue::Number(n) => write!(f, "{n}"),
            MetricValue::Text(text) => write!(f, "{text}"),
            MetricValue::Unavailable => write!(f, "{UNAVAILABLE}"),
        }
    }
}

/// Normalized output of one metric
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricResult {
    pub title: String,
    pub value: MetricValue,
    pub location: Option<String>,
    /// `HH:MM` of the reading's validity timestamp
    pub time_validity: Option<String>,
    pub unit: String,
}

impl MetricResult {
    /// The record returned when anything between fetch and lookup failed
    #[must_use]
    pub fn unavailable(title: impl Into<String>, unit: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            value: MetricValue::Unavailable,
            location: None,
            time_validity: None,
            unit: unit.into(),
        }
    }

    #[must_use]
    pub fn is_available(&self) -> bool {
        self.value != MetricValue::Unavailable
    }
}
