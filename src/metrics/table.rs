//! Per-metric configuration: which endpoint to call and where each
//! payload keeps its candidates, readings and validity timestamp.

use crate::data_gov::Endpoint;
use crate::models::{CoordinateField, Metric};

use super::lookup::NameReadings;

/// How a metric turns a payload into a single reading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Nearest region/area, reading looked up by its name
    ByName {
        candidates: &'static str,
        field: CoordinateField,
        readings: NameReadings,
        capitalize: bool,
    },
    /// Nearest station, reading matched by station id, name resolved from the id
    ById {
        candidates: &'static str,
        field: CoordinateField,
        readings: &'static str,
    },
    /// One nationwide value
    National { value: &'static str },
    /// Entry of the multi-day outlook selected by day offset
    Daily { forecasts: &'static str },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricSpec {
    pub title: &'static str,
    pub endpoint: Endpoint,
    pub unit: &'static str,
    /// Pointer to the timestamp shown as the tile's validity
    pub time_valid: &'static str,
    pub resolution: Resolution,
}

const STATIONS: Resolution = Resolution::ById {
    candidates: "/metadata/stations",
    field: CoordinateField::Location,
    readings: "/items/0/readings",
};

const fn regions(readings: &'static str) -> Resolution {
    Resolution::ByName {
        candidates: "/region_metadata",
        field: CoordinateField::LabelLocation,
        readings: NameReadings::Keyed(readings),
        capitalize: true,
    }
}

impl MetricSpec {
    #[must_use]
    pub fn for_metric(metric: Metric) -> Self {
        match metric {
            Metric::Weather => Self {
                title: "Weather",
                endpoint: Endpoint::TwoHourForecast,
                unit: "",
                time_valid: "/items/0/valid_period/end",
                resolution: Resolution::ByName {
                    candidates: "/area_metadata",
                    field: CoordinateField::LabelLocation,
                    readings: NameReadings::Listed {
                        pointer: "/items/0/forecasts",
                        key: "area",
                        value: "forecast",
                    },
                    capitalize: false,
                },
            },
            Metric::Forecast { .. } => Self {
                title: "Forecast",
                endpoint: Endpoint::FourDayForecast,
                unit: "",
                time_valid: "/items/0/update_timestamp",
                resolution: Resolution::Daily {
                    forecasts: "/items/0/forecasts",
                },
            },
            Metric::Temperature => Self {
                title: "Temperature",
                endpoint: Endpoint::AirTemperature,
                unit: "°C",
                time_valid: "/items/0/timestamp",
                resolution: STATIONS,
            },
            Metric::Humidity => Self {
                title: "Humidity",
                endpoint: Endpoint::RelativeHumidity,
                unit: "%",
                time_valid: "/items/0/timestamp",
                resolution: STATIONS,
            },
            Metric::Rainfall => Self {
                title: "Rainfall",
                endpoint: Endpoint::Rainfall,
                unit: "mm",
                time_valid: "/items/0/timestamp",
                resolution: STATIONS,
            },
            Metric::Pm25 => Self {
                title: "PM2.5",
                endpoint: Endpoint::Pm25,
                unit: "µg/m³",
                time_valid: "/items/0/update_timestamp",
                resolution: regions("/items/0/readings/pm25_one_hourly"),
            },
            Metric::Psi => Self {
                title: "PSI",
                endpoint: Endpoint::Psi,
                unit: "",
                time_valid: "/items/0/update_timestamp",
                resolution: regions("/items/0/readings/psi_twenty_four_hourly"),
            },
            Metric::UvIndex => Self {
                title: "UV Index",
                endpoint: Endpoint::UvIndex,
                unit: "",
                time_valid: "/items/0/index/0/timestamp",
                resolution: Resolution::National {
                    value: "/items/0/index/0/value",
                },
            },
        }
    }
}
