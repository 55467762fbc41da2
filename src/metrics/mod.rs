//! Metric normalizer
//!
//! Each dashboard tile is produced the same way: fetch the metric's
//! endpoint, resolve the nearest region or station where the metric is
//! spatial, look up its reading and validity time, and fold everything into
//! a [`MetricResult`]. Any failure on the way yields an unavailable result
//! instead of an error, so one broken endpoint never takes down the others.

pub mod lookup;
pub mod table;

#[cfg(test)]
pub(crate) mod fixtures;

use std::sync::Arc;

use chrono::{DateTime, Days, Local, NaiveDate, Utc};
use futures::future::join_all;
use serde_json::Value;
use tracing::{info, instrument, warn};

use crate::Result;
use crate::data_gov::EnvironmentSource;
use crate::error::DashboardError;
use crate::geo::GeographicSearch;
use crate::models::location::id_string;
use crate::models::{Coordinate, Metric, MetricResult};

pub use lookup::NameReadings;
pub use table::{MetricSpec, Resolution};

/// Weekday name of `today + offset` days, e.g. `"Thursday"`.
#[must_use]
pub fn forecast_day_label(today: NaiveDate, offset: u8) -> String {
    today
        .checked_add_days(Days::new(u64::from(offset)))
        .unwrap_or(today)
        .format("%A")
        .to_string()
}

/// Build the tile for `metric` out of an already fetched payload.
///
/// `origin` is required for area, region and station metrics and ignored
/// for national and daily ones.
pub fn extract(
    spec: &MetricSpec,
    metric: Metric,
    payload: &Value,
    origin: Option<&Coordinate>,
    title: String,
) -> Result<MetricResult> {
    let raw_time = lookup::pointer(payload, spec.time_valid)?
        .as_str()
        .ok_or_else(|| DashboardError::payload(format!("{} is not a string", spec.time_valid)))?;
    let time_validity = lookup::time_of_day(raw_time);

    let (value, location) = match spec.resolution {
        Resolution::ByName {
            candidates,
            field,
            readings,
            capitalize,
        } => {
            let origin = require_origin(metric, origin)?;
            let candidates = lookup::candidates(payload, candidates, field)?;
            let nearest = GeographicSearch::nearest(origin, &candidates)?;
            let value = lookup::reading_value(lookup::by_name(payload, readings, &nearest.name)?)?;
            let location = if capitalize {
                lookup::capitalize_first(&nearest.name)
            } else {
                nearest.name.clone()
            };
            (value, Some(location))
        }
        Resolution::ById {
            candidates,
            field,
            readings,
        } => {
            let origin = require_origin(metric, origin)?;
            let stations = lookup::candidates(payload, candidates, field)?;
            let nearest = GeographicSearch::nearest(origin, &stations)?;
            let id = nearest.id.as_deref().ok_or_else(|| {
                DashboardError::payload(format!("station '{}' has no id", nearest.name))
            })?;
            let reading = lookup::station_reading(payload, readings, id)?;
            let value = lookup::reading_value(lookup::pointer(reading, "/value")?)?;
            let reading_station = reading
                .get("station_id")
                .and_then(id_string)
                .ok_or_else(|| DashboardError::payload("reading without station_id"))?;
            let location = lookup::station_name(&stations, &reading_station)?.to_string();
            (value, Some(location))
        }
        Resolution::National { value } => {
            (lookup::reading_value(lookup::pointer(payload, value)?)?, None)
        }
        Resolution::Daily { forecasts } => {
            let Metric::Forecast { day } = metric else {
                return Err(DashboardError::validation(format!(
                    "{metric} has no forecast day"
                )));
            };
            let days = lookup::pointer(payload, forecasts)?
                .as_array()
                .ok_or_else(|| DashboardError::payload(format!("{forecasts} is not an array")))?;
            let entry = days.get(usize::from(day)).ok_or_else(|| {
                DashboardError::payload(format!(
                    "forecast day {day} requested, {} available",
                    days.len()
                ))
            })?;
            (lookup::reading_value(lookup::pointer(entry, "/forecast")?)?, None)
        }
    };

    Ok(MetricResult {
        title,
        value,
        location,
        time_validity,
        unit: spec.unit.to_string(),
    })
}

fn require_origin(metric: Metric, origin: Option<&Coordinate>) -> Result<&Coordinate> {
    origin.ok_or_else(|| DashboardError::validation(format!("{metric} needs a query coordinate")))
}

/// Produces dashboard tiles from an [`EnvironmentSource`]
#[derive(Clone)]
pub struct Normalizer {
    source: Arc<dyn EnvironmentSource>,
}

impl Normalizer {
    pub fn new(source: Arc<dyn EnvironmentSource>) -> Self {
        Self { source }
    }

    /// Resolve one metric. Never fails; upstream or payload problems
    /// produce [`MetricResult::unavailable`]. The coordinate is only
    /// consulted for spatial metrics.
    pub async fn resolve(
        &self,
        metric: Metric,
        origin: &Coordinate,
        now: DateTime<Utc>,
    ) -> MetricResult {
        self.resolve_at(metric, metric.is_spatial().then_some(origin), now)
            .await
    }

    #[instrument(skip_all, fields(metric = %metric))]
    async fn resolve_at(
        &self,
        metric: Metric,
        origin: Option<&Coordinate>,
        now: DateTime<Utc>,
    ) -> MetricResult {
        let spec = MetricSpec::for_metric(metric);
        let title = match metric {
            Metric::Forecast { day } => {
                forecast_day_label(now.with_timezone(&Local).date_naive(), day)
            }
            _ => spec.title.to_string(),
        };

        self.source
            .fetch(spec.endpoint, now)
            .await
            .and_then(|payload| extract(&spec, metric, &payload, origin, title.clone()))
            .unwrap_or_else(|e| {
                warn!("{} unavailable: {}", metric, e);
                MetricResult::unavailable(title, spec.unit)
            })
    }

    /// Resolve every requested metric concurrently, in request order.
    pub async fn dashboard(
        &self,
        origin: &Coordinate,
        metrics: &[Metric],
        now: DateTime<Utc>,
    ) -> Vec<MetricResult> {
        info!(
            "Resolving {} metrics near {}",
            metrics.len(),
            origin.format_coordinates()
        );
        let results = join_all(
            metrics
                .iter()
                .map(|metric| self.resolve(*metric, origin, now)),
        )
        .await;

        let unavailable = results.iter().filter(|r| !r.is_available()).count();
        if unavailable > 0 {
            warn!("{} of {} metrics unavailable", unavailable, results.len());
        }
        results
    }

    pub async fn weather(&self, origin: &Coordinate, now: DateTime<Utc>) -> MetricResult {
        self.resolve(Metric::Weather, origin, now).await
    }

    pub async fn temperature(&self, origin: &Coordinate, now: DateTime<Utc>) -> MetricResult {
        self.resolve(Metric::Temperature, origin, now).await
    }

    pub async fn humidity(&self, origin: &Coordinate, now: DateTime<Utc>) -> MetricResult {
        self.resolve(Metric::Humidity, origin, now).await
    }

    pub async fn rainfall(&self, origin: &Coordinate, now: DateTime<Utc>) -> MetricResult {
        self.resolve(Metric::Rainfall, origin, now).await
    }

    pub async fn pm25(&self, origin: &Coordinate, now: DateTime<Utc>) -> MetricResult {
        self.resolve(Metric::Pm25, origin, now).await
    }

    pub async fn psi(&self, origin: &Coordinate, now: DateTime<Utc>) -> MetricResult {
        self.resolve(Metric::Psi, origin, now).await
    }

    /// Nationwide; no coordinate involved
    pub async fn uv_index(&self, now: DateTime<Utc>) -> MetricResult {
        self.resolve_at(Metric::UvIndex, None, now).await
    }

    /// 4-day outlook entry `day` days from today; no coordinate involved
    pub async fn forecast(&self, day: u8, now: DateTime<Utc>) -> MetricResult {
        self.resolve_at(Metric::Forecast { day }, None, now).await
    }
}
