//! Data models for the EnvDash dashboard
//!
//! - Location: query coordinates and labeled regions/stations
//! - Metric: tile selection and the normalized result record

pub mod location;
pub mod metric;

pub use location::{Candidate, Coordinate, CoordinateField};
pub use metric::{Metric, MetricResult, MetricValue, UNAVAILABLE};
