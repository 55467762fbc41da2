//! `EnvDash` - environmental metrics dashboard
//!
//! Resolves a user coordinate to the nearest weather area, air-quality
//! region or sensor station and reports the current reading for each
//! selected metric, sourced from the public environmental data API.

pub mod api;
pub mod config;
pub mod data_gov;
pub mod error;
pub mod geo;
pub mod metrics;
pub mod models;
pub mod web;

// Re-export core types for public API
pub use config::DashboardConfig;
pub use data_gov::{DataGovClient, Endpoint, EnvironmentSource};
pub use error::DashboardError;
pub use geo::{GeographicSearch, Located, distance_km};
pub use metrics::Normalizer;
pub use models::{Candidate, Coordinate, CoordinateField, Metric, MetricResult, MetricValue};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, DashboardError>;
