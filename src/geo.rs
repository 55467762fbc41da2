//! Great-circle distance and nearest-point resolution
//!
//! Weather areas, air-quality regions and sensor stations all resolve the
//! same way: scan the candidates in order and keep the one closest to the
//! query coordinate.

use crate::Result;
use crate::error::DashboardError;
use crate::models::{Candidate, Coordinate};

/// Anything carrying a coordinate that can be resolved against
pub trait Located {
    fn coordinate(&self) -> Coordinate;
}

impl Located for Coordinate {
    fn coordinate(&self) -> Coordinate {
        *self
    }
}

impl Located for Candidate {
    fn coordinate(&self) -> Coordinate {
        self.coordinate
    }
}

/// Haversine distance in kilometres over a sphere of radius 6371 km.
#[must_use]
pub fn distance_km(from: &Coordinate, to: &Coordinate) -> f64 {
    haversine::distance(
        haversine::Location {
            latitude: from.latitude,
            longitude: from.longitude,
        },
        haversine::Location {
            latitude: to.latitude,
            longitude: to.longitude,
        },
        haversine::Units::Kilometers,
    )
}

/// Geographic search functionality
pub struct GeographicSearch;

impl GeographicSearch {
    /// Find the candidate closest to `origin`.
    ///
    /// Equidistant candidates resolve to the one listed first. An empty
    /// slice is a [`DashboardError::NotFound`].
    pub fn nearest<'a, T: Located>(origin: &Coordinate, candidates: &'a [T]) -> Result<&'a T> {
        let (first, rest) = candidates
            .split_first()
            .ok_or_else(|| DashboardError::not_found("no candidates to resolve against"))?;

        let mut nearest = first;
        let mut min_distance = distance_km(origin, &first.coordinate());
        for candidate in rest {
            let distance = distance_km(origin, &candidate.coordinate());
            if distance < min_distance {
                min_distance = distance;
                nearest = candidate;
            }
        }

        Ok(nearest)
    }
}
