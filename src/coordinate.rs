//! WGS84 coordinate type shared by every stage of the trace pipeline.

use serde::{Deserialize, Serialize};

/// Default axis delta below which two coordinates are the same point (~1.1 m).
pub const DEFAULT_DEDUPE_EPSILON: f64 = 0.00001;

/// A latitude/longitude pair in decimal degrees. No altitude.
///
/// Serializes as `{"lat": .., "lng": ..}`, the form used by both the snap
/// endpoint and the route points API.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// True when both axis deltas are below `epsilon`.
    pub fn approx_eq(&self, other: &Coordinate, epsilon: f64) -> bool {
        (self.lat - other.lat).abs() < epsilon && (self.lng - other.lng).abs() < epsilon
    }

    /// Linear interpolation towards `to`; `t = 1.0` yields `to` exactly.
    pub fn lerp(&self, to: &Coordinate, t: f64) -> Coordinate {
        if t >= 1.0 {
            return *to;
        }
        Coordinate {
            lat: self.lat + (to.lat - self.lat) * t,
            lng: self.lng + (to.lng - self.lng) * t,
        }
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((lat, lng): (f64, f64)) -> Self {
        Self { lat, lng }
    }
}

impl From<Coordinate> for (f64, f64) {
    fn from(coord: Coordinate) -> Self {
        (coord.lat, coord.lng)
    }
}
