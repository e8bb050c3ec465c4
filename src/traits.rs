//! Seams between the trace pipeline and its external collaborators.
//!
//! The pipeline only depends on these interfaces; concrete HTTP adapters live
//! in `batch`, `osrm` and `store`, and tests supply their own mocks.

use std::sync::Arc;

use crate::coordinate::Coordinate;
use crate::error::{SnapError, StoreError};
use crate::store::RoutePoint;

/// Turns an ordered coordinate sequence into a road-aligned one.
///
/// Implementations read the slice and return a new sequence in the same path
/// order; they never mutate the caller's trace.
pub trait RoadSnapper {
    fn snap(&self, points: &[Coordinate]) -> Result<Vec<Coordinate>, SnapError>;

    /// Whether the returned sequence is already free of near-duplicates.
    fn dedupes_server_side(&self) -> bool {
        false
    }
}

impl<T: RoadSnapper + ?Sized> RoadSnapper for &T {
    fn snap(&self, points: &[Coordinate]) -> Result<Vec<Coordinate>, SnapError> {
        (**self).snap(points)
    }

    fn dedupes_server_side(&self) -> bool {
        (**self).dedupes_server_side()
    }
}

impl<T: RoadSnapper + ?Sized> RoadSnapper for Arc<T> {
    fn snap(&self, points: &[Coordinate]) -> Result<Vec<Coordinate>, SnapError> {
        (**self).snap(points)
    }

    fn dedupes_server_side(&self) -> bool {
        (**self).dedupes_server_side()
    }
}

/// Single-coordinate nearest-road lookup.
pub trait NearestRoadProvider {
    fn nearest(&self, point: &Coordinate) -> Result<Coordinate, SnapError>;
}

/// Persisted route points, keyed by route id and `point_order`.
pub trait RoutePointsStore {
    /// Points for a route, in whatever order the backend returns them.
    fn fetch_points(&self, route_id: &str) -> Result<Vec<RoutePoint>, StoreError>;

    /// Replace the whole point sequence of a route. Never a partial patch.
    fn replace_points(&self, route_id: &str, points: &[Coordinate]) -> Result<(), StoreError>;
}
