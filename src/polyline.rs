//! Polyline representation for route traces.
//!
//! Holds the decoded coordinate sequence plus the two local, non-suspending
//! transformations of the pipeline: densification before snapping and
//! near-duplicate collapsing after it.

use serde::{Deserialize, Serialize};

use crate::coordinate::Coordinate;
use crate::haversine::polyline_distance_km;

/// A route trace as an ordered coordinate sequence (insertion order = path order).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Polyline {
    points: Vec<Coordinate>,
}

impl Polyline {
    pub fn new(points: Vec<Coordinate>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[Coordinate] {
        &self.points
    }

    pub fn into_points(self) -> Vec<Coordinate> {
        self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn densified(&self, steps_per_segment: usize) -> Polyline {
        Polyline::new(densify(&self.points, steps_per_segment))
    }

    pub fn deduped(&self, epsilon: f64) -> Polyline {
        Polyline::new(dedupe(&self.points, epsilon))
    }

    /// Total great-circle length in km, rounded to 2 decimals.
    pub fn distance_km(&self) -> f64 {
        polyline_distance_km(&self.points)
    }
}

impl From<Vec<Coordinate>> for Polyline {
    fn from(points: Vec<Coordinate>) -> Self {
        Self::new(points)
    }
}

/// Replace every consecutive pair `(a, b)` with `steps_per_segment` evenly
/// spaced points ending at `b`, keeping `points[0]` as the first element.
///
/// Output length is `1 + (n - 1) * steps_per_segment`. Inputs with fewer than
/// two points are returned unchanged. A step count of 0 is treated as 1.
pub fn densify(points: &[Coordinate], steps_per_segment: usize) -> Vec<Coordinate> {
    if points.len() < 2 {
        return points.to_vec();
    }

    let steps = steps_per_segment.max(1);
    let mut dense = Vec::with_capacity(1 + (points.len() - 1) * steps);
    dense.push(points[0]);

    for pair in points.windows(2) {
        let (from, to) = (&pair[0], &pair[1]);
        for step in 1..=steps {
            dense.push(from.lerp(to, step as f64 / steps as f64));
        }
    }

    dense
}

/// Drop points whose lat and lng deltas from the last kept point are both
/// within `epsilon`. The first point is always kept.
pub fn dedupe(points: &[Coordinate], epsilon: f64) -> Vec<Coordinate> {
    let mut kept: Vec<Coordinate> = Vec::with_capacity(points.len());

    for point in points {
        match kept.last() {
            Some(last)
                if (point.lat - last.lat).abs() <= epsilon
                    && (point.lng - last.lng).abs() <= epsilon => {}
            _ => kept.push(*point),
        }
    }

    kept
}
