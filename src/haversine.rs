//! Great-circle distance over route traces.
//!
//! Straight-line per segment, so a densified or road-snapped trace reports a
//! more realistic length than the raw taps.

use crate::coordinate::Coordinate;

/// Earth radius in kilometers.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine distance between two points in kilometers.
pub fn haversine_km(from: &Coordinate, to: &Coordinate) -> f64 {
    let lat1_rad = from.lat.to_radians();
    let lat2_rad = to.lat.to_radians();
    let delta_lat = (to.lat - from.lat).to_radians();
    let delta_lng = (to.lng - from.lng).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Sum of segment lengths in km, rounded to 2 decimals. Zero for < 2 points.
pub fn polyline_distance_km(points: &[Coordinate]) -> f64 {
    if points.len() < 2 {
        return 0.0;
    }

    let total: f64 = points
        .windows(2)
        .map(|pair| haversine_km(&pair[0], &pair[1]))
        .sum();

    (total * 100.0).round() / 100.0
}
