//! OSRM HTTP adapter for nearest-road lookups.

use std::time::Duration;

use serde::Deserialize;

use crate::config::OsrmConfig;
use crate::coordinate::Coordinate;
use crate::error::SnapError;
use crate::traits::NearestRoadProvider;

#[derive(Debug, Clone)]
pub struct OsrmClient {
    config: OsrmConfig,
    client: reqwest::blocking::Client,
}

impl OsrmClient {
    pub fn new(config: OsrmConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }

    fn nearest_url(&self, point: &Coordinate) -> String {
        format!(
            "{}/nearest/v1/{}/{:.6},{:.6}?number=1",
            self.config.base_url, self.config.profile, point.lng, point.lat
        )
    }
}

impl NearestRoadProvider for OsrmClient {
    fn nearest(&self, point: &Coordinate) -> Result<Coordinate, SnapError> {
        let timeout = Duration::from_secs(self.config.timeout_secs);

        let body = self
            .client
            .get(self.nearest_url(point))
            .send()
            .and_then(|resp| resp.error_for_status())
            .and_then(|resp| resp.json::<OsrmNearestResponse>())
            .map_err(|err| SnapError::from_transport(err, timeout))?;

        body.waypoints
            .into_iter()
            .find_map(|waypoint| waypoint.location)
            .map(|[lng, lat]| Coordinate::new(lat, lng))
            .ok_or_else(|| SnapError::InvalidResponse("waypoint without location".to_string()))
    }
}

#[derive(Debug, Deserialize)]
struct OsrmNearestResponse {
    #[serde(default)]
    waypoints: Vec<OsrmWaypoint>,
}

#[derive(Debug, Deserialize)]
struct OsrmWaypoint {
    location: Option<[f64; 2]>,
}
