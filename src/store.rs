//! Route points persistence over the backend REST API.
//!
//! Points are keyed by route id and a 0-based, contiguous `point_order`.
//! Saving always replaces the whole sequence.

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::ApiConfig;
use crate::coordinate::Coordinate;
use crate::error::StoreError;
use crate::traits::RoutePointsStore;

/// A persisted route point row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutePoint {
    #[serde(default)]
    pub id: Option<i64>,
    pub route_id: String,
    pub point_order: i64,
    pub lat: f64,
    pub lng: f64,
}

impl RoutePoint {
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.lat, self.lng)
    }
}

/// Rows for `route_id` numbered 0.. in path order, as a replace would store them.
pub fn to_route_points(route_id: &str, points: &[Coordinate]) -> Vec<RoutePoint> {
    points
        .iter()
        .enumerate()
        .map(|(order, point)| RoutePoint {
            id: None,
            route_id: route_id.to_string(),
            point_order: order as i64,
            lat: point.lat,
            lng: point.lng,
        })
        .collect()
}

/// Order persisted rows by `point_order` and check it runs 0, 1, 2, ...
pub fn hydrate(route_id: &str, mut rows: Vec<RoutePoint>) -> Result<Vec<Coordinate>, StoreError> {
    rows.sort_by_key(|row| row.point_order);

    for (expected, row) in rows.iter().enumerate() {
        if row.point_order != expected as i64 {
            return Err(StoreError::NonContiguousOrder {
                route_id: route_id.to_string(),
                expected,
                found: row.point_order,
            });
        }
    }

    Ok(rows.iter().map(RoutePoint::coordinate).collect())
}

#[derive(Debug, Deserialize)]
struct PointsResponse {
    #[serde(default)]
    points: Vec<RoutePoint>,
}

#[derive(Debug, Deserialize)]
struct ReplaceResponse {
    #[serde(default)]
    count: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
struct ApiErrorBody {
    error: Option<String>,
    message: Option<String>,
}

#[derive(Debug, Serialize)]
struct ReplaceRequest<'a> {
    points: &'a [Coordinate],
}

#[derive(Debug, Clone)]
pub struct ApiRouteStore {
    config: ApiConfig,
    client: reqwest::blocking::Client,
}

impl ApiRouteStore {
    pub fn new(config: ApiConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(config.timeout)
            .build()?;

        Ok(Self { config, client })
    }

    fn points_url(&self, route_id: &str) -> String {
        format!("{}/routes/{}/points", self.config.base_url, route_id)
    }

    fn timeout(&self) -> Duration {
        self.config.timeout
    }

    fn execute<T: DeserializeOwned>(
        &self,
        request: reqwest::blocking::RequestBuilder,
    ) -> Result<T, StoreError> {
        let response = request
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .map_err(|err| StoreError::from_transport(err, self.timeout()))?;

        let status = response.status();
        let text = response
            .text()
            .map_err(|err| StoreError::from_transport(err, self.timeout()))?;

        if !status.is_success() {
            let body: ApiErrorBody = serde_json::from_str(&text).unwrap_or_default();
            let message = body
                .error
                .or(body.message)
                .unwrap_or_else(|| format!("HTTP_{}", status.as_u16()));
            return Err(StoreError::Http {
                status: status.as_u16(),
                message,
            });
        }

        let text = if text.trim().is_empty() { "{}" } else { text.as_str() };
        serde_json::from_str(text).map_err(|err| StoreError::InvalidResponse(err.to_string()))
    }
}

impl RoutePointsStore for ApiRouteStore {
    fn fetch_points(&self, route_id: &str) -> Result<Vec<RoutePoint>, StoreError> {
        let body: PointsResponse = self.execute(self.client.get(self.points_url(route_id)))?;
        debug!(route_id, points = body.points.len(), "fetched route points");
        Ok(body.points)
    }

    fn replace_points(&self, route_id: &str, points: &[Coordinate]) -> Result<(), StoreError> {
        let token = self.config.access_token.as_deref().ok_or(StoreError::Unauthorized)?;

        let request = self
            .client
            .put(self.points_url(route_id))
            .bearer_auth(token)
            .json(&ReplaceRequest { points });
        let body: ReplaceResponse = self.execute(request)?;

        info!(route_id, sent = points.len(), stored = ?body.count, "replaced route points");
        Ok(())
    }
}
