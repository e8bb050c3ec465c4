//! Batch snap strategy: one POST with the whole trace.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::{ApiConfig, SnapConfig};
use crate::coordinate::Coordinate;
use crate::error::SnapError;
use crate::traits::RoadSnapper;

#[derive(Debug, Serialize)]
struct SnapRequest<'a> {
    points: &'a [Coordinate],
    steps_per_segment: usize,
    dedupe_epsilon: f64,
}

#[derive(Debug, Deserialize)]
struct SnapResponse {
    #[serde(default)]
    ok: bool,
    points: Option<Vec<Coordinate>>,
    error: Option<String>,
}

#[derive(Debug, Clone)]
pub struct BatchSnapClient {
    endpoint: String,
    timeout: Duration,
    steps_per_segment: usize,
    dedupe_epsilon: f64,
    client: reqwest::blocking::Client,
}

impl BatchSnapClient {
    pub fn new(api: &ApiConfig, snap: &SnapConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(snap.timeout)
            .build()?;

        Ok(Self {
            endpoint: format!("{}{}", api.base_url, snap.snap_path),
            timeout: snap.timeout,
            steps_per_segment: snap.server_steps_per_segment,
            dedupe_epsilon: snap.dedupe_epsilon,
            client,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl RoadSnapper for BatchSnapClient {
    fn snap(&self, points: &[Coordinate]) -> Result<Vec<Coordinate>, SnapError> {
        debug!(endpoint = %self.endpoint, input_points = points.len(), "snap request");

        let request = SnapRequest {
            points,
            steps_per_segment: self.steps_per_segment,
            dedupe_epsilon: self.dedupe_epsilon,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .map_err(|err| SnapError::from_transport(err, self.timeout))?;

        let status = response.status();
        debug!(status = status.as_u16(), "snap response");
        if !status.is_success() {
            return Err(SnapError::Http(status.as_u16()));
        }

        let body = response
            .json::<SnapResponse>()
            .map_err(|err| SnapError::from_transport(err, self.timeout))?;

        let points = parse_snap_response(body)?;
        info!(output_points = points.len(), "snap ok");
        Ok(points)
    }

    fn dedupes_server_side(&self) -> bool {
        true
    }
}

fn parse_snap_response(body: SnapResponse) -> Result<Vec<Coordinate>, SnapError> {
    let rejected = |body_error: Option<String>| {
        SnapError::InvalidResponse(body_error.unwrap_or_else(|| "missing points".to_string()))
    };

    if !body.ok {
        return Err(rejected(body.error));
    }
    match body.points {
        Some(points) if points.len() >= 2 => Ok(points),
        Some(points) => Err(SnapError::InvalidResponse(format!(
            "expected at least 2 points, got {}",
            points.len()
        ))),
        None => Err(rejected(body.error)),
    }
}
