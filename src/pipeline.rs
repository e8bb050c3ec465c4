//! Build a road-snapped polyline from a draft trace: densify, snap, dedupe.

use tracing::{debug, warn};

use crate::config::SnapConfig;
use crate::coordinate::Coordinate;
use crate::error::SnapError;
use crate::polyline::{dedupe, densify};
use crate::traits::RoadSnapper;

/// What the pipeline does when the snapper fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackPolicy {
    /// Return the snap error to the caller.
    Strict,
    /// Return the densified, unsnapped trace and report the error alongside it.
    Densified,
}

#[derive(Debug, Clone)]
pub struct PipelineOptions {
    pub steps_per_segment: usize,
    pub dedupe_epsilon: f64,
    pub fallback: FallbackPolicy,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self::from(&SnapConfig::default())
    }
}

impl From<&SnapConfig> for PipelineOptions {
    fn from(config: &SnapConfig) -> Self {
        Self {
            steps_per_segment: config.steps_per_segment,
            dedupe_epsilon: config.dedupe_epsilon,
            fallback: config.fallback,
        }
    }
}

/// Result of a pipeline run.
#[derive(Debug, Clone, PartialEq)]
pub struct SnapOutcome {
    pub points: Vec<Coordinate>,
    /// Set when the snapper failed and the densified trace was returned instead.
    pub degraded: Option<SnapError>,
}

impl SnapOutcome {
    pub fn is_degraded(&self) -> bool {
        self.degraded.is_some()
    }
}

#[derive(Debug, Clone)]
pub struct SnapPipeline<S> {
    snapper: S,
    options: PipelineOptions,
}

impl<S: RoadSnapper> SnapPipeline<S> {
    pub fn new(snapper: S, options: PipelineOptions) -> Self {
        Self { snapper, options }
    }

    pub fn options(&self) -> &PipelineOptions {
        &self.options
    }

    pub fn snapper(&self) -> &S {
        &self.snapper
    }

    /// Snap `points` to the road network.
    ///
    /// Fewer than 2 points are returned unchanged without calling the snapper.
    pub fn build(&self, points: &[Coordinate]) -> Result<SnapOutcome, SnapError> {
        if points.len() < 2 {
            return Ok(SnapOutcome {
                points: points.to_vec(),
                degraded: None,
            });
        }

        let dense = densify(points, self.options.steps_per_segment);
        debug!(input_points = points.len(), dense_points = dense.len(), "densified trace");

        match self.snapper.snap(&dense) {
            Ok(snapped) if self.snapper.dedupes_server_side() => Ok(SnapOutcome {
                points: snapped,
                degraded: None,
            }),
            Ok(snapped) => Ok(SnapOutcome {
                points: dedupe(&snapped, self.options.dedupe_epsilon),
                degraded: None,
            }),
            Err(err) => match self.options.fallback {
                FallbackPolicy::Strict => Err(err),
                FallbackPolicy::Densified => {
                    warn!(error = %err, code = err.code(), "snap failed, using densified trace");
                    Ok(SnapOutcome {
                        points: dense,
                        degraded: Some(err),
                    })
                }
            },
        }
    }
}
