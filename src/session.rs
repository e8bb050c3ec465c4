//! Route trace editing session.
//!
//! Owns the draft trace (only mutated by tap/undo/clear), the supersedable
//! preview, and the save path. Snapping always works on a snapshot of the
//! draft and hands back a new sequence.

use std::sync::Arc;
use std::thread::{self, JoinHandle};

use tracing::{info, warn};

use crate::coordinate::Coordinate;
use crate::error::{CommitError, SnapError, StoreError};
use crate::haversine::polyline_distance_km;
use crate::pipeline::SnapPipeline;
use crate::preview::{PreviewSnapshot, PreviewTracker};
use crate::store::hydrate;
use crate::traits::{RoadSnapper, RoutePointsStore};

/// A preview request bound to the generation it was issued with.
#[derive(Debug)]
pub struct PreviewRequest {
    generation: u64,
    points: Vec<Coordinate>,
    tracker: PreviewTracker,
}

impl PreviewRequest {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn points(&self) -> &[Coordinate] {
        &self.points
    }

    /// Run the pipeline and apply the result if still current.
    pub fn run<S: RoadSnapper>(self, pipeline: &SnapPipeline<S>) -> bool {
        let result = pipeline.build(&self.points).map(|outcome| outcome.points);
        self.resolve(result)
    }

    pub fn resolve(self, result: Result<Vec<Coordinate>, SnapError>) -> bool {
        self.tracker.resolve(self.generation, result)
    }
}

/// Outcome of a successful save.
#[derive(Debug, Clone, PartialEq)]
pub struct CommitOutcome {
    pub route_id: String,
    pub points: Vec<Coordinate>,
    pub distance_km: f64,
    /// Snap error swallowed by the densified fallback, if any.
    pub degraded: Option<SnapError>,
}

#[derive(Debug, Default)]
pub struct DraftSession {
    draft: Vec<Coordinate>,
    preview: PreviewTracker,
}

impl DraftSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start editing an existing route from its persisted points.
    pub fn hydrate<St: RoutePointsStore>(route_id: &str, store: &St) -> Result<Self, StoreError> {
        let rows = store.fetch_points(route_id)?;
        Ok(Self::from_points(hydrate(route_id, rows)?))
    }

    pub fn from_points(points: Vec<Coordinate>) -> Self {
        Self {
            draft: points,
            preview: PreviewTracker::new(),
        }
    }

    pub fn points(&self) -> &[Coordinate] {
        &self.draft
    }

    pub fn len(&self) -> usize {
        self.draft.len()
    }

    pub fn is_empty(&self) -> bool {
        self.draft.is_empty()
    }

    pub fn append(&mut self, point: Coordinate) {
        self.draft.push(point);
        self.preview.invalidate();
    }

    pub fn undo(&mut self) -> Option<Coordinate> {
        let removed = self.draft.pop();
        if removed.is_some() {
            self.preview.invalidate();
        }
        removed
    }

    pub fn clear(&mut self) {
        self.draft.clear();
        self.preview.invalidate();
    }

    pub fn preview(&self) -> PreviewSnapshot {
        self.preview.snapshot()
    }

    pub fn preview_tracker(&self) -> &PreviewTracker {
        &self.preview
    }

    /// Snapped preview when available, otherwise the raw draft.
    pub fn display_points(&self) -> Vec<Coordinate> {
        self.preview
            .snapshot()
            .snapped
            .unwrap_or_else(|| self.draft.clone())
    }

    /// Issue a preview request for the current draft.
    ///
    /// With fewer than 2 points the preview is cleared, in-flight requests are
    /// superseded, and `None` is returned.
    pub fn request_preview(&self) -> Option<PreviewRequest> {
        if self.draft.len() < 2 {
            self.preview.invalidate();
            return None;
        }

        Some(PreviewRequest {
            generation: self.preview.issue(),
            points: self.draft.clone(),
            tracker: self.preview.clone(),
        })
    }

    /// Compute the preview on the calling thread.
    pub fn refresh_preview<S: RoadSnapper>(&self, pipeline: &SnapPipeline<S>) -> bool {
        match self.request_preview() {
            Some(request) => request.run(pipeline),
            None => false,
        }
    }

    /// Compute the preview on a background thread.
    pub fn spawn_preview<S>(&self, pipeline: Arc<SnapPipeline<S>>) -> Option<JoinHandle<bool>>
    where
        S: RoadSnapper + Send + Sync + 'static,
    {
        let request = self.request_preview()?;
        Some(thread::spawn(move || request.run(&pipeline)))
    }

    /// Recompute the snapped trace from the current draft and persist it,
    /// replacing every stored point of `route_id`.
    pub fn commit<S, St>(
        &self,
        route_id: &str,
        pipeline: &SnapPipeline<S>,
        store: &St,
    ) -> Result<CommitOutcome, CommitError>
    where
        S: RoadSnapper,
        St: RoutePointsStore,
    {
        if self.draft.len() < 2 {
            return Err(CommitError::TooFewPoints(self.draft.len()));
        }

        let outcome = pipeline.build(&self.draft)?;
        if outcome.points.len() < 2 {
            return Err(CommitError::Truncated {
                expected_at_least: 2,
                got: outcome.points.len(),
            });
        }
        if let Some(err) = &outcome.degraded {
            warn!(route_id, code = err.code(), "saving unsnapped trace");
        }

        store.replace_points(route_id, &outcome.points)?;
        info!(route_id, points = outcome.points.len(), "route trace saved");

        Ok(CommitOutcome {
            route_id: route_id.to_string(),
            distance_km: polyline_distance_km(&outcome.points),
            points: outcome.points,
            degraded: outcome.degraded,
        })
    }
}
