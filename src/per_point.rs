//! Per-point snap strategy: one nearest-road lookup per coordinate.
//!
//! A failed lookup is handled by an explicit [`PointFailurePolicy`] instead of
//! failing the whole trace. Parallel lookups run on the rayon pool; results are
//! always reassembled by input position, never by completion order.

use rayon::prelude::*;
use tracing::debug;

use crate::coordinate::Coordinate;
use crate::error::SnapError;
use crate::traits::{NearestRoadProvider, RoadSnapper};

/// What to do with a point whose lookup failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointFailurePolicy {
    /// Keep the unsnapped input coordinate in place.
    KeepOriginal,
    /// Leave the point out of the output.
    Drop,
    /// Fail the whole trace with the first error in input order.
    Propagate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Concurrency {
    Sequential,
    Parallel,
}

#[derive(Debug, Clone)]
pub struct PerPointSnapper<P> {
    provider: P,
    on_failure: PointFailurePolicy,
    concurrency: Concurrency,
}

impl<P> PerPointSnapper<P>
where
    P: NearestRoadProvider + Sync,
{
    pub fn new(provider: P, on_failure: PointFailurePolicy, concurrency: Concurrency) -> Self {
        Self {
            provider,
            on_failure,
            concurrency,
        }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    fn lookup_all(&self, points: &[Coordinate]) -> Vec<Result<Coordinate, SnapError>> {
        match self.concurrency {
            Concurrency::Sequential => points.iter().map(|p| self.provider.nearest(p)).collect(),
            Concurrency::Parallel => points.par_iter().map(|p| self.provider.nearest(p)).collect(),
        }
    }
}

impl<P> RoadSnapper for PerPointSnapper<P>
where
    P: NearestRoadProvider + Sync,
{
    fn snap(&self, points: &[Coordinate]) -> Result<Vec<Coordinate>, SnapError> {
        let results = self.lookup_all(points);
        let mut snapped = Vec::with_capacity(points.len());

        for (index, (original, result)) in points.iter().zip(results).enumerate() {
            match (result, self.on_failure) {
                (Ok(point), _) => snapped.push(point),
                (Err(err), PointFailurePolicy::KeepOriginal) => {
                    debug!(index, error = %err, "nearest-road lookup failed, keeping original");
                    snapped.push(*original);
                }
                (Err(err), PointFailurePolicy::Drop) => {
                    debug!(index, error = %err, "nearest-road lookup failed, dropping point");
                }
                (Err(err), PointFailurePolicy::Propagate) => return Err(err),
            }
        }

        Ok(snapped)
    }
}
