//! Supersedable preview state.
//!
//! Every preview request takes a new generation from a monotonic counter. A
//! result is applied only if its generation is still the latest one issued;
//! anything older is dropped, whatever order the results arrive in.

use std::sync::{Arc, Mutex, MutexGuard};

use tracing::debug;

use crate::coordinate::Coordinate;
use crate::error::SnapError;

#[derive(Debug, Default)]
struct PreviewState {
    latest: u64,
    snapped: Option<Vec<Coordinate>>,
    error: Option<SnapError>,
    pending: bool,
}

/// What the map should currently show for the preview.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PreviewSnapshot {
    pub generation: u64,
    pub snapped: Option<Vec<Coordinate>>,
    pub error: Option<SnapError>,
    pub pending: bool,
}

/// Cloneable handle; clones share the same counter and state.
#[derive(Debug, Clone, Default)]
pub struct PreviewTracker {
    state: Arc<Mutex<PreviewState>>,
}

impl PreviewTracker {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, PreviewState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Start a new preview request, superseding any in flight.
    pub fn issue(&self) -> u64 {
        let mut state = self.lock();
        state.latest += 1;
        state.pending = true;
        state.latest
    }

    /// Supersede in-flight requests and clear the preview.
    pub fn invalidate(&self) -> u64 {
        let mut state = self.lock();
        state.latest += 1;
        state.snapped = None;
        state.error = None;
        state.pending = false;
        state.latest
    }

    /// Apply a preview result. Returns false if `generation` is stale.
    pub fn resolve(&self, generation: u64, result: Result<Vec<Coordinate>, SnapError>) -> bool {
        let mut state = self.lock();
        if generation != state.latest {
            debug!(generation, latest = state.latest, "discarding stale preview");
            return false;
        }

        match result {
            Ok(points) => {
                state.snapped = Some(points);
                state.error = None;
            }
            Err(err) => {
                debug!(generation, error = %err, "preview snap failed");
                state.snapped = None;
                state.error = Some(err);
            }
        }
        state.pending = false;
        true
    }

    pub fn is_current(&self, generation: u64) -> bool {
        self.lock().latest == generation
    }

    pub fn snapshot(&self) -> PreviewSnapshot {
        let state = self.lock();
        PreviewSnapshot {
            generation: state.latest,
            snapped: state.snapped.clone(),
            error: state.error.clone(),
            pending: state.pending,
        }
    }
}
