//! trace-snapper core
//!
//! Turns a sparse, user-drawn route trace into a dense, road-aligned polyline:
//! densify the taps, snap them to the road network, collapse near-duplicates.

pub mod batch;
pub mod config;
pub mod coordinate;
pub mod error;
pub mod haversine;
pub mod osrm;
pub mod per_point;
pub mod pipeline;
pub mod polyline;
pub mod preview;
pub mod session;
pub mod store;
pub mod strategy;
pub mod traits;

pub use coordinate::{Coordinate, DEFAULT_DEDUPE_EPSILON};
pub use error::{CommitError, ConfigError, SnapError, StoreError};
pub use pipeline::{FallbackPolicy, PipelineOptions, SnapOutcome, SnapPipeline};
pub use session::{CommitOutcome, DraftSession};
