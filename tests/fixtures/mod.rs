//! Test fixtures for trace-snapper.
//!
//! Draft traces as a user would tap them on the map.

#![allow(dead_code)]

pub mod las_vegas_traces;

pub use las_vegas_traces::*;
