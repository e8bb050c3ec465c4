//! End-to-end pipeline scenarios with stub snappers.

mod fixtures;

use std::sync::atomic::{AtomicUsize, Ordering};

use trace_snapper::polyline::densify;
use trace_snapper::traits::RoadSnapper;
use trace_snapper::{Coordinate, FallbackPolicy, PipelineOptions, SnapError, SnapPipeline, DEFAULT_DEDUPE_EPSILON};

#[derive(Default)]
struct Passthrough {
    calls: AtomicUsize,
    seen: std::sync::Mutex<Vec<usize>>,
}

impl RoadSnapper for Passthrough {
    fn snap(&self, points: &[Coordinate]) -> Result<Vec<Coordinate>, SnapError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen.lock().unwrap().push(points.len());
        Ok(points.to_vec())
    }
}

/// Returns an empty trace, as a broken service might.
struct EmptyResult;

impl RoadSnapper for EmptyResult {
    fn snap(&self, _points: &[Coordinate]) -> Result<Vec<Coordinate>, SnapError> {
        Ok(Vec::new())
    }
}

fn assert_no_close_neighbours(points: &[Coordinate]) {
    for pair in points.windows(2) {
        let lat_delta = (pair[1].lat - pair[0].lat).abs();
        let lng_delta = (pair[1].lng - pair[0].lng).abs();
        assert!(
            lat_delta > DEFAULT_DEDUPE_EPSILON || lng_delta > DEFAULT_DEDUPE_EPSILON,
            "consecutive points too close: {:?}",
            pair
        );
    }
}

#[test]
fn two_taps_densify_snap_dedupe() {
    let taps = vec![Coordinate::new(40.0, -3.0), Coordinate::new(40.001, -3.001)];

    let dense = densify(&taps, 20);
    assert_eq!(dense.len(), 21);
    assert_eq!(dense[0], Coordinate::new(40.0, -3.0));
    assert_eq!(dense[20], Coordinate::new(40.001, -3.001));

    let pipeline = SnapPipeline::new(Passthrough::default(), PipelineOptions::default());
    let outcome = pipeline.build(&taps).unwrap();

    assert!(outcome.points.len() <= 21);
    assert_eq!(outcome.points[0], taps[0]);
    assert_no_close_neighbours(&outcome.points);
    assert_eq!(*pipeline.snapper().seen.lock().unwrap(), vec![21]);
}

#[test]
fn single_tap_makes_no_snap_call() {
    let pipeline = SnapPipeline::new(Passthrough::default(), PipelineOptions::default());
    let outcome = pipeline.build(&[Coordinate::new(40.0, -3.0)]).unwrap();

    assert_eq!(outcome.points, vec![Coordinate::new(40.0, -3.0)]);
    assert_eq!(pipeline.snapper().calls.load(Ordering::SeqCst), 0);
}

#[test]
fn fixture_traces_keep_endpoints() {
    let pipeline = SnapPipeline::new(Passthrough::default(), PipelineOptions::default());

    for trace in fixtures::all_traces() {
        let taps = trace.points();
        let outcome = pipeline.build(&taps).unwrap();

        let expected_max = 1 + (taps.len() - 1) * 20;
        assert!(outcome.points.len() <= expected_max, "{}", trace.name);
        assert_eq!(outcome.points.first(), taps.first(), "{}", trace.name);
        assert_eq!(outcome.points.last(), taps.last(), "{}", trace.name);
        assert_no_close_neighbours(&outcome.points);
    }
}

#[test]
fn custom_step_count_changes_density() {
    let pipeline = SnapPipeline::new(
        Passthrough::default(),
        PipelineOptions {
            steps_per_segment: 5,
            dedupe_epsilon: DEFAULT_DEDUPE_EPSILON,
            fallback: FallbackPolicy::Strict,
        },
    );
    let taps = fixtures::STRIP_SOUTHBOUND.points();
    let outcome = pipeline.build(&taps).unwrap();
    assert_eq!(outcome.points.len(), 1 + (taps.len() - 1) * 5);
}

#[test]
fn empty_snap_result_is_passed_through_for_caller_validation() {
    let pipeline = SnapPipeline::new(EmptyResult, PipelineOptions::default());
    let outcome = pipeline.build(&fixtures::DOUBLE_TAP.points()).unwrap();
    assert!(outcome.points.is_empty());
}
