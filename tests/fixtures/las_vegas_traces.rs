//! Tap sequences around Las Vegas, routable with the OSRM Nevada extract.

use trace_snapper::Coordinate;

/// A named draft trace.
#[derive(Debug, Clone)]
pub struct DraftFixture {
    pub name: &'static str,
    pub taps: &'static [(f64, f64)],
}

impl DraftFixture {
    pub const fn new(name: &'static str, taps: &'static [(f64, f64)]) -> Self {
        Self { name, taps }
    }

    pub fn points(&self) -> Vec<Coordinate> {
        self.taps.iter().copied().map(Coordinate::from).collect()
    }
}

/// Down the Strip, sparse taps at major intersections.
pub const STRIP_SOUTHBOUND: DraftFixture = DraftFixture::new(
    "Strip southbound",
    &[
        (36.1263781, -115.1658180),
        (36.1162, -115.1745),
        (36.1126, -115.1767),
        (36.1023654, -115.1688720),
    ],
);

/// Red Rock loop approach, long straight chords across blocks.
pub const WEST_CHARLESTON: DraftFixture = DraftFixture::new(
    "West Charleston",
    &[
        (36.1590, -115.2050),
        (36.1592, -115.2600),
        (36.1598, -115.3050),
    ],
);

/// The same spot tapped twice, then a short hop.
pub const DOUBLE_TAP: DraftFixture = DraftFixture::new(
    "Double tap",
    &[
        (36.1147, -115.1728),
        (36.1147, -115.1728),
        (36.1215, -115.1739),
    ],
);

pub fn all_traces() -> Vec<DraftFixture> {
    vec![STRIP_SOUTHBOUND, WEST_CHARLESTON, DOUBLE_TAP]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinates_in_vegas_area() {
        for trace in all_traces() {
            for point in trace.points() {
                assert!(point.lat > 35.9 && point.lat < 36.3, "{} lat out of range: {}", trace.name, point.lat);
                assert!(point.lng > -115.4 && point.lng < -114.8, "{} lng out of range: {}", trace.name, point.lng);
            }
        }
    }
}
