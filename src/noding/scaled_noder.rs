use crate::error::Result;
use crate::geometry::PrecisionModel;
use crate::math::Point2;

use super::{Noder, SegmentString};

/// Wraps a noder so all coordinates are rounded onto a fixed precision grid.
///
/// Input vertices are rounded before noding and every output vertex is
/// rounded again, so intersection points computed by the inner noder land on
/// the same grid as the curves themselves.
#[derive(Debug)]
pub struct ScaledNoder<N: Noder> {
    inner: N,
    precision: PrecisionModel,
}

impl<N: Noder> ScaledNoder<N> {
    #[must_use]
    pub fn new(inner: N, precision: PrecisionModel) -> Self {
        Self { inner, precision }
    }
}

impl<N: Noder> Noder for ScaledNoder<N> {
    fn compute_nodes(&self, strings: &[SegmentString]) -> Result<Vec<SegmentString>> {
        let rounded: Vec<SegmentString> = strings
            .iter()
            .filter_map(|s| self.round_string(s))
            .collect();
        let noded = self.inner.compute_nodes(&rounded)?;
        Ok(noded.iter().filter_map(|s| self.round_string(s)).collect())
    }
}

impl<N: Noder> ScaledNoder<N> {
    /// Rounds a string's vertices onto the grid, dropping collapsed vertices
    /// and strings that degenerate to fewer than two points.
    fn round_string(&self, string: &SegmentString) -> Option<SegmentString> {
        let mut points: Vec<Point2> = Vec::with_capacity(string.points.len());
        for p in &string.points {
            let rounded = self.precision.make_point_precise(p);
            if points.last() != Some(&rounded) {
                points.push(rounded);
            }
        }
        if points.len() < 2 {
            None
        } else {
            Some(SegmentString::new(points, string.label))
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::graph::{Label, Location};
    use crate::noding::IntersectionNoder;

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    fn string(points: Vec<Point2>) -> SegmentString {
        SegmentString::new(points, Label::new(Location::Exterior, Location::Interior))
    }

    #[test]
    fn vertices_snap_to_grid() {
        let noder = ScaledNoder::new(IntersectionNoder::new(), PrecisionModel::fixed(10.0));
        let strings = vec![string(vec![p(0.01, 0.04), p(1.04, 0.06)])];
        let noded = noder.compute_nodes(&strings).unwrap();
        assert_eq!(noded.len(), 1);
        assert_eq!(noded[0].points[0], p(0.0, 0.0));
        assert_eq!(noded[0].points[1], p(1.0, 0.1));
    }

    #[test]
    fn collapsed_strings_are_dropped() {
        let noder = ScaledNoder::new(IntersectionNoder::new(), PrecisionModel::fixed(1.0));
        let strings = vec![string(vec![p(0.1, 0.1), p(0.2, -0.2)])];
        let noded = noder.compute_nodes(&strings).unwrap();
        assert!(noded.is_empty());
    }

    #[test]
    fn intersection_lands_on_grid() {
        let noder = ScaledNoder::new(IntersectionNoder::new(), PrecisionModel::fixed(100.0));
        let strings = vec![
            string(vec![p(-1.0, 0.004), p(1.0, 0.004)]),
            string(vec![p(0.123, -1.0), p(0.123, 1.0)]),
        ];
        let noded = noder.compute_nodes(&strings).unwrap();
        for s in &noded {
            for q in &s.points {
                assert!((q.x * 100.0 - (q.x * 100.0).round()).abs() < 1e-9);
                assert!((q.y * 100.0 - (q.y * 100.0).round()).abs() < 1e-9);
            }
        }
    }
}
