use crate::geometry::PrecisionModel;
use crate::math::Point2;

/// A mutable, order-preserving vertex list for one offset curve.
///
/// Every added point is rounded through the precision model, and points
/// closer to the previous vertex than the minimum vertex distance are
/// suppressed.
#[derive(Debug)]
pub struct OffsetSegmentString {
    points: Vec<Point2>,
    precision: PrecisionModel,
    minimum_vertex_distance: f64,
}

impl OffsetSegmentString {
    #[must_use]
    pub fn new(precision: PrecisionModel, minimum_vertex_distance: f64) -> Self {
        Self {
            points: Vec::new(),
            precision,
            minimum_vertex_distance,
        }
    }

    /// Appends a point, rounding it and suppressing near-duplicates.
    pub fn add_point(&mut self, p: &Point2) {
        let rounded = self.precision.make_point_precise(p);
        if self.is_redundant(&rounded) {
            return;
        }
        self.points.push(rounded);
    }

    /// Appends a point sequence in forward or reverse order.
    pub fn add_points(&mut self, points: &[Point2], forward: bool) {
        if forward {
            for p in points {
                self.add_point(p);
            }
        } else {
            for p in points.iter().rev() {
                self.add_point(p);
            }
        }
    }

    /// Appends the start point if the curve does not already end on it.
    pub fn close_ring(&mut self) {
        if self.points.is_empty() {
            return;
        }
        let start = self.points[0];
        let last = self.points[self.points.len() - 1];
        if start != last {
            self.points.push(start);
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[must_use]
    pub fn into_points(self) -> Vec<Point2> {
        self.points
    }

    fn is_redundant(&self, p: &Point2) -> bool {
        match self.points.last() {
            None => false,
            Some(last) => (p - last).norm() < self.minimum_vertex_distance,
        }
    }
}
