pub mod intersection_noder;
pub mod scaled_noder;

pub use intersection_noder::IntersectionNoder;
pub use scaled_noder::ScaledNoder;

use crate::error::Result;
use crate::graph::Label;
use crate::math::Point2;

/// A labeled curve: the unit of work exchanged with the noder.
#[derive(Debug, Clone)]
pub struct SegmentString {
    /// The vertex chain of the curve.
    pub points: Vec<Point2>,
    /// Topological label inherited by every substring split from this curve.
    pub label: Label,
}

impl SegmentString {
    #[must_use]
    pub fn new(points: Vec<Point2>, label: Label) -> Self {
        Self { points, label }
    }

    /// Tests whether the curve forms a closed ring.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.points.len() > 2 && self.points.first() == self.points.last()
    }
}

/// Computes intersections among a set of curves and splits them into
/// non-crossing substrings.
///
/// Implementations must return curves split at every self-intersection and
/// cross-intersection, each substring carrying its originating label, using
/// the same precision grid as the surrounding buffer computation.
pub trait Noder {
    /// Nodes the input curves.
    ///
    /// # Errors
    ///
    /// Returns an error if the arrangement cannot be resolved.
    fn compute_nodes(&self, strings: &[SegmentString]) -> Result<Vec<SegmentString>>;
}
