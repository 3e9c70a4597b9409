use crate::error::GeometryError;
use crate::math::{Point2, TOLERANCE};

use super::precision::PrecisionModel;

/// An ordered pair of points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineSegment {
    pub p0: Point2,
    pub p1: Point2,
}

impl LineSegment {
    #[must_use]
    pub fn new(p0: Point2, p1: Point2) -> Self {
        Self { p0, p1 }
    }

    /// Returns the segment with its endpoints swapped.
    #[must_use]
    pub fn reversed(&self) -> Self {
        Self {
            p0: self.p1,
            p1: self.p0,
        }
    }

    #[must_use]
    pub fn midpoint(&self) -> Point2 {
        Point2::new((self.p0.x + self.p1.x) / 2.0, (self.p0.y + self.p1.y) / 2.0)
    }

    #[must_use]
    pub fn length(&self) -> f64 {
        (self.p1 - self.p0).norm()
    }

    /// Computes the parallel segment at a perpendicular distance.
    ///
    /// Positive `distance` offsets to the left of the direction `p0 → p1`,
    /// negative to the right. The offset endpoints are rounded through the
    /// precision model.
    ///
    /// # Errors
    ///
    /// Returns an error if the segment has zero length.
    pub fn offset(
        &self,
        distance: f64,
        precision: &PrecisionModel,
    ) -> Result<Self, GeometryError> {
        let dx = self.p1.x - self.p0.x;
        let dy = self.p1.y - self.p0.y;
        let len = (dx * dx + dy * dy).sqrt();
        if len < TOLERANCE {
            return Err(GeometryError::ZeroLengthSegment {
                x: self.p0.x,
                y: self.p0.y,
            });
        }
        // u is the offset vector rotated to the segment direction.
        let ux = distance * dx / len;
        let uy = distance * dy / len;
        let p0 = Point2::new(
            precision.make_precise(self.p0.x - uy),
            precision.make_precise(self.p0.y + ux),
        );
        let p1 = Point2::new(
            precision.make_precise(self.p1.x - uy),
            precision.make_precise(self.p1.y + ux),
        );
        Ok(Self { p0, p1 })
    }

    /// Returns the point at parameter `t` along the segment, displaced
    /// perpendicular by `offset_distance` (positive = left).
    #[must_use]
    pub fn point_along_offset(&self, t: f64, offset_distance: f64) -> Point2 {
        let sx = self.p0.x + t * (self.p1.x - self.p0.x);
        let sy = self.p0.y + t * (self.p1.y - self.p0.y);
        let dx = self.p1.x - self.p0.x;
        let dy = self.p1.y - self.p0.y;
        let len = (dx * dx + dy * dy).sqrt();
        let mut ux = 0.0;
        let mut uy = 0.0;
        if offset_distance != 0.0 && len > TOLERANCE {
            ux = offset_distance * dx / len;
            uy = offset_distance * dy / len;
        }
        Point2::new(sx - uy, sy + ux)
    }
}
