use crate::math::Point2;

/// Axis-aligned 2D bounding box.
///
/// A newly created box is empty (inverted bounds) and grows as points are
/// included.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    min_x: f64,
    min_y: f64,
    max_x: f64,
    max_y: f64,
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::new()
    }
}

impl BoundingBox {
    /// Creates an empty bounding box.
    #[must_use]
    pub fn new() -> Self {
        Self {
            min_x: f64::INFINITY,
            min_y: f64::INFINITY,
            max_x: f64::NEG_INFINITY,
            max_y: f64::NEG_INFINITY,
        }
    }

    /// Creates a bounding box covering a point set.
    #[must_use]
    pub fn from_points(points: &[Point2]) -> Self {
        let mut bbox = Self::new();
        for p in points {
            bbox.expand_to_include(p);
        }
        bbox
    }

    /// Tests whether the box contains no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.min_x > self.max_x
    }

    /// Grows the box to cover `p`.
    pub fn expand_to_include(&mut self, p: &Point2) {
        self.min_x = self.min_x.min(p.x);
        self.min_y = self.min_y.min(p.y);
        self.max_x = self.max_x.max(p.x);
        self.max_y = self.max_y.max(p.y);
    }

    /// Grows the box to cover another box.
    pub fn expand_to_include_box(&mut self, other: &Self) {
        if !other.is_empty() {
            self.min_x = self.min_x.min(other.min_x);
            self.min_y = self.min_y.min(other.min_y);
            self.max_x = self.max_x.max(other.max_x);
            self.max_y = self.max_y.max(other.max_y);
        }
    }

    /// Tests whether `p` lies inside or on the boundary of the box.
    #[must_use]
    pub fn contains_point(&self, p: &Point2) -> bool {
        p.x >= self.min_x && p.x <= self.max_x && p.y >= self.min_y && p.y <= self.max_y
    }

    /// Tests whether `other` lies entirely inside this box.
    #[must_use]
    pub fn contains_box(&self, other: &Self) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && other.min_x >= self.min_x
            && other.max_x <= self.max_x
            && other.min_y >= self.min_y
            && other.max_y <= self.max_y
    }

    #[must_use]
    pub fn min_x(&self) -> f64 {
        self.min_x
    }

    #[must_use]
    pub fn min_y(&self) -> f64 {
        self.min_y
    }

    #[must_use]
    pub fn max_x(&self) -> f64 {
        self.max_x
    }

    #[must_use]
    pub fn max_y(&self) -> f64 {
        self.max_y
    }

    /// Box width, or 0 for an empty box.
    #[must_use]
    pub fn width(&self) -> f64 {
        if self.is_empty() {
            0.0
        } else {
            self.max_x - self.min_x
        }
    }

    /// Box height, or 0 for an empty box.
    #[must_use]
    pub fn height(&self) -> f64 {
        if self.is_empty() {
            0.0
        } else {
            self.max_y - self.min_y
        }
    }

    /// Largest absolute ordinate over all four bounds, or 0 for an empty box.
    #[must_use]
    pub fn max_absolute_ordinate(&self) -> f64 {
        if self.is_empty() {
            0.0
        } else {
            self.min_x
                .abs()
                .max(self.max_x.abs())
                .max(self.min_y.abs())
                .max(self.max_y.abs())
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn empty_box() {
        let bbox = BoundingBox::new();
        assert!(bbox.is_empty());
        assert!((bbox.width()).abs() < f64::EPSILON);
        assert!(!bbox.contains_point(&Point2::new(0.0, 0.0)));
    }

    #[test]
    fn expand_and_contain() {
        let bbox = BoundingBox::from_points(&[Point2::new(-1.0, 2.0), Point2::new(3.0, -4.0)]);
        assert!(bbox.contains_point(&Point2::new(0.0, 0.0)));
        assert!(!bbox.contains_point(&Point2::new(4.0, 0.0)));
        assert!((bbox.width() - 4.0).abs() < f64::EPSILON);
        assert!((bbox.height() - 6.0).abs() < f64::EPSILON);
        assert!((bbox.max_absolute_ordinate() - 4.0).abs() < f64::EPSILON);
    }

    #[test]
    fn box_containment() {
        let outer = BoundingBox::from_points(&[Point2::new(0.0, 0.0), Point2::new(10.0, 10.0)]);
        let inner = BoundingBox::from_points(&[Point2::new(2.0, 2.0), Point2::new(3.0, 3.0)]);
        assert!(outer.contains_box(&inner));
        assert!(!inner.contains_box(&outer));
    }
}
