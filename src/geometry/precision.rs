use crate::math::Point2;

/// Precision model applied to all emitted curve coordinates.
///
/// A fixed model rounds every ordinate onto a grid of spacing `1 / scale`;
/// a floating model keeps full double precision. A non-positive scale is
/// treated as floating.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PrecisionModel {
    /// Full double precision, no rounding.
    Floating,
    /// Fixed-grid rounding with the given scale factor (grid spacing `1/scale`).
    Fixed { scale: f64 },
}

impl PrecisionModel {
    /// Creates a fixed-precision model, falling back to floating for a
    /// non-positive scale.
    #[must_use]
    pub fn fixed(scale: f64) -> Self {
        if scale > 0.0 {
            Self::Fixed { scale }
        } else {
            Self::Floating
        }
    }

    #[must_use]
    pub fn is_floating(&self) -> bool {
        matches!(self, Self::Floating)
    }

    /// Rounds a single ordinate onto the precision grid.
    #[must_use]
    pub fn make_precise(&self, value: f64) -> f64 {
        match self {
            Self::Floating => value,
            Self::Fixed { scale } => (value * scale).round() / scale,
        }
    }

    /// Rounds a point onto the precision grid.
    #[must_use]
    pub fn make_point_precise(&self, p: &Point2) -> Point2 {
        match self {
            Self::Floating => *p,
            Self::Fixed { .. } => Point2::new(self.make_precise(p.x), self.make_precise(p.y)),
        }
    }
}
