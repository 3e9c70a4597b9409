pub mod bounding_box;
pub mod line_segment;
pub mod precision;

pub use bounding_box::BoundingBox;
pub use line_segment::LineSegment;
pub use precision::PrecisionModel;

use crate::error::GeometryError;
use crate::math::Point2;

/// A geometry that can be buffered.
#[derive(Debug, Clone)]
pub enum Geometry {
    /// A single point.
    Point(Point2),
    /// An open polyline.
    LineString(LineString),
    /// An area bounded by a shell ring and zero or more hole rings.
    Polygon(Polygon),
    /// A heterogeneous collection; each component is buffered.
    Collection(Vec<Geometry>),
}

impl Geometry {
    /// Computes the bounding box of all component coordinates.
    #[must_use]
    pub fn bounding_box(&self) -> BoundingBox {
        let mut bbox = BoundingBox::new();
        match self {
            Self::Point(p) => bbox.expand_to_include(p),
            Self::LineString(line) => {
                bbox = BoundingBox::from_points(line.points());
            }
            Self::Polygon(polygon) => {
                bbox = polygon.bounding_box();
            }
            Self::Collection(parts) => {
                for part in parts {
                    bbox.expand_to_include_box(&part.bounding_box());
                }
            }
        }
        bbox
    }
}

/// An open polyline with at least two points.
#[derive(Debug, Clone)]
pub struct LineString {
    points: Vec<Point2>,
}

impl LineString {
    /// Creates a new line string.
    ///
    /// # Errors
    ///
    /// Returns an error if fewer than 2 points are provided.
    pub fn new(points: Vec<Point2>) -> Result<Self, GeometryError> {
        if points.len() < 2 {
            return Err(GeometryError::TooFewPoints {
                expected: 2,
                actual: points.len(),
            });
        }
        Ok(Self { points })
    }

    #[must_use]
    pub fn points(&self) -> &[Point2] {
        &self.points
    }
}

/// An area bounded by a closed shell ring and zero or more closed hole rings.
///
/// Rings must be explicitly closed (first point equal to the last) and hold
/// at least 4 points. Ring orientation is arbitrary on input; buffering
/// normalizes it internally. Result polygons use clockwise shells and
/// counter-clockwise holes.
#[derive(Debug, Clone)]
pub struct Polygon {
    shell: Vec<Point2>,
    holes: Vec<Vec<Point2>>,
}

impl Polygon {
    /// Creates a new polygon from closed rings.
    ///
    /// # Errors
    ///
    /// Returns an error if any ring has fewer than 4 points or is not closed.
    pub fn new(shell: Vec<Point2>, holes: Vec<Vec<Point2>>) -> Result<Self, GeometryError> {
        validate_ring(&shell)?;
        for hole in &holes {
            validate_ring(hole)?;
        }
        Ok(Self { shell, holes })
    }

    #[must_use]
    pub fn shell(&self) -> &[Point2] {
        &self.shell
    }

    #[must_use]
    pub fn holes(&self) -> &[Vec<Point2>] {
        &self.holes
    }

    /// Computes the bounding box of the shell ring.
    #[must_use]
    pub fn bounding_box(&self) -> BoundingBox {
        BoundingBox::from_points(&self.shell)
    }
}

fn validate_ring(ring: &[Point2]) -> Result<(), GeometryError> {
    if ring.len() < 4 {
        return Err(GeometryError::TooFewPoints {
            expected: 4,
            actual: ring.len(),
        });
    }
    let first = ring[0];
    let last = ring[ring.len() - 1];
    if first != last {
        return Err(GeometryError::RingNotClosed);
    }
    Ok(())
}

/// Removes consecutive duplicate points from a point sequence.
#[must_use]
pub fn remove_repeated_points(points: &[Point2]) -> Vec<Point2> {
    let mut out: Vec<Point2> = Vec::with_capacity(points.len());
    for p in points {
        if out.last() != Some(p) {
            out.push(*p);
        }
    }
    out
}
