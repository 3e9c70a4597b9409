use crate::error::Result;
use crate::geometry::{remove_repeated_points, BoundingBox, Geometry, LineString, Polygon};
use crate::graph::{Label, Location, Position};
use crate::math::distance_2d::point_to_segment_dist;
use crate::math::orientation_2d::is_ccw;
use crate::math::Point2;
use crate::noding::SegmentString;

use super::curve_builder::OffsetCurveBuilder;

/// Minimum number of points in a valid closed ring.
const MINIMUM_RING_SIZE: usize = 4;

/// Builds the labeled raw offset curves for every component of the input
/// geometry.
///
/// Each curve's label records, relative to the curve's forward direction,
/// which side faces the buffer interior.
#[derive(Debug)]
pub(crate) struct OffsetCurveSetBuilder {
    distance: f64,
    builder: OffsetCurveBuilder,
    curves: Vec<SegmentString>,
}

impl OffsetCurveSetBuilder {
    pub fn new(distance: f64, builder: OffsetCurveBuilder) -> Self {
        Self {
            distance,
            builder,
            curves: Vec::new(),
        }
    }

    /// Computes the raw curves for a geometry and returns them.
    ///
    /// # Errors
    ///
    /// Returns an error if curve generation fails on degenerate input.
    pub fn curves(mut self, geometry: &Geometry) -> Result<Vec<SegmentString>> {
        self.add_geometry(geometry)?;
        Ok(self.curves)
    }

    fn add_geometry(&mut self, geometry: &Geometry) -> Result<()> {
        match geometry {
            Geometry::Point(p) => self.add_point(p)?,
            Geometry::LineString(line) => self.add_line_string(line)?,
            Geometry::Polygon(polygon) => self.add_polygon(polygon)?,
            Geometry::Collection(parts) => {
                for part in parts {
                    self.add_geometry(part)?;
                }
            }
        }
        Ok(())
    }

    fn add_point(&mut self, point: &Point2) -> Result<()> {
        if self.distance <= 0.0 {
            return Ok(());
        }
        let curve = self.builder.line_curve(&[*point], self.distance)?;
        self.add_curve(curve, Location::Exterior, Location::Interior);
        Ok(())
    }

    fn add_line_string(&mut self, line: &LineString) -> Result<()> {
        if self.distance <= 0.0 && !self.builder.params().single_sided() {
            return Ok(());
        }
        let points = remove_repeated_points(line.points());
        let curve = self.builder.line_curve(&points, self.distance)?;
        self.add_curve(curve, Location::Exterior, Location::Interior);
        Ok(())
    }

    fn add_polygon(&mut self, polygon: &Polygon) -> Result<()> {
        let mut offset_distance = self.distance;
        let mut offset_side = Position::Left;
        if self.distance < 0.0 {
            offset_distance = -self.distance;
            offset_side = Position::Right;
        }

        let shell = remove_repeated_points(polygon.shell());
        // An eroded shell produces no curve at all.
        if self.distance < 0.0 && is_eroded_completely(&shell, self.distance) {
            return Ok(());
        }
        if self.distance <= 0.0 && shell.len() < 3 {
            return Ok(());
        }
        self.add_polygon_ring(
            &shell,
            offset_distance,
            offset_side,
            Location::Exterior,
            Location::Interior,
        )?;

        for hole in polygon.holes() {
            let hole_points = remove_repeated_points(hole);
            // A hole swallowed by dilation produces no curve.
            if self.distance > 0.0 && is_eroded_completely(&hole_points, -self.distance) {
                continue;
            }
            // Holes are buffered on the opposite side with locations swapped.
            self.add_polygon_ring(
                &hole_points,
                offset_distance,
                offset_side.opposite(),
                Location::Interior,
                Location::Exterior,
            )?;
        }
        Ok(())
    }

    /// Adds the offset curve of one polygon ring. `cw_left` and `cw_right`
    /// are the location labels assuming a clockwise ring; a counter-clockwise
    /// ring swaps them and buffers the opposite side.
    fn add_polygon_ring(
        &mut self,
        ring: &[Point2],
        offset_distance: f64,
        side: Position,
        cw_left: Location,
        cw_right: Location,
    ) -> Result<()> {
        if offset_distance == 0.0 && ring.len() < MINIMUM_RING_SIZE {
            return Ok(());
        }
        let mut left = cw_left;
        let mut right = cw_right;
        let mut side = side;
        if ring.len() >= MINIMUM_RING_SIZE && is_ccw(ring) {
            left = cw_right;
            right = cw_left;
            side = side.opposite();
        }
        let curve = self.builder.ring_curve(ring, side, offset_distance)?;
        self.add_curve(curve, left, right);
        Ok(())
    }

    fn add_curve(&mut self, points: Vec<Point2>, left: Location, right: Location) {
        if points.len() >= 2 {
            self.curves
                .push(SegmentString::new(points, Label::new(left, right)));
        }
    }
}

/// Tests whether a ring is completely eroded by a negative buffer distance,
/// so its curve can be skipped entirely.
///
/// This is a quick envelope-based check; a ring that passes it may still
/// erode to nothing during topology resolution.
fn is_eroded_completely(ring: &[Point2], buffer_distance: f64) -> bool {
    // A degenerate ring has no area to erode.
    if ring.len() < MINIMUM_RING_SIZE {
        return buffer_distance < 0.0;
    }
    if ring.len() == MINIMUM_RING_SIZE {
        return is_triangle_eroded_completely(ring, buffer_distance);
    }
    let env = BoundingBox::from_points(ring);
    let env_min_dimension = env.height().min(env.width());
    buffer_distance < 0.0 && 2.0 * buffer_distance.abs() > env_min_dimension
}

fn is_triangle_eroded_completely(triangle: &[Point2], buffer_distance: f64) -> bool {
    let in_centre = triangle_incentre(&triangle[0], &triangle[1], &triangle[2]);
    let dist_to_centre = point_to_segment_dist(&in_centre, &triangle[0], &triangle[1]);
    dist_to_centre < buffer_distance.abs()
}

/// The incentre of a triangle: the centre of its inscribed circle, which is
/// the interior point deepest inside the triangle.
fn triangle_incentre(a: &Point2, b: &Point2, c: &Point2) -> Point2 {
    let len_a = (b - c).norm();
    let len_b = (a - c).norm();
    let len_c = (a - b).norm();
    let perimeter = len_a + len_b + len_c;
    Point2::new(
        (len_a * a.x + len_b * b.x + len_c * c.x) / perimeter,
        (len_a * a.y + len_b * b.y + len_c * c.y) / perimeter,
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::buffer::params::BufferParameters;
    use crate::geometry::PrecisionModel;

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    fn curve_set(geometry: &Geometry, distance: f64) -> Vec<SegmentString> {
        let builder =
            OffsetCurveBuilder::new(PrecisionModel::Floating, BufferParameters::new());
        OffsetCurveSetBuilder::new(distance, builder)
            .curves(geometry)
            .unwrap()
    }

    fn square(side: f64) -> Polygon {
        Polygon::new(
            vec![
                p(0.0, 0.0),
                p(side, 0.0),
                p(side, side),
                p(0.0, side),
                p(0.0, 0.0),
            ],
            vec![],
        )
        .unwrap()
    }

    #[test]
    fn point_with_positive_distance_yields_curve() {
        let curves = curve_set(&Geometry::Point(p(0.0, 0.0)), 5.0);
        assert_eq!(curves.len(), 1);
        assert_eq!(curves[0].label.left, Location::Exterior);
        assert_eq!(curves[0].label.right, Location::Interior);
        assert!(curves[0].is_closed());
    }

    #[test]
    fn point_with_negative_distance_yields_nothing() {
        assert!(curve_set(&Geometry::Point(p(0.0, 0.0)), -1.0).is_empty());
        assert!(curve_set(&Geometry::Point(p(0.0, 0.0)), 0.0).is_empty());
    }

    #[test]
    fn line_with_negative_distance_yields_nothing() {
        let line = Geometry::LineString(
            LineString::new(vec![p(0.0, 0.0), p(10.0, 0.0)]).unwrap(),
        );
        assert!(curve_set(&line, -2.0).is_empty());
    }

    #[test]
    fn polygon_erosion_within_width_yields_curve() {
        let curves = curve_set(&Geometry::Polygon(square(10.0)), -2.0);
        assert_eq!(curves.len(), 1);
    }

    #[test]
    fn polygon_eroded_completely_yields_nothing() {
        assert!(curve_set(&Geometry::Polygon(square(10.0)), -6.0).is_empty());
    }

    #[test]
    fn polygon_hole_swallowed_by_dilation_is_skipped() {
        let polygon = Polygon::new(
            vec![
                p(0.0, 0.0),
                p(20.0, 0.0),
                p(20.0, 20.0),
                p(0.0, 20.0),
                p(0.0, 0.0),
            ],
            vec![vec![
                p(9.0, 9.0),
                p(9.0, 11.0),
                p(11.0, 11.0),
                p(11.0, 9.0),
                p(9.0, 9.0),
            ]],
        )
        .unwrap();
        // Hole of width 2 disappears under a dilation of 3.
        let curves = curve_set(&Geometry::Polygon(polygon), 3.0);
        assert_eq!(curves.len(), 1);
    }

    #[test]
    fn collection_yields_curve_per_component() {
        let collection = Geometry::Collection(vec![
            Geometry::Point(p(0.0, 0.0)),
            Geometry::Point(p(100.0, 0.0)),
        ]);
        assert_eq!(curve_set(&collection, 1.0).len(), 2);
    }

    #[test]
    fn triangle_erosion_uses_incentre() {
        let triangle = Polygon::new(
            vec![p(0.0, 0.0), p(10.0, 0.0), p(5.0, 8.0), p(0.0, 0.0)],
            vec![],
        )
        .unwrap();
        // Incircle radius of this triangle is ~2.7.
        assert!(!curve_set(&Geometry::Polygon(triangle.clone()), -2.0).is_empty());
        assert!(curve_set(&Geometry::Polygon(triangle), -3.0).is_empty());
    }
}
