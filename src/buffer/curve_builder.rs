use crate::error::GeometryError;
use crate::geometry::PrecisionModel;
use crate::graph::Position;
use crate::math::Point2;

use super::params::{BufferParameters, EndCapStyle};
use super::segment_generator::OffsetSegmentGenerator;
use super::simplify;

/// Divisor applied to the buffer distance to obtain the input-line
/// simplification tolerance.
const SIMPLIFY_FACTOR: f64 = 100.0;

/// Builds the raw offset curve for a single geometry component.
///
/// The returned curves may contain self-intersections; these are expected
/// and resolved downstream by noding.
#[derive(Debug)]
pub(crate) struct OffsetCurveBuilder {
    precision: PrecisionModel,
    params: BufferParameters,
}

impl OffsetCurveBuilder {
    pub fn new(precision: PrecisionModel, params: BufferParameters) -> Self {
        Self { precision, params }
    }

    pub fn params(&self) -> &BufferParameters {
        &self.params
    }

    /// Computes the two-sided offset curve of a line (or the degenerate
    /// cap curve of a single point). Returns an empty curve when the
    /// distance admits no buffer.
    ///
    /// # Errors
    ///
    /// Returns an error if the input contains a zero-length segment.
    pub fn line_curve(
        &self,
        points: &[Point2],
        distance: f64,
    ) -> Result<Vec<Point2>, GeometryError> {
        // A zero or negative width buffer of a line or point is empty.
        if distance < 0.0 && !self.params.single_sided() {
            return Ok(Vec::new());
        }
        if distance == 0.0 {
            return Ok(Vec::new());
        }

        let pos_distance = distance.abs();
        let mut generator =
            OffsetSegmentGenerator::new(self.precision, self.params, pos_distance);
        match points {
            [] => {}
            [single] => self.compute_point_curve(*single, &mut generator),
            _ => {
                if self.params.single_sided() {
                    let is_right_side = distance < 0.0;
                    compute_single_sided_curve(points, pos_distance, is_right_side, &mut generator)?;
                } else {
                    compute_line_curve(points, pos_distance, &mut generator)?;
                }
            }
        }
        Ok(generator.into_points())
    }

    /// Computes the one-sided offset curve of a ring on the given side.
    ///
    /// # Errors
    ///
    /// Returns an error if the input contains a zero-length segment.
    pub fn ring_curve(
        &self,
        points: &[Point2],
        side: Position,
        distance: f64,
    ) -> Result<Vec<Point2>, GeometryError> {
        if points.len() <= 2 {
            return self.line_curve(points, distance);
        }
        if distance == 0.0 {
            return Ok(points.to_vec());
        }
        let mut generator = OffsetSegmentGenerator::new(self.precision, self.params, distance);
        compute_ring_curve(points, side, distance, &mut generator)?;
        Ok(generator.into_points())
    }

    fn compute_point_curve(&self, point: Point2, generator: &mut OffsetSegmentGenerator) {
        match self.params.end_cap_style() {
            EndCapStyle::Round => generator.create_circle(&point),
            EndCapStyle::Square => generator.create_square(&point),
            // otherwise the curve is empty (e.g. for a flat cap)
            EndCapStyle::Flat => {}
        }
    }
}

fn simplify_tolerance(buffer_distance: f64) -> f64 {
    buffer_distance / SIMPLIFY_FACTOR
}

fn compute_line_curve(
    points: &[Point2],
    distance: f64,
    generator: &mut OffsetSegmentGenerator,
) -> Result<(), GeometryError> {
    let dist_tol = simplify_tolerance(distance);

    // Forward pass along the left side of the line.
    let simplified1 = simplify::simplify(points, dist_tol);
    let n1 = simplified1.len() - 1;
    generator.init_side_segments(simplified1[0], simplified1[1], Position::Left)?;
    for point in simplified1.iter().take(n1 + 1).skip(2) {
        generator.add_next_segment(*point, true)?;
    }
    generator.add_last_segment();
    generator.add_line_end_cap(&simplified1[n1 - 1], &simplified1[n1])?;

    // Backward pass covers the right side, still generating on the left of
    // the (reversed) walk direction.
    let simplified2 = simplify::simplify(points, -dist_tol);
    let n2 = simplified2.len() - 1;
    generator.init_side_segments(simplified2[n2], simplified2[n2 - 1], Position::Left)?;
    for point in simplified2.iter().take(n2 - 1).rev() {
        generator.add_next_segment(*point, true)?;
    }
    generator.add_last_segment();
    generator.add_line_end_cap(&simplified2[1], &simplified2[0])?;

    generator.close_ring();
    Ok(())
}

fn compute_single_sided_curve(
    points: &[Point2],
    distance: f64,
    is_right_side: bool,
    generator: &mut OffsetSegmentGenerator,
) -> Result<(), GeometryError> {
    let dist_tol = simplify_tolerance(distance);

    if is_right_side {
        // Add the original line backing the curve, then the offset walked in
        // reverse.
        generator.add_segments(points, true);
        let simplified = simplify::simplify(points, -dist_tol);
        let n = simplified.len() - 1;
        generator.init_side_segments(simplified[n], simplified[n - 1], Position::Left)?;
        generator.add_first_segment();
        for point in simplified.iter().take(n - 1).rev() {
            generator.add_next_segment(*point, true)?;
        }
    } else {
        generator.add_segments(points, false);
        let simplified = simplify::simplify(points, dist_tol);
        let n = simplified.len() - 1;
        generator.init_side_segments(simplified[0], simplified[1], Position::Left)?;
        generator.add_first_segment();
        for point in simplified.iter().take(n + 1).skip(2) {
            generator.add_next_segment(*point, true)?;
        }
    }
    generator.add_last_segment();
    generator.close_ring();
    Ok(())
}

fn compute_ring_curve(
    points: &[Point2],
    side: Position,
    distance: f64,
    generator: &mut OffsetSegmentGenerator,
) -> Result<(), GeometryError> {
    let mut dist_tol = simplify_tolerance(distance);
    if side == Position::Right {
        dist_tol = -dist_tol;
    }
    let simplified = simplify::simplify(points, dist_tol);
    let n = simplified.len() - 1;

    // The ring is closed, so seed the window with the segment arriving at
    // the start point; no end caps are needed.
    generator.init_side_segments(simplified[n - 1], simplified[0], side)?;
    for (i, point) in simplified.iter().enumerate().take(n + 1).skip(1) {
        let add_start_point = i != 1;
        generator.add_next_segment(*point, add_start_point)?;
    }
    generator.close_ring();
    Ok(())
}
