use std::f64::consts::PI;

use crate::error::GeometryError;
use crate::geometry::{LineSegment, PrecisionModel};
use crate::graph::Position;
use crate::math::angle_2d::{angle, angle_between_oriented, normalize};
use crate::math::intersect_2d::{line_intersection, segment_intersection, SegmentIntersection};
use crate::math::orientation_2d::{orientation_index, Orientation};
use crate::math::Point2;

use super::params::{BufferParameters, EndCapStyle, JoinStyle};
use super::segment_string::OffsetSegmentString;

/// Factor controlling how close offset segment endpoints can be before a
/// filler or mitre is skipped and a single point is used instead.
const OFFSET_SEGMENT_SEPARATION_FACTOR: f64 = 1.0e-3;

/// Factor controlling how close offset endpoints on inside turns can be
/// before they are snapped to a single vertex.
const INSIDE_TURN_VERTEX_SNAP_DISTANCE_FACTOR: f64 = 1.0e-3;

/// Factor controlling how close consecutive curve vertices can be before
/// being suppressed.
const CURVE_VERTEX_SNAP_DISTANCE_FACTOR: f64 = 1.0e-6;

/// Closing-segment shortening factor used for round joins with
/// default-or-better quantization.
///
/// A factor of 0 draws closing segments to the corner vertex, 1 halfway to
/// it, and 80 only 1/81 of the way, which minimizes the self-intersections
/// fed to the noder.
const MAX_CLOSING_SEG_LEN_FACTOR: i32 = 80;

/// Generates the segments forming one offset curve.
///
/// A stateful per-vertex generator: the state is the moving three-point
/// window over the input line plus the offset segments of its two sides.
/// Supports all end cap and join styles, with heuristics that keep the
/// curve smooth and simple while staying within a small tolerance of the
/// true offset curve.
#[derive(Debug)]
pub(crate) struct OffsetSegmentGenerator {
    precision: PrecisionModel,
    params: BufferParameters,
    fillet_angle_quantum: f64,
    closing_seg_length_factor: i32,
    seg_list: OffsetSegmentString,
    distance: f64,
    s0: Point2,
    s1: Point2,
    s2: Point2,
    offset0: LineSegment,
    offset1: LineSegment,
    side: Position,
    has_narrow_concave_angle: bool,
}

impl OffsetSegmentGenerator {
    pub fn new(precision: PrecisionModel, params: BufferParameters, distance: f64) -> Self {
        // Non-round joins cause issues with short closing segments, so the
        // shortening only applies to round joins at reasonable quantization.
        let closing_seg_length_factor =
            if params.quadrant_segments() >= 8 && params.join_style() == JoinStyle::Round {
                MAX_CLOSING_SEG_LEN_FACTOR
            } else {
                1
            };

        let origin = Point2::origin();
        Self {
            precision,
            params,
            fillet_angle_quantum: params.fillet_angle_quantum(),
            closing_seg_length_factor,
            seg_list: OffsetSegmentString::new(
                precision,
                distance * CURVE_VERTEX_SNAP_DISTANCE_FACTOR,
            ),
            distance,
            s0: origin,
            s1: origin,
            s2: origin,
            offset0: LineSegment::new(origin, origin),
            offset1: LineSegment::new(origin, origin),
            side: Position::Left,
            has_narrow_concave_angle: false,
        }
    }

    /// Starts a pass along one side of the input line.
    ///
    /// # Errors
    ///
    /// Returns an error if the initial segment has zero length.
    pub fn init_side_segments(
        &mut self,
        s1: Point2,
        s2: Point2,
        side: Position,
    ) -> Result<(), GeometryError> {
        self.s1 = s1;
        self.s2 = s2;
        self.side = side;
        self.offset1 = self.offset_segment(s1, s2)?;
        Ok(())
    }

    /// Advances the window to the next input vertex and emits the join.
    ///
    /// # Errors
    ///
    /// Returns an error if a window segment has zero length.
    pub fn add_next_segment(
        &mut self,
        p: Point2,
        add_start_point: bool,
    ) -> Result<(), GeometryError> {
        // do nothing if points are equal
        if p == self.s2 {
            return Ok(());
        }
        self.s0 = self.s1;
        self.s1 = self.s2;
        self.s2 = p;
        self.offset0 = self.offset_segment(self.s0, self.s1)?;
        self.offset1 = self.offset_segment(self.s1, self.s2)?;

        let orientation = orientation_index(&self.s0, &self.s1, &self.s2);
        let outside_turn = (orientation == Orientation::Clockwise && self.side == Position::Left)
            || (orientation == Orientation::CounterClockwise && self.side == Position::Right);

        if orientation == Orientation::Collinear {
            self.add_collinear(add_start_point);
        } else if outside_turn {
            self.add_outside_turn(orientation, add_start_point);
        } else {
            self.add_inside_turn();
        }
        Ok(())
    }

    /// Adds the first point of the current offset segment.
    pub fn add_first_segment(&mut self) {
        self.seg_list.add_point(&self.offset1.p0);
    }

    /// Adds the last point of the current offset segment.
    pub fn add_last_segment(&mut self) {
        self.seg_list.add_point(&self.offset1.p1);
    }

    /// Appends raw input points to the curve (used for single-sided buffers).
    pub fn add_segments(&mut self, points: &[Point2], forward: bool) {
        self.seg_list.add_points(points, forward);
    }

    pub fn close_ring(&mut self) {
        self.seg_list.close_ring();
    }

    /// Whether an inside turn was too narrow for the offset segments to
    /// intersect, requiring heuristic closing segments.
    pub fn has_narrow_concave_angle(&self) -> bool {
        self.has_narrow_concave_angle
    }

    pub fn into_points(self) -> Vec<Point2> {
        self.seg_list.into_points()
    }

    fn add_collinear(&mut self, add_start_point: bool) {
        let intersection = segment_intersection(&self.s0, &self.s1, &self.s1, &self.s2);
        // Fewer than two intersection points means the segments continue in
        // the same direction, so the offsets stay parallel and no join is
        // needed. Two points mean the segments are collinear but reversed:
        // wrap all the way around the reflex angle.
        if intersection.count() >= 2 {
            match self.params.join_style() {
                JoinStyle::Bevel | JoinStyle::Mitre => {
                    if add_start_point {
                        self.seg_list.add_point(&self.offset0.p1);
                    }
                    self.seg_list.add_point(&self.offset1.p0);
                }
                JoinStyle::Round => {
                    let (s1, p0, p1) = (self.s1, self.offset0.p1, self.offset1.p0);
                    self.add_corner_fillet(&s1, &p0, &p1, Orientation::Clockwise, self.distance);
                }
            }
        }
    }

    /// Adds the offset points for an outside (convex) turn.
    fn add_outside_turn(&mut self, orientation: Orientation, add_start_point: bool) {
        // If the offset segment endpoints are nearly coincident, use one of
        // them directly. Computing a mitre for two almost-parallel segments
        // is not robust.
        if (self.offset0.p1 - self.offset1.p0).norm()
            < self.distance * OFFSET_SEGMENT_SEPARATION_FACTOR
        {
            self.seg_list.add_point(&self.offset0.p1);
            return;
        }

        match self.params.join_style() {
            JoinStyle::Mitre => self.add_mitre_join(),
            JoinStyle::Bevel => self.add_bevel_join(),
            JoinStyle::Round => {
                if add_start_point {
                    self.seg_list.add_point(&self.offset0.p1);
                }
                let (s1, p0, p1) = (self.s1, self.offset0.p1, self.offset1.p0);
                self.add_corner_fillet(&s1, &p0, &p1, orientation, self.distance);
                self.seg_list.add_point(&p1);
            }
        }
    }

    /// Adds the offset points for an inside (concave) turn.
    fn add_inside_turn(&mut self) {
        let intersection = segment_intersection(
            &self.offset0.p0,
            &self.offset0.p1,
            &self.offset1.p0,
            &self.offset1.p1,
        );
        match intersection {
            SegmentIntersection::Point(p) | SegmentIntersection::Collinear(p, _) => {
                self.seg_list.add_point(&p);
            }
            SegmentIntersection::None => {
                // The angle is so sharp (or the offset so large) that the
                // offset segments diverge. A closing detour keeps the curve
                // continuous and tracking the buffer around the corner; it
                // never appears in the final boundary since it lies inside
                // the buffer region.
                self.has_narrow_concave_angle = true;
                if (self.offset0.p1 - self.offset1.p0).norm()
                    < self.distance * INSIDE_TURN_VERTEX_SNAP_DISTANCE_FACTOR
                {
                    // The offsets should intersect very close to their
                    // endpoints but rounding hid it; one endpoint suffices.
                    self.seg_list.add_point(&self.offset0.p1);
                } else {
                    self.seg_list.add_point(&self.offset0.p1);
                    if self.closing_seg_length_factor > 0 {
                        let f = f64::from(self.closing_seg_length_factor);
                        let mid0 = Point2::new(
                            (f * self.offset0.p1.x + self.s1.x) / (f + 1.0),
                            (f * self.offset0.p1.y + self.s1.y) / (f + 1.0),
                        );
                        self.seg_list.add_point(&mid0);
                        let mid1 = Point2::new(
                            (f * self.offset1.p0.x + self.s1.x) / (f + 1.0),
                            (f * self.offset1.p0.y + self.s1.y) / (f + 1.0),
                        );
                        self.seg_list.add_point(&mid1);
                    } else {
                        self.seg_list.add_point(&self.s1);
                    }
                    self.seg_list.add_point(&self.offset1.p0);
                }
            }
        }
    }

    /// Adds a bevel join connecting the two offset segments.
    fn add_bevel_join(&mut self) {
        self.seg_list.add_point(&self.offset0.p1);
        self.seg_list.add_point(&self.offset1.p0);
    }

    /// Adds a mitre join, falling back to a limited mitre when the spike
    /// exceeds the mitre limit or cannot be computed.
    fn add_mitre_join(&mut self) {
        // The intersection is unstable if the offset segments are nearly
        // collinear; that case was already handled by the coincident-endpoint
        // check in the outside-turn dispatch.
        let intersection = line_intersection(
            &self.offset0.p0,
            &self.offset0.p1,
            &self.offset1.p0,
            &self.offset1.p1,
        );
        if let Some(int_pt) = intersection {
            let mitre_ratio = if self.distance <= 0.0 {
                1.0
            } else {
                (int_pt - self.s1).norm() / self.distance.abs()
            };
            if mitre_ratio <= self.params.mitre_limit() {
                self.seg_list.add_point(&int_pt);
                return;
            }
        }
        self.add_limited_mitre_join();
    }

    /// Adds a mitre beveled at the distance determined by the mitre limit.
    fn add_limited_mitre_join(&mut self) {
        let base = self.s1;
        let ang0 = angle(&base, &self.s0);

        // Bisector of the interior angle, rotated by π to point into the
        // reflex angle where the mitre lies.
        let ang_diff_half = angle_between_oriented(&self.s0, &base, &self.s2) / 2.0;
        let mid_ang = normalize(ang0 + ang_diff_half);
        let mitre_mid_ang = normalize(mid_ang + PI);

        // The mitre limit sets the distance to the bevel segment; its half
        // length shrinks by how far the bevel midpoint overshoots the offset.
        let mitre_dist = self.params.mitre_limit() * self.distance;
        let bevel_delta = mitre_dist * ang_diff_half.sin().abs();
        let bevel_half_len = self.distance - bevel_delta;

        let bevel_mid = Point2::new(
            base.x + mitre_dist * mitre_mid_ang.cos(),
            base.y + mitre_dist * mitre_mid_ang.sin(),
        );
        let mitre_mid_line = LineSegment::new(base, bevel_mid);

        let bevel_end_left = mitre_mid_line.point_along_offset(1.0, bevel_half_len);
        let bevel_end_right = mitre_mid_line.point_along_offset(1.0, -bevel_half_len);

        if self.side == Position::Left {
            self.seg_list.add_point(&bevel_end_left);
            self.seg_list.add_point(&bevel_end_right);
        } else {
            self.seg_list.add_point(&bevel_end_right);
            self.seg_list.add_point(&bevel_end_left);
        }
    }

    /// Adds an end cap around `p1`, terminating a segment coming from `p0`.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminating segment has zero length.
    pub fn add_line_end_cap(&mut self, p0: &Point2, p1: &Point2) -> Result<(), GeometryError> {
        let seg = LineSegment::new(*p0, *p1);
        let offset_l = seg.offset(self.distance, &self.precision)?;
        let offset_r = seg.offset(-self.distance, &self.precision)?;

        let seg_angle = (p1.y - p0.y).atan2(p1.x - p0.x);

        match self.params.end_cap_style() {
            EndCapStyle::Round => {
                self.seg_list.add_point(&offset_l.p1);
                self.add_fillet_arc(
                    p1,
                    seg_angle + PI / 2.0,
                    seg_angle - PI / 2.0,
                    Orientation::Clockwise,
                    self.distance,
                );
                self.seg_list.add_point(&offset_r.p1);
            }
            EndCapStyle::Flat => {
                self.seg_list.add_point(&offset_l.p1);
                self.seg_list.add_point(&offset_r.p1);
            }
            EndCapStyle::Square => {
                let ext_x = self.distance.abs() * seg_angle.cos();
                let ext_y = self.distance.abs() * seg_angle.sin();
                self.seg_list
                    .add_point(&Point2::new(offset_l.p1.x + ext_x, offset_l.p1.y + ext_y));
                self.seg_list
                    .add_point(&Point2::new(offset_r.p1.x + ext_x, offset_r.p1.y + ext_y));
            }
        }
        Ok(())
    }

    /// Creates a clockwise circle around a point (round cap of a degenerate
    /// input).
    pub fn create_circle(&mut self, p: &Point2) {
        self.seg_list
            .add_point(&Point2::new(p.x + self.distance, p.y));
        self.add_fillet_arc(p, 0.0, 2.0 * PI, Orientation::Clockwise, self.distance);
        self.seg_list.close_ring();
    }

    /// Creates a clockwise square around a point (square cap of a degenerate
    /// input).
    pub fn create_square(&mut self, p: &Point2) {
        self.seg_list
            .add_point(&Point2::new(p.x + self.distance, p.y + self.distance));
        self.seg_list
            .add_point(&Point2::new(p.x + self.distance, p.y - self.distance));
        self.seg_list
            .add_point(&Point2::new(p.x - self.distance, p.y - self.distance));
        self.seg_list
            .add_point(&Point2::new(p.x - self.distance, p.y + self.distance));
        self.seg_list.close_ring();
    }

    /// Adds a fillet arc between two points around a corner, including both
    /// endpoints.
    fn add_corner_fillet(
        &mut self,
        p: &Point2,
        p0: &Point2,
        p1: &Point2,
        direction: Orientation,
        radius: f64,
    ) {
        let mut start_angle = (p0.y - p.y).atan2(p0.x - p.x);
        let end_angle = (p1.y - p.y).atan2(p1.x - p.x);

        if direction == Orientation::Clockwise {
            if start_angle <= end_angle {
                start_angle += 2.0 * PI;
            }
        } else if start_angle >= end_angle {
            start_angle -= 2.0 * PI;
        }

        self.seg_list.add_point(p0);
        self.add_fillet_arc(p, start_angle, end_angle, direction, radius);
        self.seg_list.add_point(p1);
    }

    /// Adds the interior points of a fillet arc between two angles. The arc
    /// endpoints themselves are not added.
    fn add_fillet_arc(
        &mut self,
        p: &Point2,
        start_angle: f64,
        end_angle: f64,
        direction: Orientation,
        radius: f64,
    ) {
        let direction_factor = if direction == Orientation::Clockwise {
            -1.0
        } else {
            1.0
        };

        let total_angle = (start_angle - end_angle).abs();
        #[allow(clippy::cast_possible_truncation)]
        let n_segs = (total_angle / self.fillet_angle_quantum + 0.5) as i64;
        if n_segs < 1 {
            // angle is below one quantum; nothing to add
            return;
        }

        #[allow(clippy::cast_precision_loss)]
        let angle_inc = total_angle / n_segs as f64;
        let mut curr_angle = 0.0;
        while curr_angle < total_angle {
            let a = start_angle + direction_factor * curr_angle;
            self.seg_list
                .add_point(&Point2::new(p.x + radius * a.cos(), p.y + radius * a.sin()));
            curr_angle += angle_inc;
        }
    }

    fn offset_segment(&self, p0: Point2, p1: Point2) -> Result<LineSegment, GeometryError> {
        let signed = if self.side == Position::Left {
            self.distance
        } else {
            -self.distance
        };
        LineSegment::new(p0, p1).offset(signed, &self.precision)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::buffer::params::EndCapStyle;

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    fn generator(params: BufferParameters, distance: f64) -> OffsetSegmentGenerator {
        OffsetSegmentGenerator::new(PrecisionModel::Floating, params, distance)
    }

    #[test]
    fn circle_has_expected_vertex_count() {
        let params = BufferParameters::with_quadrant_segments(8);
        let mut g = generator(params, 5.0);
        g.create_circle(&p(0.0, 0.0));
        let pts = g.into_points();
        // 32 distinct vertices plus the closing point.
        assert_eq!(pts.len(), 33);
        assert_eq!(pts[0], pts[pts.len() - 1]);
        for q in &pts {
            assert!(((q - p(0.0, 0.0)).norm() - 5.0).abs() < 1e-9);
        }
    }

    #[test]
    fn square_cap_for_point() {
        let params = BufferParameters::with_cap_style(8, EndCapStyle::Square);
        let mut g = generator(params, 2.0);
        g.create_square(&p(1.0, 1.0));
        let pts = g.into_points();
        assert_eq!(pts.len(), 5);
        assert!(pts.contains(&p(3.0, 3.0)));
        assert!(pts.contains(&p(-1.0, -1.0)));
    }

    #[test]
    fn near_coincident_outside_turn_collapses_to_one_point() {
        // Two segments turning outward by a tiny angle: the offset endpoints
        // land closer than distance * 1e-3 and must merge into one vertex.
        let distance = 10.0;
        let params = BufferParameters::with_quadrant_segments(8);
        let mut g = generator(params, distance);
        let a = p(0.0, 0.0);
        let b = p(100.0, 0.0);
        let c = p(200.0, -0.000_001);
        g.init_side_segments(a, b, Position::Left).unwrap();
        g.add_first_segment();
        g.add_next_segment(c, true).unwrap();
        g.add_last_segment();
        let pts = g.into_points();
        // start, single merged corner vertex, end
        assert_eq!(pts.len(), 3);
    }

    #[test]
    fn round_join_fillet_steps_bounded_by_quantum() {
        let params = BufferParameters::with_quadrant_segments(8);
        let quantum = params.fillet_angle_quantum();
        let mut g = generator(params, 1.0);
        let corner = p(10.0, 0.0);
        g.init_side_segments(p(0.0, 0.0), corner, Position::Left).unwrap();
        g.add_first_segment();
        // A right-angle convex turn on the left side.
        g.add_next_segment(p(10.0, -10.0), true).unwrap();
        g.add_last_segment();
        let pts = g.into_points();
        assert!(pts.len() > 8);
        for w in pts.windows(2) {
            let a0 = (w[0] - corner).normalize();
            let a1 = (w[1] - corner).normalize();
            // Only measure consecutive fillet points (both at radius ~1).
            if ((w[0] - corner).norm() - 1.0).abs() < 1e-6
                && ((w[1] - corner).norm() - 1.0).abs() < 1e-6
            {
                let step = a0.dot(&a1).clamp(-1.0, 1.0).acos();
                assert!(step <= quantum + 1e-9);
            }
        }
    }

    #[test]
    fn inside_turn_emits_closing_segments() {
        // A sharp concave turn relative to a large offset distance: the
        // offset segments diverge and closing segments appear.
        let params = BufferParameters::with_quadrant_segments(8);
        let mut g = generator(params, 5.0);
        g.init_side_segments(p(0.0, 0.0), p(10.0, 0.0), Position::Left)
            .unwrap();
        g.add_first_segment();
        g.add_next_segment(p(0.0, 1.0), true).unwrap();
        g.add_last_segment();
        assert!(g.has_narrow_concave_angle());
        let pts = g.into_points();
        assert!(pts.len() >= 5);
    }

    #[test]
    fn collinear_continuation_adds_nothing() {
        let params = BufferParameters::with_quadrant_segments(8);
        let mut g = generator(params, 1.0);
        g.init_side_segments(p(0.0, 0.0), p(1.0, 0.0), Position::Left)
            .unwrap();
        g.add_first_segment();
        g.add_next_segment(p(2.0, 0.0), true).unwrap();
        g.add_last_segment();
        let pts = g.into_points();
        // Straight continuation: just the two ends of the offset line.
        assert_eq!(pts.len(), 2);
        assert_eq!(pts[0], p(0.0, 1.0));
        assert_eq!(pts[1], p(2.0, 1.0));
    }

    #[test]
    fn collinear_reversal_round_join_wraps_fillet() {
        let params = BufferParameters::with_quadrant_segments(8);
        let mut g = generator(params, 1.0);
        g.init_side_segments(p(0.0, 0.0), p(2.0, 0.0), Position::Left)
            .unwrap();
        g.add_first_segment();
        // U-turn straight back along the same line.
        g.add_next_segment(p(0.0, 0.0), true).unwrap();
        g.add_last_segment();
        let pts = g.into_points();
        // A half-circle fillet around the reversal point.
        assert!(pts.len() >= 8);
        for q in &pts {
            assert!(((q - p(2.0, 0.0)).norm() - 1.0).abs() < 1e-9 || q.x < 2.0 + 1e-9);
        }
    }

    #[test]
    fn mitre_join_intersects_offset_lines() {
        let mut params = BufferParameters::with_quadrant_segments(8);
        params.set_join_style(JoinStyle::Mitre);
        let mut g = generator(params, 1.0);
        g.init_side_segments(p(0.0, 0.0), p(10.0, 0.0), Position::Left)
            .unwrap();
        g.add_first_segment();
        // Right-angle convex corner: mitre lands at the corner of the two
        // offset lines.
        g.add_next_segment(p(10.0, -10.0), true).unwrap();
        g.add_last_segment();
        let pts = g.into_points();
        assert!(pts.contains(&p(11.0, 1.0)));
    }

    #[test]
    fn sharp_mitre_is_limited() {
        let mut params = BufferParameters::with_quadrant_segments(8);
        params.set_join_style(JoinStyle::Mitre);
        params.set_mitre_limit(2.0);
        let mut g = generator(params, 1.0);
        g.init_side_segments(p(0.0, 0.0), p(10.0, 0.0), Position::Left)
            .unwrap();
        g.add_first_segment();
        // A nearly-reversing convex corner whose true mitre would spike far
        // beyond the limit.
        g.add_next_segment(p(0.5, -0.5), true).unwrap();
        g.add_last_segment();
        let pts = g.into_points();
        // The unlimited mitre would spike ~38 units out. Every emitted point
        // must stay either near the corner (within limit + distance) or on
        // one of the offset lines themselves.
        for q in &pts {
            let near_corner = (q - p(10.0, 0.0)).norm() <= 2.0 + 1.0 + 1e-6;
            let on_offset =
                crate::math::distance_2d::point_to_segment_dist(q, &p(0.0, 0.0), &p(10.0, 0.0))
                    <= 1.0 + 1e-6
                    || crate::math::distance_2d::point_to_segment_dist(
                        q,
                        &p(10.0, 0.0),
                        &p(0.5, -0.5),
                    ) <= 1.0 + 1e-6;
            assert!(near_corner || on_offset, "stray point {q:?}");
        }
    }

    #[test]
    fn flat_cap_adds_only_offset_ends() {
        let params = BufferParameters::with_cap_style(8, EndCapStyle::Flat);
        let mut g = generator(params, 2.0);
        g.init_side_segments(p(0.0, 0.0), p(10.0, 0.0), Position::Left)
            .unwrap();
        g.add_first_segment();
        g.add_last_segment();
        g.add_line_end_cap(&p(0.0, 0.0), &p(10.0, 0.0)).unwrap();
        let pts = g.into_points();
        assert_eq!(pts.len(), 3);
        assert_eq!(pts[2], p(10.0, -2.0));
    }

    #[test]
    fn square_cap_extends_beyond_endpoint() {
        let params = BufferParameters::with_cap_style(8, EndCapStyle::Square);
        let mut g = generator(params, 2.0);
        g.init_side_segments(p(0.0, 0.0), p(10.0, 0.0), Position::Left)
            .unwrap();
        g.add_first_segment();
        g.add_last_segment();
        g.add_line_end_cap(&p(0.0, 0.0), &p(10.0, 0.0)).unwrap();
        let pts = g.into_points();
        assert!(pts.contains(&p(12.0, 2.0)));
        assert!(pts.contains(&p(12.0, -2.0)));
    }
}
