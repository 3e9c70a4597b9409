use super::orientation_2d::orientation_sign;
use super::{Point2, TOLERANCE};

/// Result of intersecting two bounded line segments.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SegmentIntersection {
    /// The segments do not intersect.
    None,
    /// The segments intersect in a single point.
    Point(Point2),
    /// The segments are collinear and overlap along a sub-segment.
    Collinear(Point2, Point2),
}

impl SegmentIntersection {
    /// Number of intersection points (0, 1 or 2).
    #[must_use]
    pub fn count(&self) -> usize {
        match self {
            Self::None => 0,
            Self::Point(_) => 1,
            Self::Collinear(_, _) => 2,
        }
    }
}

/// Computes the intersection of the bounded segments `p1`-`p2` and `q1`-`q2`.
///
/// Endpoint touches are reported as single points using the exact input
/// coordinate. Collinear overlaps report both overlap endpoints. When the
/// segments cross but the intersection point cannot be computed reliably
/// (near-parallel lines), the central-endpoint heuristic is used so a finite
/// existing coordinate is always returned.
#[must_use]
pub fn segment_intersection(
    p1: &Point2,
    p2: &Point2,
    q1: &Point2,
    q2: &Point2,
) -> SegmentIntersection {
    if !envelopes_overlap(p1, p2, q1, q2) {
        return SegmentIntersection::None;
    }

    let pq1 = orientation_sign(p1, p2, q1);
    let pq2 = orientation_sign(p1, p2, q2);
    if (pq1 > 0 && pq2 > 0) || (pq1 < 0 && pq2 < 0) {
        return SegmentIntersection::None;
    }
    let qp1 = orientation_sign(q1, q2, p1);
    let qp2 = orientation_sign(q1, q2, p2);
    if (qp1 > 0 && qp2 > 0) || (qp1 < 0 && qp2 < 0) {
        return SegmentIntersection::None;
    }

    if pq1 == 0 && pq2 == 0 && qp1 == 0 && qp2 == 0 {
        return collinear_intersection(p1, p2, q1, q2);
    }

    // Propagate exact endpoint coordinates where one segment ends on the other.
    if pq1 == 0 {
        return SegmentIntersection::Point(*q1);
    }
    if pq2 == 0 {
        return SegmentIntersection::Point(*q2);
    }
    if qp1 == 0 {
        return SegmentIntersection::Point(*p1);
    }
    if qp2 == 0 {
        return SegmentIntersection::Point(*p2);
    }

    match line_intersection(p1, p2, q1, q2) {
        Some(pt) if in_segment_envelopes(&pt, p1, p2, q1, q2) => SegmentIntersection::Point(pt),
        _ => SegmentIntersection::Point(central_endpoint(p1, p2, q1, q2)),
    }
}

/// Intersection point of the infinite lines through `p1`-`p2` and `q1`-`q2`.
///
/// Returns `None` if the lines are parallel or nearly so.
#[must_use]
pub fn line_intersection(p1: &Point2, p2: &Point2, q1: &Point2, q2: &Point2) -> Option<Point2> {
    let dp = p2 - p1;
    let dq = q2 - q1;
    let lp = dp.norm();
    let lq = dq.norm();
    if lp < TOLERANCE || lq < TOLERANCE {
        return None;
    }
    let up = dp / lp;
    let uq = dq / lq;

    let cross = up.x * uq.y - up.y * uq.x;
    if cross.abs() < TOLERANCE {
        return None;
    }
    let dx = q1.x - p1.x;
    let dy = q1.y - p1.y;
    let t = (dx * uq.y - dy * uq.x) / cross;
    Some(Point2::new(p1.x + up.x * t, p1.y + up.y * t))
}

/// Picks, among the four segment endpoints, the one closest to their
/// centroid. Used as a robust fallback when an exact intersection of
/// nearly-parallel lines cannot be computed.
#[must_use]
pub fn central_endpoint(p1: &Point2, p2: &Point2, q1: &Point2, q2: &Point2) -> Point2 {
    let cx = (p1.x + p2.x + q1.x + q2.x) / 4.0;
    let cy = (p1.y + p2.y + q1.y + q2.y) / 4.0;
    let centre = Point2::new(cx, cy);

    let mut best = *p1;
    let mut best_dist = (p1 - centre).norm_squared();
    for cand in [p2, q1, q2] {
        let d = (cand - centre).norm_squared();
        if d < best_dist {
            best = *cand;
            best_dist = d;
        }
    }
    best
}

fn collinear_intersection(
    p1: &Point2,
    p2: &Point2,
    q1: &Point2,
    q2: &Point2,
) -> SegmentIntersection {
    let dir = p2 - p1;
    let len_sq = dir.norm_squared();
    if len_sq < TOLERANCE * TOLERANCE {
        // p is a single point lying on q.
        return SegmentIntersection::Point(*p1);
    }
    let tq1 = (q1 - p1).dot(&dir) / len_sq;
    let tq2 = (q2 - p1).dot(&dir) / len_sq;

    let (qa, ta, qb, tb) = if tq1 <= tq2 {
        (q1, tq1, q2, tq2)
    } else {
        (q2, tq2, q1, tq1)
    };
    if tb < 0.0 || ta > 1.0 {
        return SegmentIntersection::None;
    }

    // Each overlap endpoint coincides with one of the four input points.
    let lo = if ta > 0.0 { *qa } else { *p1 };
    let hi = if tb < 1.0 { *qb } else { *p2 };
    if (hi - lo).norm() < TOLERANCE {
        SegmentIntersection::Point(lo)
    } else {
        SegmentIntersection::Collinear(lo, hi)
    }
}

fn envelopes_overlap(p1: &Point2, p2: &Point2, q1: &Point2, q2: &Point2) -> bool {
    p1.x.min(p2.x) <= q1.x.max(q2.x)
        && q1.x.min(q2.x) <= p1.x.max(p2.x)
        && p1.y.min(p2.y) <= q1.y.max(q2.y)
        && q1.y.min(q2.y) <= p1.y.max(p2.y)
}

fn in_segment_envelopes(pt: &Point2, p1: &Point2, p2: &Point2, q1: &Point2, q2: &Point2) -> bool {
    let eps = TOLERANCE;
    pt.x >= p1.x.min(p2.x) - eps
        && pt.x <= p1.x.max(p2.x) + eps
        && pt.y >= p1.y.min(p2.y) - eps
        && pt.y <= p1.y.max(p2.y) + eps
        && pt.x >= q1.x.min(q2.x) - eps
        && pt.x <= q1.x.max(q2.x) + eps
        && pt.y >= q1.y.min(q2.y) - eps
        && pt.y <= q1.y.max(q2.y) + eps
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn crossing_segments() {
        let r = segment_intersection(
            &Point2::new(0.0, 0.0),
            &Point2::new(2.0, 2.0),
            &Point2::new(0.0, 2.0),
            &Point2::new(2.0, 0.0),
        );
        match r {
            SegmentIntersection::Point(p) => {
                assert!((p.x - 1.0).abs() < TOLERANCE);
                assert!((p.y - 1.0).abs() < TOLERANCE);
            }
            other => panic!("expected point intersection, got {other:?}"),
        }
    }

    #[test]
    fn disjoint_segments() {
        let r = segment_intersection(
            &Point2::new(0.0, 0.0),
            &Point2::new(1.0, 0.0),
            &Point2::new(0.0, 1.0),
            &Point2::new(1.0, 1.0),
        );
        assert_eq!(r, SegmentIntersection::None);
    }

    #[test]
    fn endpoint_touch_uses_exact_coordinate() {
        let q1 = Point2::new(1.0, 0.0);
        let r = segment_intersection(
            &Point2::new(0.0, 0.0),
            &Point2::new(2.0, 0.0),
            &q1,
            &Point2::new(1.0, 3.0),
        );
        assert_eq!(r, SegmentIntersection::Point(q1));
    }

    #[test]
    fn collinear_overlap_two_points() {
        let r = segment_intersection(
            &Point2::new(0.0, 0.0),
            &Point2::new(4.0, 0.0),
            &Point2::new(6.0, 0.0),
            &Point2::new(2.0, 0.0),
        );
        match r {
            SegmentIntersection::Collinear(a, b) => {
                assert!((a.x - 2.0).abs() < TOLERANCE);
                assert!((b.x - 4.0).abs() < TOLERANCE);
            }
            other => panic!("expected collinear overlap, got {other:?}"),
        }
        assert_eq!(r.count(), 2);
    }

    #[test]
    fn collinear_disjoint() {
        let r = segment_intersection(
            &Point2::new(0.0, 0.0),
            &Point2::new(1.0, 0.0),
            &Point2::new(2.0, 0.0),
            &Point2::new(3.0, 0.0),
        );
        assert_eq!(r, SegmentIntersection::None);
    }

    #[test]
    fn collinear_touch_single_point() {
        let r = segment_intersection(
            &Point2::new(0.0, 0.0),
            &Point2::new(1.0, 0.0),
            &Point2::new(1.0, 0.0),
            &Point2::new(3.0, 0.0),
        );
        assert_eq!(r, SegmentIntersection::Point(Point2::new(1.0, 0.0)));
    }

    #[test]
    fn line_intersection_parallel_returns_none() {
        let r = line_intersection(
            &Point2::new(0.0, 0.0),
            &Point2::new(1.0, 0.0),
            &Point2::new(0.0, 1.0),
            &Point2::new(1.0, 1.0),
        );
        assert!(r.is_none());
    }

    #[test]
    fn central_endpoint_picks_nearest() {
        let p = central_endpoint(
            &Point2::new(0.0, 0.0),
            &Point2::new(10.0, 0.0),
            &Point2::new(4.0, 1.0),
            &Point2::new(14.0, 1.0),
        );
        // Centroid is (7, 0.5); nearest endpoint is (4, 1).
        assert_eq!(p, Point2::new(4.0, 1.0));
    }
}
