use crate::error::Result;
use crate::math::intersect_2d::{segment_intersection, SegmentIntersection};
use crate::math::{Point2, TOLERANCE};

use super::{Noder, SegmentString};

/// Brute-force noder: intersects every segment pair across and within the
/// input curves and splits the curves at each intersection.
///
/// No spatial index is used; every pair is tested.
#[derive(Debug, Default)]
pub struct IntersectionNoder;

impl IntersectionNoder {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Noder for IntersectionNoder {
    fn compute_nodes(&self, strings: &[SegmentString]) -> Result<Vec<SegmentString>> {
        let mut work: Vec<StringSplits> = strings.iter().map(StringSplits::new).collect();

        for i in 0..strings.len() {
            for j in i..strings.len() {
                intersect_pair(strings, &mut work, i, j);
            }
        }

        let mut out = Vec::new();
        for (string, splits) in strings.iter().zip(&work) {
            out.extend(splits.split_string(string));
        }
        Ok(out)
    }
}

/// Per-string split bookkeeping: points inserted into segment interiors and
/// existing vertices marked as nodes.
struct StringSplits {
    /// For each segment, the intersection points in its interior with their
    /// parameter along the segment.
    segment_splits: Vec<Vec<(f64, Point2)>>,
    /// Vertices that coincide with an intersection point.
    vertex_nodes: Vec<bool>,
}

impl StringSplits {
    fn new(string: &SegmentString) -> Self {
        let n = string.points.len();
        Self {
            segment_splits: vec![Vec::new(); n.saturating_sub(1)],
            vertex_nodes: vec![false; n],
        }
    }

    /// Records an intersection point on a segment, snapping to the segment
    /// endpoints when it coincides with one.
    fn record(&mut self, points: &[Point2], segment: usize, intersection: &Point2) {
        let s0 = points[segment];
        let s1 = points[segment + 1];
        if (intersection - s0).norm() < TOLERANCE {
            self.vertex_nodes[segment] = true;
        } else if (intersection - s1).norm() < TOLERANCE {
            self.vertex_nodes[segment + 1] = true;
        } else {
            let dir = s1 - s0;
            let t = (intersection - s0).dot(&dir) / dir.norm_squared();
            self.segment_splits[segment].push((t.clamp(0.0, 1.0), *intersection));
        }
    }

    /// Rebuilds the string with split points inserted and cuts it into
    /// substrings at every node vertex.
    fn split_string(&self, string: &SegmentString) -> Vec<SegmentString> {
        // Insert split points in parameter order.
        let mut enriched: Vec<(Point2, bool)> = Vec::with_capacity(string.points.len());
        for (i, splits) in self.segment_splits.iter().enumerate() {
            enriched.push((string.points[i], self.vertex_nodes[i]));
            let mut ordered = splits.clone();
            ordered.sort_by(|a, b| a.0.total_cmp(&b.0));
            for (_, p) in ordered {
                if enriched.last().map(|(q, _)| (p - q).norm() < TOLERANCE) != Some(true) {
                    enriched.push((p, true));
                }
            }
        }
        let last_index = string.points.len() - 1;
        let last = (string.points[last_index], self.vertex_nodes[last_index]);
        if enriched.last().map(|(q, _)| (last.0 - q).norm() < TOLERANCE) == Some(true) {
            // keep the node mark if the trailing duplicate carried one
            if let Some(tail) = enriched.last_mut() {
                tail.1 = tail.1 || last.1;
            }
        } else {
            enriched.push(last);
        }

        // Cut at node vertices.
        let mut out = Vec::new();
        let mut current: Vec<Point2> = Vec::new();
        for (index, &(p, is_node)) in enriched.iter().enumerate() {
            current.push(p);
            let interior_node = is_node && index > 0 && index < enriched.len() - 1;
            if interior_node {
                if current.len() >= 2 {
                    out.push(SegmentString::new(current.clone(), string.label));
                }
                current.clear();
                current.push(p);
            }
        }
        if current.len() >= 2 {
            out.push(SegmentString::new(current, string.label));
        }
        out
    }
}

fn intersect_pair(strings: &[SegmentString], work: &mut [StringSplits], i: usize, j: usize) {
    let si = &strings[i];
    let sj = &strings[j];
    let same_string = i == j;
    let closed = si.is_closed();
    let seg_count_i = si.points.len() - 1;
    let seg_count_j = sj.points.len() - 1;

    for a in 0..seg_count_i {
        let b_start = if same_string { a } else { 0 };
        for b in b_start..seg_count_j {
            if same_string && a == b {
                continue;
            }
            let adjacent = same_string
                && (a + 1 == b || b + 1 == a || (closed && a == 0 && b == seg_count_i - 1));

            let p1 = &si.points[a];
            let p2 = &si.points[a + 1];
            let q1 = &sj.points[b];
            let q2 = &sj.points[b + 1];

            match segment_intersection(p1, p2, q1, q2) {
                SegmentIntersection::None => {}
                SegmentIntersection::Point(p) => {
                    if adjacent && is_shared_vertex(&p, p1, p2, q1, q2) {
                        continue;
                    }
                    record_both(strings, work, i, a, j, b, &p);
                }
                SegmentIntersection::Collinear(c0, c1) => {
                    record_both(strings, work, i, a, j, b, &c0);
                    record_both(strings, work, i, a, j, b, &c1);
                }
            }
        }
    }
}

fn record_both(
    strings: &[SegmentString],
    work: &mut [StringSplits],
    i: usize,
    a: usize,
    j: usize,
    b: usize,
    p: &Point2,
) {
    work[i].record(&strings[i].points, a, p);
    work[j].record(&strings[j].points, b, p);
}

/// Tests whether an intersection point is just the vertex shared by two
/// adjacent segments of the same string.
fn is_shared_vertex(p: &Point2, p1: &Point2, p2: &Point2, q1: &Point2, q2: &Point2) -> bool {
    let shared = |a: &Point2, b: &Point2| (a - b).norm() < TOLERANCE;
    ((shared(p1, q1) || shared(p1, q2)) && shared(p, p1))
        || ((shared(p2, q1) || shared(p2, q2)) && shared(p, p2))
}
