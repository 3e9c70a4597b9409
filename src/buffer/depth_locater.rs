use std::cmp::Ordering;

use crate::error::TopologyError;
use crate::geometry::LineSegment;
use crate::graph::{BufferGraph, DirectedEdgeId, Position};
use crate::math::orientation_2d::orientation_sign;
use crate::math::Point2;

use super::subgraph::BufferSubgraph;

/// Computes the winding depth just outside a new subgraph, at its rightmost
/// coordinate, relative to the subgraphs already processed.
///
/// A horizontal ray is stabbed rightward from the point through the
/// previously built subgraphs; of the segments it crosses, the lowest one
/// determines the depth of the region containing the point.
pub(crate) fn subgraph_depth(
    graph: &BufferGraph,
    subgraphs: &[BufferSubgraph],
    p: &Point2,
) -> Result<i32, TopologyError> {
    let mut stabbed: Vec<DepthSegment> = Vec::new();
    for subgraph in subgraphs {
        let env = subgraph.envelope();
        if p.y < env.min_y() || p.y > env.max_y() {
            continue;
        }
        for &de_id in subgraph.directed_edges() {
            if !graph.directed_edge(de_id)?.forward {
                continue;
            }
            find_stabbed_segments(graph, de_id, p, &mut stabbed)?;
        }
    }

    let mut minimum: Option<&DepthSegment> = None;
    for candidate in &stabbed {
        let better = match minimum {
            None => true,
            Some(current) => candidate.compare(current) == Ordering::Less,
        };
        if better {
            minimum = Some(candidate);
        }
    }
    Ok(minimum.map_or(0, |seg| seg.left_depth))
}

/// Collects the segments of one directed edge crossed by the rightward
/// stabbing ray from `p`.
fn find_stabbed_segments(
    graph: &BufferGraph,
    de_id: DirectedEdgeId,
    p: &Point2,
    out: &mut Vec<DepthSegment>,
) -> Result<(), TopologyError> {
    let de = graph.directed_edge(de_id)?;
    let points = &graph.edge(de.edge)?.points;
    for i in 0..points.len() - 1 {
        let mut seg = LineSegment::new(points[i], points[i + 1]);
        // Normalize the segment to point upward.
        let flipped = seg.p0.y > seg.p1.y;
        if flipped {
            seg = seg.reversed();
        }

        // Skip segments entirely left of the stabbing ray.
        if seg.p0.x.max(seg.p1.x) < p.x {
            continue;
        }
        if seg.p0.y == seg.p1.y {
            continue;
        }
        if p.y < seg.p0.y || p.y > seg.p1.y {
            continue;
        }
        // The ray goes right, so the point must not be right of the segment.
        if orientation_sign(&seg.p0, &seg.p1, p) == -1 {
            continue;
        }

        // Flipping the segment swaps which side its left depth refers to.
        let side = if flipped {
            Position::Right
        } else {
            Position::Left
        };
        out.push(DepthSegment {
            seg,
            left_depth: de.depth[side.index()],
        });
    }
    Ok(())
}

/// An upward-normalized segment crossed by the stabbing ray, carrying the
/// depth of the region on its left.
#[derive(Debug)]
struct DepthSegment {
    seg: LineSegment,
    left_depth: i32,
}

impl DepthSegment {
    /// Orders stabbed segments so the minimum is the segment lying below the
    /// others where they overlap in x.
    fn compare(&self, other: &Self) -> Ordering {
        // Fast path when the segments are disjoint in x.
        if self.min_x() >= other.max_x() {
            return Ordering::Greater;
        }
        if self.max_x() <= other.min_x() {
            return Ordering::Less;
        }
        // Try both orientation tests; either may be indeterminate.
        let orient = segment_orientation_index(&self.seg, &other.seg);
        if orient != 0 {
            return int_ordering(orient);
        }
        let orient = -segment_orientation_index(&other.seg, &self.seg);
        if orient != 0 {
            return int_ordering(orient);
        }
        self.compare_lexicographic(other)
    }

    fn compare_lexicographic(&self, other: &Self) -> Ordering {
        point_ordering(&self.seg.p0, &other.seg.p0)
            .then_with(|| point_ordering(&self.seg.p1, &other.seg.p1))
    }

    fn min_x(&self) -> f64 {
        self.seg.p0.x.min(self.seg.p1.x)
    }

    fn max_x(&self) -> f64 {
        self.seg.p0.x.max(self.seg.p1.x)
    }
}

/// Orientation of `other` relative to `seg`: 1 if entirely to the left,
/// -1 if entirely to the right, 0 if indeterminate.
fn segment_orientation_index(seg: &LineSegment, other: &LineSegment) -> i32 {
    let orient0 = orientation_sign(&seg.p0, &seg.p1, &other.p0);
    let orient1 = orientation_sign(&seg.p0, &seg.p1, &other.p1);
    if orient0 >= 0 && orient1 >= 0 {
        orient0.max(orient1)
    } else if orient0 <= 0 && orient1 <= 0 {
        orient0.min(orient1)
    } else {
        0
    }
}

fn int_ordering(value: i32) -> Ordering {
    value.cmp(&0)
}

fn point_ordering(a: &Point2, b: &Point2) -> Ordering {
    a.x.total_cmp(&b.x).then_with(|| a.y.total_cmp(&b.y))
}
