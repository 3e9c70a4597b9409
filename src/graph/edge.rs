use crate::math::{Point2, Vector2};

use super::label::Label;
use super::node::NodeId;

slotmap::new_key_type! {
    /// Unique identifier for an undirected edge in the buffer graph.
    pub struct EdgeId;
}

slotmap::new_key_type! {
    /// Unique identifier for a directed edge in the buffer graph.
    pub struct DirectedEdgeId;
}

/// An undirected geometric edge: a noded curve substring with its
/// topological label and accumulated depth delta.
///
/// Two edges traversing the same point sequence (forward or reversed) are
/// merged on insertion; their depth deltas add, with the sign flipped when
/// the traversal direction was reversed.
#[derive(Debug, Clone)]
pub struct Edge {
    /// The vertex chain of the edge.
    pub points: Vec<Point2>,
    /// Label relative to the forward direction of `points`.
    pub label: Label,
    /// Accumulated change in winding depth when crossing right to left.
    pub depth_delta: i32,
}

/// One traversal direction of an [`Edge`].
///
/// Every edge has exactly two directed edges, linked through `sym`. Depths,
/// visit marks and result-ring links live here because they depend on the
/// traversal direction.
#[derive(Debug, Clone)]
pub struct DirectedEdge {
    /// The underlying undirected edge.
    pub edge: EdgeId,
    /// Whether this direction follows the edge's stored point order.
    pub forward: bool,
    /// The directed edge in the opposite direction.
    pub sym: DirectedEdgeId,
    /// The node this directed edge leaves from.
    pub node: NodeId,
    /// Direction vector of the first segment in traversal order.
    pub direction: Vector2,
    /// Quadrant of `direction` (0 = NE, 1 = NW, 2 = SW, 3 = SE).
    pub quadrant: u8,
    /// Winding depth on each side, indexed by [`super::label::Position`].
    pub depth: [i32; 2],
    /// Traversal mark, reset between passes.
    pub visited: bool,
    /// Whether this directed edge lies on the result boundary.
    pub in_result: bool,
    /// Next directed edge of the result boundary (maximal ring link).
    pub next: Option<DirectedEdgeId>,
    /// Next directed edge within a minimal ring.
    pub next_min: Option<DirectedEdgeId>,
    /// Maximal ring this edge was assigned to during polygon building.
    pub ring: Option<usize>,
    /// Minimal ring this edge was assigned to during polygon building.
    pub min_ring: Option<usize>,
}

/// Quadrant of a direction vector (0 = NE, 1 = NW, 2 = SW, 3 = SE),
/// counting counter-clockwise from the positive x-axis.
#[must_use]
pub fn quadrant(direction: &Vector2) -> u8 {
    if direction.x >= 0.0 {
        if direction.y >= 0.0 {
            0
        } else {
            3
        }
    } else if direction.y >= 0.0 {
        1
    } else {
        2
    }
}

/// Tests whether a quadrant lies in the upper half-plane.
#[must_use]
pub fn is_northern(quadrant: u8) -> bool {
    quadrant == 0 || quadrant == 1
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn quadrants() {
        assert_eq!(quadrant(&Vector2::new(1.0, 1.0)), 0);
        assert_eq!(quadrant(&Vector2::new(-1.0, 1.0)), 1);
        assert_eq!(quadrant(&Vector2::new(-1.0, -1.0)), 2);
        assert_eq!(quadrant(&Vector2::new(1.0, -1.0)), 3);
        // Axis directions resolve counter-clockwise.
        assert_eq!(quadrant(&Vector2::new(1.0, 0.0)), 0);
        assert_eq!(quadrant(&Vector2::new(0.0, -1.0)), 3);
    }

    #[test]
    fn northern_hemisphere() {
        assert!(is_northern(0));
        assert!(is_northern(1));
        assert!(!is_northern(2));
        assert!(!is_northern(3));
    }
}
