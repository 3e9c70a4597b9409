use crate::math::Point2;

use super::edge::DirectedEdgeId;

slotmap::new_key_type! {
    /// Unique identifier for a node in the buffer graph.
    pub struct NodeId;
}

/// A graph vertex: an endpoint shared by one or more noded curves.
///
/// The star holds every directed edge leaving this node, sorted
/// counter-clockwise by direction once the graph is built.
#[derive(Debug, Clone)]
pub struct Node {
    /// Coordinate of the node.
    pub coordinate: Point2,
    /// Outgoing directed edges in counter-clockwise order.
    pub star: Vec<DirectedEdgeId>,
    /// Traversal mark used during subgraph discovery.
    pub visited: bool,
}

impl Node {
    #[must_use]
    pub fn new(coordinate: Point2) -> Self {
        Self {
            coordinate,
            star: Vec::new(),
            visited: false,
        }
    }
}
