use std::collections::{HashSet, VecDeque};

use crate::error::TopologyError;
use crate::geometry::BoundingBox;
use crate::graph::{BufferGraph, DirectedEdgeId, Location, NodeId, Position};
use crate::math::Point2;

use super::rightmost::find_rightmost_edge;

/// One maximal connected component of the buffer graph.
///
/// Owns its directed-edge and node lists, the cached rightmost coordinate
/// (used to order subgraphs so shells resolve before their holes) and the
/// cached envelope.
#[derive(Debug)]
pub(crate) struct BufferSubgraph {
    dir_edges: Vec<DirectedEdgeId>,
    nodes: Vec<NodeId>,
    oriented_de: DirectedEdgeId,
    rightmost_coord: Point2,
    env: BoundingBox,
}

impl BufferSubgraph {
    /// Discovers the component reachable from `seed`, marking nodes visited.
    ///
    /// Traversal is iterative with an explicit stack, so stack depth stays
    /// bounded on large inputs.
    ///
    /// # Errors
    ///
    /// Returns an error if the component's rightmost edge cannot be
    /// determined.
    pub fn create(graph: &mut BufferGraph, seed: NodeId) -> Result<Self, TopologyError> {
        let mut dir_edges = Vec::new();
        let mut nodes = Vec::new();

        let mut stack = vec![seed];
        while let Some(node_id) = stack.pop() {
            if graph.node(node_id)?.visited {
                continue;
            }
            graph.node_mut(node_id)?.visited = true;
            nodes.push(node_id);

            let star = graph.node(node_id)?.star.clone();
            for de_id in star {
                dir_edges.push(de_id);
                let sym = graph.directed_edge(de_id)?.sym;
                let sym_node = graph.directed_edge(sym)?.node;
                if !graph.node(sym_node)?.visited {
                    stack.push(sym_node);
                }
            }
        }

        let (oriented_de, rightmost_coord) = find_rightmost_edge(graph, &dir_edges)?;

        let mut env = BoundingBox::new();
        for &de_id in &dir_edges {
            let de = graph.directed_edge(de_id)?;
            if !de.forward {
                continue;
            }
            for p in &graph.edge(de.edge)?.points {
                env.expand_to_include(p);
            }
        }

        Ok(Self {
            dir_edges,
            nodes,
            oriented_de,
            rightmost_coord,
            env,
        })
    }

    pub fn rightmost_coordinate(&self) -> &Point2 {
        &self.rightmost_coord
    }

    pub fn envelope(&self) -> &BoundingBox {
        &self.env
    }

    pub fn directed_edges(&self) -> &[DirectedEdgeId] {
        &self.dir_edges
    }

    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    /// Assigns winding depths to every directed edge of the subgraph.
    ///
    /// The rightmost edge is seeded with `outside_depth` on its right side
    /// (the side known to face away from this subgraph), then depths spread
    /// node by node in a breadth-first traversal.
    ///
    /// # Errors
    ///
    /// Returns an error if depth propagation reaches a node with no labeled
    /// incident edge or the depths are inconsistent.
    pub fn compute_depth(
        &self,
        graph: &mut BufferGraph,
        outside_depth: i32,
    ) -> Result<(), TopologyError> {
        self.clear_visited_edges(graph)?;
        graph.set_edge_depths(self.oriented_de, Position::Right, outside_depth)?;
        graph.copy_sym_depths(self.oriented_de)?;
        self.compute_depths(graph, self.oriented_de)
    }

    /// Breadth-first depth propagation over the subgraph's nodes.
    fn compute_depths(
        &self,
        graph: &mut BufferGraph,
        start_edge: DirectedEdgeId,
    ) -> Result<(), TopologyError> {
        let mut nodes_visited: HashSet<NodeId> = HashSet::new();
        let mut node_queue: VecDeque<NodeId> = VecDeque::new();

        let start_node = graph.directed_edge(start_edge)?.node;
        node_queue.push_back(start_node);
        nodes_visited.insert(start_node);
        graph.directed_edge_mut(start_edge)?.visited = true;

        while let Some(node_id) = node_queue.pop_front() {
            compute_node_depth(graph, node_id)?;

            // Enqueue unvisited neighbours.
            let star = graph.node(node_id)?.star.clone();
            for de_id in star {
                let sym = graph.directed_edge(de_id)?.sym;
                if graph.directed_edge(sym)?.visited {
                    continue;
                }
                let adjacent = graph.directed_edge(sym)?.node;
                if nodes_visited.insert(adjacent) {
                    node_queue.push_back(adjacent);
                }
            }
        }
        Ok(())
    }

    fn clear_visited_edges(&self, graph: &mut BufferGraph) -> Result<(), TopologyError> {
        for &de_id in &self.dir_edges {
            graph.directed_edge_mut(de_id)?.visited = false;
        }
        Ok(())
    }

    /// Marks the directed edges lying on the buffer boundary.
    ///
    /// An edge is on the boundary iff the buffer interior is on its right
    /// (depth >= 1) and the exterior on its left (depth <= 0; negative
    /// depths from rounding count as exterior), and it is not an edge fully
    /// interior to the buffer area.
    ///
    /// # Errors
    ///
    /// Returns an error if an entity lookup fails.
    pub fn find_result_edges(&self, graph: &mut BufferGraph) -> Result<(), TopologyError> {
        for &de_id in &self.dir_edges {
            let de = graph.directed_edge(de_id)?;
            let right = de.depth[Position::Right.index()];
            let left = de.depth[Position::Left.index()];
            let label = graph.edge(de.edge)?.label;
            let interior_area_edge =
                label.left == Location::Interior && label.right == Location::Interior;
            if right >= 1 && left <= 0 && !interior_area_edge {
                graph.directed_edge_mut(de_id)?.in_result = true;
            }
        }
        Ok(())
    }
}

/// Computes the depths of all edges in one node's star, starting from any
/// edge already labeled by a previous step.
fn compute_node_depth(graph: &mut BufferGraph, node_id: NodeId) -> Result<(), TopologyError> {
    let star = graph.node(node_id)?.star.clone();

    // Find an edge with depths already assigned.
    let mut start: Option<DirectedEdgeId> = None;
    for &de_id in &star {
        let de = graph.directed_edge(de_id)?;
        if de.visited || graph.directed_edge(de.sym)?.visited {
            start = Some(de_id);
            break;
        }
    }
    let Some(start) = start else {
        let c = graph.node(node_id)?.coordinate;
        return Err(TopologyError::UnlabelledNode { x: c.x, y: c.y });
    };

    graph.compute_node_depths(node_id, start)?;

    for &de_id in &star {
        graph.directed_edge_mut(de_id)?.visited = true;
        graph.copy_sym_depths(de_id)?;
    }
    Ok(())
}
