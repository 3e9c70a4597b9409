pub mod edge;
pub mod label;
pub mod node;

pub use edge::{DirectedEdge, DirectedEdgeId, Edge, EdgeId};
pub use label::{Label, Location, Position};
pub use node::{Node, NodeId};

use std::cmp::Ordering;
use std::collections::HashMap;

use slotmap::SlotMap;

use crate::error::TopologyError;
use crate::math::Point2;

use edge::{is_northern, quadrant};

/// Central arena that owns the planar graph built from noded offset curves.
///
/// Edges, directed edges and nodes reference each other via typed IDs
/// (generational indices), avoiding self-referential structures. The graph
/// lives for a single buffer computation and is discarded afterwards.
#[derive(Debug, Default)]
pub struct BufferGraph {
    edges: SlotMap<EdgeId, Edge>,
    directed_edges: SlotMap<DirectedEdgeId, DirectedEdge>,
    nodes: SlotMap<NodeId, Node>,
    edge_index: HashMap<Vec<(u64, u64)>, EdgeId>,
    node_index: HashMap<(u64, u64), NodeId>,
}

impl BufferGraph {
    /// Creates a new, empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an edge, merging it with an existing geometrically-equal edge.
    ///
    /// Two edges are equal if they traverse the same point sequence, forward
    /// or reversed. On a merge the depth deltas add, with the incoming label
    /// flipped when the traversal direction was reversed.
    pub fn insert_edge(&mut self, points: Vec<Point2>, label: Label) {
        let key = oriented_key(&points);
        if let Some(&existing_id) = self.edge_index.get(&key) {
            if let Some(existing) = self.edges.get_mut(existing_id) {
                let to_merge = if existing.points == points {
                    label
                } else {
                    label.flipped()
                };
                existing.depth_delta += to_merge.depth_delta();
            }
        } else {
            let depth_delta = label.depth_delta();
            let id = self.edges.insert(Edge {
                points,
                label,
                depth_delta,
            });
            self.edge_index.insert(key, id);
        }
    }

    /// Builds directed edges, nodes and sorted edge stars from the inserted
    /// edges. Call once, after all edges have been inserted.
    ///
    /// # Errors
    ///
    /// Returns an error if an inserted edge references a missing entity.
    pub fn build(&mut self) -> Result<(), TopologyError> {
        let edge_ids: Vec<EdgeId> = self.edges.keys().collect();
        for edge_id in edge_ids {
            let (first, second, last, second_last) = {
                let e = self.edge(edge_id)?;
                let n = e.points.len();
                (e.points[0], e.points[1], e.points[n - 1], e.points[n - 2])
            };
            let forward_node = self.node_at(&first);
            let reverse_node = self.node_at(&last);
            let forward_dir = second - first;
            let reverse_dir = second_last - last;

            let forward = self.directed_edges.insert(DirectedEdge {
                edge: edge_id,
                forward: true,
                sym: DirectedEdgeId::default(),
                node: forward_node,
                direction: forward_dir,
                quadrant: quadrant(&forward_dir),
                depth: [0, 0],
                visited: false,
                in_result: false,
                next: None,
                next_min: None,
                ring: None,
                min_ring: None,
            });
            let reverse = self.directed_edges.insert(DirectedEdge {
                edge: edge_id,
                forward: false,
                sym: forward,
                node: reverse_node,
                direction: reverse_dir,
                quadrant: quadrant(&reverse_dir),
                depth: [0, 0],
                visited: false,
                in_result: false,
                next: None,
                next_min: None,
                ring: None,
                min_ring: None,
            });
            self.directed_edge_mut(forward)?.sym = reverse;
            self.node_mut(forward_node)?.star.push(forward);
            self.node_mut(reverse_node)?.star.push(reverse);
        }

        let node_ids: Vec<NodeId> = self.nodes.keys().collect();
        for node_id in node_ids {
            let mut star = self.node(node_id)?.star.clone();
            star.sort_by(|&a, &b| self.compare_direction(a, b));
            self.node_mut(node_id)?.star = star;
        }
        Ok(())
    }

    // --- Entity accessors ---

    /// Returns a reference to an edge.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found.
    pub fn edge(&self, id: EdgeId) -> Result<&Edge, TopologyError> {
        self.edges
            .get(id)
            .ok_or(TopologyError::EntityNotFound("edge"))
    }

    /// Returns a mutable reference to an edge.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found.
    pub fn edge_mut(&mut self, id: EdgeId) -> Result<&mut Edge, TopologyError> {
        self.edges
            .get_mut(id)
            .ok_or(TopologyError::EntityNotFound("edge"))
    }

    /// Returns a reference to a directed edge.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found.
    pub fn directed_edge(&self, id: DirectedEdgeId) -> Result<&DirectedEdge, TopologyError> {
        self.directed_edges
            .get(id)
            .ok_or(TopologyError::EntityNotFound("directed edge"))
    }

    /// Returns a mutable reference to a directed edge.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found.
    pub fn directed_edge_mut(
        &mut self,
        id: DirectedEdgeId,
    ) -> Result<&mut DirectedEdge, TopologyError> {
        self.directed_edges
            .get_mut(id)
            .ok_or(TopologyError::EntityNotFound("directed edge"))
    }

    /// Returns a reference to a node.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found.
    pub fn node(&self, id: NodeId) -> Result<&Node, TopologyError> {
        self.nodes
            .get(id)
            .ok_or(TopologyError::EntityNotFound("node"))
    }

    /// Returns a mutable reference to a node.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found.
    pub fn node_mut(&mut self, id: NodeId) -> Result<&mut Node, TopologyError> {
        self.nodes
            .get_mut(id)
            .ok_or(TopologyError::EntityNotFound("node"))
    }

    /// IDs of all nodes in the graph.
    #[must_use]
    pub fn node_ids(&self) -> Vec<NodeId> {
        self.nodes.keys().collect()
    }

    /// Number of undirected edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    // --- Depth bookkeeping ---

    /// Reads the winding depth of a directed edge on one side.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found.
    pub fn depth(&self, id: DirectedEdgeId, position: Position) -> Result<i32, TopologyError> {
        Ok(self.directed_edge(id)?.depth[position.index()])
    }

    /// Sets the depth on one side of a directed edge and derives the depth of
    /// the opposite side through the edge's depth delta.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found.
    pub fn set_edge_depths(
        &mut self,
        id: DirectedEdgeId,
        position: Position,
        depth: i32,
    ) -> Result<(), TopologyError> {
        let (edge_id, forward) = {
            let de = self.directed_edge(id)?;
            (de.edge, de.forward)
        };
        let mut delta = self.edge(edge_id)?.depth_delta;
        if !forward {
            delta = -delta;
        }
        // Crossing from left to right changes the sign of the delta.
        let direction_factor = if position == Position::Left { -1 } else { 1 };
        let opposite_depth = depth + delta * direction_factor;

        let de = self.directed_edge_mut(id)?;
        de.depth[position.index()] = depth;
        de.depth[position.opposite().index()] = opposite_depth;
        Ok(())
    }

    /// Copies a directed edge's depths onto its sym, swapping sides.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found.
    pub fn copy_sym_depths(&mut self, id: DirectedEdgeId) -> Result<(), TopologyError> {
        let (sym, left, right) = {
            let de = self.directed_edge(id)?;
            (
                de.sym,
                de.depth[Position::Left.index()],
                de.depth[Position::Right.index()],
            )
        };
        let sym_de = self.directed_edge_mut(sym)?;
        sym_de.depth[Position::Left.index()] = right;
        sym_de.depth[Position::Right.index()] = left;
        Ok(())
    }

    /// Propagates depths around a node's star, starting from a directed edge
    /// whose depths are already assigned.
    ///
    /// Walking the star in counter-clockwise order, each edge's right-side
    /// depth equals the running depth, which then steps to that edge's
    /// left-side depth.
    ///
    /// # Errors
    ///
    /// Returns [`TopologyError::DepthMismatch`] if the depths do not close up
    /// consistently around the star.
    pub fn compute_node_depths(
        &mut self,
        node_id: NodeId,
        start: DirectedEdgeId,
    ) -> Result<(), TopologyError> {
        let star = self.node(node_id)?.star.clone();
        let index = star
            .iter()
            .position(|&d| d == start)
            .ok_or(TopologyError::EntityNotFound("directed edge in star"))?;
        let start_depth = self.depth(start, Position::Left)?;
        let target_last_depth = self.depth(start, Position::Right)?;

        let next_depth = self.compute_star_range_depths(&star[index + 1..], start_depth)?;
        let last_depth = self.compute_star_range_depths(&star[..index], next_depth)?;
        if last_depth == target_last_depth {
            Ok(())
        } else {
            let c = self.node(node_id)?.coordinate;
            Err(TopologyError::DepthMismatch { x: c.x, y: c.y })
        }
    }

    fn compute_star_range_depths(
        &mut self,
        edges: &[DirectedEdgeId],
        start_depth: i32,
    ) -> Result<i32, TopologyError> {
        let mut current = start_depth;
        for &de in edges {
            self.set_edge_depths(de, Position::Right, current)?;
            current = self.depth(de, Position::Left)?;
        }
        Ok(current)
    }

    // --- Result-boundary linking ---

    /// Outgoing directed edges at a node that lie on the result boundary in
    /// either direction, in star order.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found.
    pub fn result_area_edges(
        &self,
        node_id: NodeId,
    ) -> Result<Vec<DirectedEdgeId>, TopologyError> {
        let node = self.node(node_id)?;
        let mut out = Vec::new();
        for &de_id in &node.star {
            let de = self.directed_edge(de_id)?;
            if de.in_result || self.directed_edge(de.sym)?.in_result {
                out.push(de_id);
            }
        }
        Ok(out)
    }

    /// Links each incoming result edge at this node to the next outgoing
    /// result edge in counter-clockwise order.
    ///
    /// # Errors
    ///
    /// Returns [`TopologyError::NoOutgoingEdge`] if an incoming result edge
    /// has no outgoing partner.
    pub fn link_result_directed_edges(&mut self, node_id: NodeId) -> Result<(), TopologyError> {
        let area_edges = self.result_area_edges(node_id)?;
        let mut first_out = None;
        let mut incoming: Option<DirectedEdgeId> = None;
        let mut linking = false;

        for &next_out in &area_edges {
            let next_in = self.directed_edge(next_out)?.sym;
            if first_out.is_none() && self.directed_edge(next_out)?.in_result {
                first_out = Some(next_out);
            }
            if linking {
                if !self.directed_edge(next_out)?.in_result {
                    continue;
                }
                if let Some(inc) = incoming {
                    self.directed_edge_mut(inc)?.next = Some(next_out);
                }
                linking = false;
            } else {
                if !self.directed_edge(next_in)?.in_result {
                    continue;
                }
                incoming = Some(next_in);
                linking = true;
            }
        }
        if linking {
            let c = self.node(node_id)?.coordinate;
            let first = first_out.ok_or(TopologyError::NoOutgoingEdge { x: c.x, y: c.y })?;
            if let Some(inc) = incoming {
                self.directed_edge_mut(inc)?.next = Some(first);
            }
        }
        Ok(())
    }

    /// Links incoming to outgoing edges of one maximal ring at this node, in
    /// clockwise order, splitting the ring into minimal rings.
    ///
    /// # Errors
    ///
    /// Returns [`TopologyError::NoOutgoingEdge`] if an incoming ring edge has
    /// no outgoing partner in the same ring.
    pub fn link_minimal_directed_edges(
        &mut self,
        node_id: NodeId,
        ring: usize,
    ) -> Result<(), TopologyError> {
        let area_edges = self.result_area_edges(node_id)?;
        let mut first_out = None;
        let mut incoming: Option<DirectedEdgeId> = None;
        let mut linking = false;

        for &next_out in area_edges.iter().rev() {
            let next_in = self.directed_edge(next_out)?.sym;
            if first_out.is_none() && self.directed_edge(next_out)?.ring == Some(ring) {
                first_out = Some(next_out);
            }
            if linking {
                if self.directed_edge(next_out)?.ring != Some(ring) {
                    continue;
                }
                if let Some(inc) = incoming {
                    self.directed_edge_mut(inc)?.next_min = Some(next_out);
                }
                linking = false;
            } else {
                if self.directed_edge(next_in)?.ring != Some(ring) {
                    continue;
                }
                incoming = Some(next_in);
                linking = true;
            }
        }
        if linking {
            let c = self.node(node_id)?.coordinate;
            let first = first_out.ok_or(TopologyError::NoOutgoingEdge { x: c.x, y: c.y })?;
            if let Some(inc) = incoming {
                self.directed_edge_mut(inc)?.next_min = Some(first);
            }
        }
        Ok(())
    }

    /// Picks the edge of a node's star guaranteed to be rightmost, using the
    /// hemisphere of the first and last star entries.
    ///
    /// # Errors
    ///
    /// Returns an error for an empty star or when two horizontal edges make
    /// the choice indeterminate.
    pub fn rightmost_edge_of_star(
        &self,
        node_id: NodeId,
    ) -> Result<DirectedEdgeId, TopologyError> {
        let star = &self.node(node_id)?.star;
        let first = *star
            .first()
            .ok_or(TopologyError::EntityNotFound("directed edge in star"))?;
        if star.len() == 1 {
            return Ok(first);
        }
        let last = star[star.len() - 1];
        let first_quad = self.directed_edge(first)?.quadrant;
        let last_quad = self.directed_edge(last)?.quadrant;
        if is_northern(first_quad) && is_northern(last_quad) {
            Ok(first)
        } else if !is_northern(first_quad) && !is_northern(last_quad) {
            Ok(last)
        } else if self.directed_edge(first)?.direction.y != 0.0 {
            // Edges span both hemispheres; pick a non-horizontal one.
            Ok(first)
        } else if self.directed_edge(last)?.direction.y != 0.0 {
            Ok(last)
        } else {
            Err(TopologyError::RightmostInconsistency)
        }
    }

    // --- Internals ---

    fn node_at(&mut self, p: &Point2) -> NodeId {
        let key = coord_key(p);
        if let Some(&id) = self.node_index.get(&key) {
            id
        } else {
            let id = self.nodes.insert(Node::new(*p));
            self.node_index.insert(key, id);
            id
        }
    }

    fn compare_direction(&self, a: DirectedEdgeId, b: DirectedEdgeId) -> Ordering {
        let (Some(da), Some(db)) = (self.directed_edges.get(a), self.directed_edges.get(b)) else {
            return Ordering::Equal;
        };
        if da.quadrant != db.quadrant {
            return da.quadrant.cmp(&db.quadrant);
        }
        // Same quadrant: order counter-clockwise via the cross product.
        let cross = db.direction.x * da.direction.y - db.direction.y * da.direction.x;
        if cross > 0.0 {
            Ordering::Greater
        } else if cross < 0.0 {
            Ordering::Less
        } else {
            Ordering::Equal
        }
    }
}

fn ordinate_bits(value: f64) -> u64 {
    // Collapse -0.0 onto 0.0 so both map to the same node.
    if value == 0.0 {
        0.0_f64.to_bits()
    } else {
        value.to_bits()
    }
}

fn coord_key(p: &Point2) -> (u64, u64) {
    (ordinate_bits(p.x), ordinate_bits(p.y))
}

fn oriented_key(points: &[Point2]) -> Vec<(u64, u64)> {
    let forward: Vec<(u64, u64)> = points.iter().map(coord_key).collect();
    let mut reversed = forward.clone();
    reversed.reverse();
    if forward <= reversed {
        forward
    } else {
        reversed
    }
}
