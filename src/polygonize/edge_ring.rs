use crate::error::TopologyError;
use crate::graph::{BufferGraph, DirectedEdgeId};
use crate::math::orientation_2d::is_ccw;
use crate::math::Point2;

/// Which linking field a ring walk follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RingKind {
    /// Follows `next` links: the rings produced by result-edge linking.
    Maximal,
    /// Follows `next_min` links: minimal rings split out of a maximal ring.
    Minimal,
}

/// A closed ring of result directed edges.
///
/// Shells are clockwise, holes counter-clockwise; holes are attached to
/// their shell during polygon building.
#[derive(Debug)]
pub(crate) struct EdgeRing {
    pub edges: Vec<DirectedEdgeId>,
    pub points: Vec<Point2>,
    pub is_hole: bool,
    pub holes: Vec<EdgeRing>,
}

impl EdgeRing {
    /// Walks a ring from `start`, marking each traversed edge with
    /// `ring_index`.
    ///
    /// # Errors
    ///
    /// Returns an error if a link is missing, an edge repeats before the
    /// walk returns to its start, or the resulting ring is not closed.
    pub fn build(
        graph: &mut BufferGraph,
        start: DirectedEdgeId,
        ring_index: usize,
        kind: RingKind,
    ) -> Result<Self, TopologyError> {
        let mut edges = Vec::new();
        let mut points: Vec<Point2> = Vec::new();
        let mut de_id = start;
        let mut is_first = true;

        loop {
            let de = graph.directed_edge(de_id)?;
            let marker = match kind {
                RingKind::Maximal => de.ring,
                RingKind::Minimal => de.min_ring,
            };
            if marker == Some(ring_index) {
                let c = graph.node(de.node)?.coordinate;
                return Err(TopologyError::EdgeVisitedTwice { x: c.x, y: c.y });
            }
            edges.push(de_id);

            let (edge_id, forward, next) = {
                let de = graph.directed_edge(de_id)?;
                let next = match kind {
                    RingKind::Maximal => de.next,
                    RingKind::Minimal => de.next_min,
                };
                (de.edge, de.forward, next)
            };
            add_points(&mut points, &graph.edge(edge_id)?.points, forward, is_first);
            is_first = false;

            let marked = graph.directed_edge_mut(de_id)?;
            match kind {
                RingKind::Maximal => marked.ring = Some(ring_index),
                RingKind::Minimal => marked.min_ring = Some(ring_index),
            }

            let Some(next_id) = next else {
                return Err(TopologyError::RingNotClosed);
            };
            de_id = next_id;
            if de_id == start {
                break;
            }
        }

        if points.len() < 4 || points.first() != points.last() {
            return Err(TopologyError::RingNotClosed);
        }
        let is_hole = is_ccw(&points);
        Ok(Self {
            edges,
            points,
            is_hole,
            holes: Vec::new(),
        })
    }

    /// The largest number of this ring's outgoing edges at any single node.
    /// More than one means the ring touches itself and must be split into
    /// minimal rings.
    ///
    /// # Errors
    ///
    /// Returns an error if an entity lookup fails.
    pub fn max_outgoing_degree(
        &self,
        graph: &BufferGraph,
        ring_index: usize,
    ) -> Result<usize, TopologyError> {
        let mut max_degree = 0;
        for &de_id in &self.edges {
            let node = graph.directed_edge(de_id)?.node;
            let mut degree = 0;
            for &star_de in &graph.node(node)?.star {
                if graph.directed_edge(star_de)?.ring == Some(ring_index) {
                    degree += 1;
                }
            }
            max_degree = max_degree.max(degree);
        }
        Ok(max_degree)
    }
}

/// Appends one edge's points in traversal order. The connecting vertex is
/// skipped for every edge but the first.
fn add_points(out: &mut Vec<Point2>, edge_points: &[Point2], forward: bool, is_first: bool) {
    if forward {
        let start = usize::from(!is_first);
        out.extend_from_slice(&edge_points[start..]);
    } else {
        let mut start = edge_points.len() - 1;
        if !is_first {
            start -= 1;
        }
        for i in (0..=start).rev() {
            out.push(edge_points[i]);
        }
    }
}
