pub(crate) mod edge_ring;

use crate::buffer::subgraph::BufferSubgraph;
use crate::error::TopologyError;
use crate::geometry::{BoundingBox, Polygon};
use crate::graph::{BufferGraph, DirectedEdgeId};
use crate::math::orientation_2d::is_point_in_ring;
use crate::math::Point2;

use edge_ring::{EdgeRing, RingKind};

/// Walks labeled result directed edges into polygon rings and assembles
/// shells with their holes.
///
/// Subgraphs must be added in descending rightmost-coordinate order, so
/// shells exist before the free holes they will receive.
#[derive(Debug, Default)]
pub(crate) struct PolygonBuilder {
    shells: Vec<EdgeRing>,
    next_ring_index: usize,
    next_min_ring_index: usize,
}

impl PolygonBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one depth-labeled subgraph's result edges.
    ///
    /// # Errors
    ///
    /// Returns an error if the result edges do not link into consistent
    /// rings or a hole cannot be assigned to any shell.
    pub fn add(
        &mut self,
        graph: &mut BufferGraph,
        subgraph: &BufferSubgraph,
    ) -> Result<(), TopologyError> {
        for &node_id in subgraph.nodes() {
            graph.link_result_directed_edges(node_id)?;
        }
        let max_rings = self.build_maximal_rings(graph, subgraph.directed_edges())?;

        let mut free_holes: Vec<EdgeRing> = Vec::new();
        for (ring_index, ring) in max_rings {
            if ring.max_outgoing_degree(graph, ring_index)? > 1 {
                // The ring touches itself; split it into minimal rings.
                for &de_id in &ring.edges {
                    let node = graph.directed_edge(de_id)?.node;
                    graph.link_minimal_directed_edges(node, ring_index)?;
                }
                let min_rings = self.build_minimal_rings(graph, &ring)?;
                self.sort_shell_and_holes(min_rings, &mut free_holes)?;
            } else if ring.is_hole {
                free_holes.push(ring);
            } else {
                self.shells.push(ring);
            }
        }
        self.place_free_holes(free_holes)?;
        Ok(())
    }

    /// Assembles and returns the polygons built so far.
    ///
    /// # Errors
    ///
    /// Returns an error if a ring degenerated below a valid polygon ring.
    pub fn polygons(self) -> Result<Vec<Polygon>, TopologyError> {
        let mut out = Vec::with_capacity(self.shells.len());
        for shell in self.shells {
            let holes = shell.holes.into_iter().map(|h| h.points).collect();
            let polygon = Polygon::new(shell.points, holes)
                .map_err(|_| TopologyError::RingNotClosed)?;
            out.push(polygon);
        }
        Ok(out)
    }

    fn build_maximal_rings(
        &mut self,
        graph: &mut BufferGraph,
        dir_edges: &[DirectedEdgeId],
    ) -> Result<Vec<(usize, EdgeRing)>, TopologyError> {
        let mut rings = Vec::new();
        for &de_id in dir_edges {
            let de = graph.directed_edge(de_id)?;
            if de.in_result && de.ring.is_none() {
                let ring_index = self.next_ring_index;
                self.next_ring_index += 1;
                rings.push((
                    ring_index,
                    EdgeRing::build(graph, de_id, ring_index, RingKind::Maximal)?,
                ));
            }
        }
        Ok(rings)
    }

    fn build_minimal_rings(
        &mut self,
        graph: &mut BufferGraph,
        max_ring: &EdgeRing,
    ) -> Result<Vec<EdgeRing>, TopologyError> {
        let mut rings = Vec::new();
        for &de_id in &max_ring.edges {
            if graph.directed_edge(de_id)?.min_ring.is_none() {
                let ring_index = self.next_min_ring_index;
                self.next_min_ring_index += 1;
                rings.push(EdgeRing::build(graph, de_id, ring_index, RingKind::Minimal)?);
            }
        }
        Ok(rings)
    }

    /// Sorts the minimal rings of one split maximal ring into at most one
    /// shell plus its holes; with no shell all rings become free holes.
    fn sort_shell_and_holes(
        &mut self,
        min_rings: Vec<EdgeRing>,
        free_holes: &mut Vec<EdgeRing>,
    ) -> Result<(), TopologyError> {
        let mut shell: Option<EdgeRing> = None;
        let mut holes: Vec<EdgeRing> = Vec::new();
        for ring in min_rings {
            if ring.is_hole {
                holes.push(ring);
            } else if shell.is_some() {
                return Err(TopologyError::MultipleShells);
            } else {
                shell = Some(ring);
            }
        }
        if let Some(mut shell) = shell {
            shell.holes = holes;
            self.shells.push(shell);
        } else {
            free_holes.extend(holes);
        }
        Ok(())
    }

    /// Assigns each hole not produced alongside its shell to the smallest
    /// shell containing it.
    fn place_free_holes(&mut self, free_holes: Vec<EdgeRing>) -> Result<(), TopologyError> {
        for hole in free_holes {
            let shell_index = find_containing_shell(&self.shells, &hole)
                .ok_or(TopologyError::UnassignedHole)?;
            self.shells[shell_index].holes.push(hole);
        }
        Ok(())
    }
}

/// Finds the smallest shell whose ring contains the hole, if any.
fn find_containing_shell(shells: &[EdgeRing], hole: &EdgeRing) -> Option<usize> {
    let hole_env = BoundingBox::from_points(&hole.points);
    let mut best: Option<(usize, BoundingBox)> = None;

    for (i, shell) in shells.iter().enumerate() {
        let shell_env = BoundingBox::from_points(&shell.points);
        // Equal envelopes cannot be proper containment (and guard against a
        // ring being tested against itself).
        if shell_env == hole_env || !shell_env.contains_box(&hole_env) {
            continue;
        }
        let test_point = point_not_in_list(&hole.points, &shell.points);
        let contained = test_point.map_or(false, |tp| is_point_in_ring(&tp, &shell.points));
        if !contained {
            continue;
        }
        let smaller = match &best {
            None => true,
            Some((_, best_env)) => best_env.contains_box(&shell_env),
        };
        if smaller {
            best = Some((i, shell_env));
        }
    }
    best.map(|(i, _)| i)
}

/// First point of `candidates` that does not appear in `exclude`.
fn point_not_in_list(candidates: &[Point2], exclude: &[Point2]) -> Option<Point2> {
    candidates.iter().find(|p| !exclude.contains(p)).copied()
}
