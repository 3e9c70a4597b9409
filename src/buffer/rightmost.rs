use crate::error::TopologyError;
use crate::graph::{BufferGraph, DirectedEdgeId, Position};
use crate::math::orientation_2d::{orientation_index, Orientation};
use crate::math::Point2;

/// Finds the directed edge of a subgraph which is guaranteed to have the
/// exterior of the buffer on its right side: the unique safe seed for depth
/// propagation.
///
/// Scans every forward directed edge for the maximum-x vertex, then
/// disambiguates by segment orientation (interior vertex) or the node's
/// edge star (vertex at a node), and finally orients the edge so its right
/// side faces outward.
pub(crate) fn find_rightmost_edge(
    graph: &BufferGraph,
    dir_edges: &[DirectedEdgeId],
) -> Result<(DirectedEdgeId, Point2), TopologyError> {
    let mut min_de: Option<DirectedEdgeId> = None;
    let mut min_index = 0usize;
    let mut min_coord: Option<Point2> = None;

    // Checking only forward edges is still exhaustive, since every edge has
    // a forward directed edge.
    for &de_id in dir_edges {
        let de = graph.directed_edge(de_id)?;
        if !de.forward {
            continue;
        }
        let points = &graph.edge(de.edge)?.points;
        for (i, p) in points.iter().enumerate().take(points.len() - 1) {
            if min_coord.map_or(true, |mc| p.x > mc.x) {
                min_de = Some(de_id);
                min_index = i;
                min_coord = Some(*p);
            }
        }
    }
    let mut min_de = min_de.ok_or(TopologyError::RightmostInconsistency)?;
    let min_coord = min_coord.ok_or(TopologyError::RightmostInconsistency)?;

    if min_index == 0 {
        // The rightmost point starts the edge, so it is a node: let the
        // node's star pick the rightmost edge directly.
        let origin_node = graph.directed_edge(min_de)?.node;
        if graph.node(origin_node)?.coordinate != min_coord {
            return Err(TopologyError::RightmostInconsistency);
        }
        min_de = graph.rightmost_edge_of_star(origin_node)?;
        // Normalize back to the forward direction.
        if !graph.directed_edge(min_de)?.forward {
            min_de = graph.directed_edge(min_de)?.sym;
            let len = graph.edge(graph.directed_edge(min_de)?.edge)?.points.len();
            min_index = len - 1;
        }
    } else {
        min_index = adjust_interior_vertex_index(graph, min_de, min_index, &min_coord)?;
    }

    let side = rightmost_side(graph, min_de, min_index)?;
    let oriented = if side == Position::Left {
        graph.directed_edge(min_de)?.sym
    } else {
        min_de
    };
    Ok((oriented, min_coord))
}

/// The rightmost point is an interior vertex, with a segment on either side.
/// When both segments lie above or below it, their relative orientation
/// decides which one has open space on its right.
fn adjust_interior_vertex_index(
    graph: &BufferGraph,
    min_de: DirectedEdgeId,
    min_index: usize,
    min_coord: &Point2,
) -> Result<usize, TopologyError> {
    let de = graph.directed_edge(min_de)?;
    let points = &graph.edge(de.edge)?.points;
    if min_index == 0 || min_index + 1 >= points.len() {
        return Err(TopologyError::RightmostInconsistency);
    }
    let p_prev = points[min_index - 1];
    let p_next = points[min_index + 1];
    let orientation = orientation_index(min_coord, &p_next, &p_prev);

    let use_prev = (p_prev.y < min_coord.y
        && p_next.y < min_coord.y
        && orientation == Orientation::CounterClockwise)
        || (p_prev.y > min_coord.y
            && p_next.y > min_coord.y
            && orientation == Orientation::Clockwise);

    Ok(if use_prev { min_index - 1 } else { min_index })
}

fn rightmost_side(
    graph: &BufferGraph,
    de: DirectedEdgeId,
    index: usize,
) -> Result<Position, TopologyError> {
    if let Some(side) = rightmost_side_of_segment(graph, de, Some(index))? {
        return Ok(side);
    }
    let previous = index.checked_sub(1);
    if let Some(side) = rightmost_side_of_segment(graph, de, previous)? {
        return Ok(side);
    }
    // Both candidate segments are horizontal: the geometry is degenerate.
    Err(TopologyError::RightmostInconsistency)
}

fn rightmost_side_of_segment(
    graph: &BufferGraph,
    de: DirectedEdgeId,
    index: Option<usize>,
) -> Result<Option<Position>, TopologyError> {
    let Some(i) = index else {
        return Ok(None);
    };
    let de = graph.directed_edge(de)?;
    let points = &graph.edge(de.edge)?.points;
    if i + 1 >= points.len() {
        return Ok(None);
    }
    if points[i].y == points[i + 1].y {
        // segment is parallel to the x-axis
        return Ok(None);
    }
    Ok(Some(if points[i].y < points[i + 1].y {
        Position::Right
    } else {
        Position::Left
    }))
}
