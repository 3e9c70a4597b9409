//! Polygonal buffer computation: the offset region of a geometry.
//!
//! The positive buffer of a geometry is the set of points within the buffer
//! distance of it (dilation); a negative distance erodes polygonal inputs.
//! The negative or zero buffer of points and lines is empty.
//!
//! The pipeline generates raw offset curves per input component, nodes them,
//! resolves winding depths on the resulting planar graph and extracts the
//! boundary polygons. On a topology failure the whole computation retries on
//! successively coarser precision grids.

pub mod params;

pub(crate) mod curve_builder;
pub(crate) mod curve_set;
pub(crate) mod depth_locater;
pub(crate) mod rightmost;
pub(crate) mod segment_generator;
pub(crate) mod segment_string;
pub(crate) mod simplify;
pub(crate) mod subgraph;

pub use params::{BufferParameters, EndCapStyle, JoinStyle};

use crate::error::{BufferError, Result, TopologyError};
use crate::geometry::{Geometry, Polygon, PrecisionModel};
use crate::graph::BufferGraph;
use crate::noding::{IntersectionNoder, Noder, ScaledNoder};
use crate::polygonize::PolygonBuilder;

use curve_builder::OffsetCurveBuilder;
use curve_set::OffsetCurveSetBuilder;
use depth_locater::subgraph_depth;
use subgraph::BufferSubgraph;

/// Maximum number of significant digits used by the reduced-precision
/// retry, leaving headroom below the precision of an f64.
const MAX_PRECISION_DIGITS: i32 = 12;

/// Buffers a geometry with default parameters.
///
/// Returns the polygons of the buffer region; an empty vector is the empty
/// polygon.
///
/// # Errors
///
/// Returns an error if the input is too numerically degenerate to buffer at
/// any precision.
pub fn buffer(geometry: &Geometry, distance: f64) -> Result<Vec<Polygon>> {
    buffer_with_parameters(geometry, distance, &BufferParameters::new())
}

/// Buffers a geometry with a given fillet resolution.
///
/// # Errors
///
/// Returns an error if the input is too numerically degenerate to buffer at
/// any precision.
pub fn buffer_with_quadrant_segments(
    geometry: &Geometry,
    distance: f64,
    quadrant_segments: u32,
) -> Result<Vec<Polygon>> {
    buffer_with_parameters(
        geometry,
        distance,
        &BufferParameters::with_quadrant_segments(quadrant_segments),
    )
}

/// Buffers a geometry with a given fillet resolution and end cap style.
///
/// # Errors
///
/// Returns an error if the input is too numerically degenerate to buffer at
/// any precision.
pub fn buffer_with_cap_style(
    geometry: &Geometry,
    distance: f64,
    quadrant_segments: u32,
    end_cap_style: EndCapStyle,
) -> Result<Vec<Polygon>> {
    buffer_with_parameters(
        geometry,
        distance,
        &BufferParameters::with_cap_style(quadrant_segments, end_cap_style),
    )
}

/// Buffers a geometry with full parameter control.
///
/// # Errors
///
/// Returns an error if the input is too numerically degenerate to buffer at
/// any precision.
pub fn buffer_with_parameters(
    geometry: &Geometry,
    distance: f64,
    params: &BufferParameters,
) -> Result<Vec<Polygon>> {
    match buffer_attempt(geometry, distance, params, PrecisionModel::Floating) {
        Ok(polygons) => Ok(polygons),
        Err(BufferError::Topology(first_error)) => {
            buffer_reduced_precision(geometry, distance, params, first_error)
        }
        Err(other) => Err(other),
    }
}

/// Retries the buffer on fixed precision grids of decreasing resolution.
fn buffer_reduced_precision(
    geometry: &Geometry,
    distance: f64,
    params: &BufferParameters,
    first_error: TopologyError,
) -> Result<Vec<Polygon>> {
    let mut last_error = first_error;
    for digits in (0..=MAX_PRECISION_DIGITS).rev() {
        let scale = precision_scale_factor(geometry, distance, digits);
        match buffer_attempt(geometry, distance, params, PrecisionModel::fixed(scale)) {
            Ok(polygons) => return Ok(polygons),
            Err(BufferError::Topology(e)) => last_error = e,
            Err(other) => return Err(other),
        }
    }
    Err(last_error.into())
}

/// One full pass of the buffer pipeline at a fixed precision model.
fn buffer_attempt(
    geometry: &Geometry,
    distance: f64,
    params: &BufferParameters,
    precision: PrecisionModel,
) -> Result<Vec<Polygon>> {
    let curve_builder = OffsetCurveBuilder::new(precision, *params);
    let curves = OffsetCurveSetBuilder::new(distance, curve_builder).curves(geometry)?;
    if curves.is_empty() {
        return Ok(Vec::new());
    }

    let noded = if precision.is_floating() {
        IntersectionNoder::new().compute_nodes(&curves)?
    } else {
        ScaledNoder::new(IntersectionNoder::new(), precision).compute_nodes(&curves)?
    };

    let mut graph = BufferGraph::new();
    for string in &noded {
        // Zero-length results carry no information and cause problems with
        // topology building.
        if string.points.len() == 2 && string.points[0] == string.points[1] {
            continue;
        }
        graph.insert_edge(string.points.clone(), string.label);
    }
    if graph.edge_count() == 0 {
        return Ok(Vec::new());
    }
    graph.build()?;

    let mut subgraphs = Vec::new();
    for node_id in graph.node_ids() {
        if !graph.node(node_id)?.visited {
            subgraphs.push(BufferSubgraph::create(&mut graph, node_id)?);
        }
    }
    // Process subgraphs rightmost-first, so shells are depth-labeled and
    // built before any holes they contain.
    subgraphs.sort_by(|a, b| {
        b.rightmost_coordinate()
            .x
            .total_cmp(&a.rightmost_coordinate().x)
    });

    let mut builder = PolygonBuilder::new();
    let mut processed: Vec<BufferSubgraph> = Vec::new();
    for subgraph in subgraphs {
        let outside_depth = subgraph_depth(&graph, &processed, subgraph.rightmost_coordinate())?;
        subgraph.compute_depth(&mut graph, outside_depth)?;
        subgraph.find_result_edges(&mut graph)?;
        builder.add(&mut graph, &subgraph)?;
        processed.push(subgraph);
    }
    Ok(builder.polygons()?)
}

/// Computes a precision scale factor giving the buffered geometry the
/// requested number of significant digits.
fn precision_scale_factor(geometry: &Geometry, distance: f64, max_precision_digits: i32) -> f64 {
    let env = geometry.bounding_box();
    let env_max = env.max_absolute_ordinate();
    let expand_by = distance.max(0.0);
    let buffered_env_max = env_max + 2.0 * expand_by;
    if buffered_env_max <= 0.0 {
        return 1.0;
    }
    // Digits left of the decimal point in the buffered envelope magnitude.
    #[allow(clippy::cast_possible_truncation)]
    let env_precision_digits = (buffered_env_max.log10() + 1.0) as i32;
    let min_unit_log10 = max_precision_digits - env_precision_digits;
    10_f64.powi(min_unit_log10)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::{BoundingBox, LineString};
    use crate::math::orientation_2d::{is_point_in_ring, signed_area_2d};
    use crate::math::Point2;

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    fn line(points: Vec<Point2>) -> Geometry {
        Geometry::LineString(LineString::new(points).unwrap())
    }

    fn square(origin: f64, side: f64) -> Geometry {
        Geometry::Polygon(
            Polygon::new(
                vec![
                    p(origin, origin),
                    p(origin + side, origin),
                    p(origin + side, origin + side),
                    p(origin, origin + side),
                    p(origin, origin),
                ],
                vec![],
            )
            .unwrap(),
        )
    }

    fn result_area(polygons: &[Polygon]) -> f64 {
        polygons
            .iter()
            .map(|poly| {
                signed_area_2d(poly.shell()).abs()
                    - poly
                        .holes()
                        .iter()
                        .map(|h| signed_area_2d(h).abs())
                        .sum::<f64>()
            })
            .sum()
    }

    #[test]
    fn scenario_point_round_cap() {
        let result = buffer_with_quadrant_segments(&Geometry::Point(p(0.0, 0.0)), 5.0, 8).unwrap();
        assert_eq!(result.len(), 1);
        let shell = result[0].shell();
        assert!(result[0].holes().is_empty());
        assert_eq!(shell.first(), shell.last());
        // 8 quadrant segments give 32 distinct vertices on the circle.
        assert_eq!(shell.len(), 33);
        for q in shell {
            assert!(((q - p(0.0, 0.0)).norm() - 5.0).abs() < 1e-9);
        }
    }

    #[test]
    fn scenario_flat_cap_segment_is_exact_rectangle() {
        let g = line(vec![p(0.0, 0.0), p(10.0, 0.0)]);
        let result = buffer_with_cap_style(&g, 2.0, 8, EndCapStyle::Flat).unwrap();
        assert_eq!(result.len(), 1);
        let bbox = BoundingBox::from_points(result[0].shell());
        assert!((bbox.min_x() - 0.0).abs() < 1e-12);
        assert!((bbox.max_x() - 10.0).abs() < 1e-12);
        assert!((bbox.min_y() + 2.0).abs() < 1e-12);
        assert!((bbox.max_y() - 2.0).abs() < 1e-12);
        assert!((result_area(&result) - 40.0).abs() < 1e-9);
    }

    #[test]
    fn scenario_square_erosion() {
        let result = buffer(&square(0.0, 10.0), -2.0).unwrap();
        assert_eq!(result.len(), 1);
        let bbox = BoundingBox::from_points(result[0].shell());
        assert!((bbox.min_x() - 2.0).abs() < 1e-9);
        assert!((bbox.max_x() - 8.0).abs() < 1e-9);
        assert!((bbox.min_y() - 2.0).abs() < 1e-9);
        assert!((bbox.max_y() - 8.0).abs() < 1e-9);
        assert!((result_area(&result) - 36.0).abs() < 1e-9);

        assert!(buffer(&square(0.0, 10.0), -6.0).unwrap().is_empty());
        assert!(buffer(&square(0.0, 10.0), -10.0).unwrap().is_empty());
    }

    #[test]
    fn negative_or_zero_distance_line_and_point_are_empty() {
        let g = line(vec![p(0.0, 0.0), p(10.0, 0.0)]);
        assert!(buffer(&g, -1.0).unwrap().is_empty());
        assert!(buffer(&g, 0.0).unwrap().is_empty());
        assert!(buffer(&Geometry::Point(p(3.0, 4.0)), -0.5).unwrap().is_empty());
        assert!(buffer(&Geometry::Point(p(3.0, 4.0)), 0.0).unwrap().is_empty());
    }

    #[test]
    fn dilation_is_monotonic_in_distance() {
        let g = line(vec![p(0.0, 0.0), p(6.0, 2.0), p(10.0, 0.0)]);
        let small = buffer(&g, 1.0).unwrap();
        let large = buffer(&g, 2.0).unwrap();
        assert_eq!(small.len(), 1);
        assert_eq!(large.len(), 1);
        // Every vertex of the smaller buffer lies inside the larger one.
        for q in small[0].shell() {
            assert!(
                is_point_in_ring(q, large[0].shell()),
                "vertex {q:?} escaped the larger buffer"
            );
        }
    }

    #[test]
    fn erosion_is_monotonic_in_distance() {
        let small = buffer(&square(0.0, 20.0), -4.0).unwrap();
        let large = buffer(&square(0.0, 20.0), -1.0).unwrap();
        for q in small[0].shell() {
            let inside_or_on = is_point_in_ring(q, large[0].shell())
                || large[0].shell().contains(q);
            assert!(inside_or_on);
        }
    }

    #[test]
    fn square_dilation_round_join_area() {
        let result = buffer(&square(0.0, 10.0), 1.0).unwrap();
        assert_eq!(result.len(), 1);
        // Area = square + four side strips + four quarter-circle corners.
        let expected = 100.0 + 4.0 * 10.0 + std::f64::consts::PI;
        // Corner arcs are inscribed polygons, slightly under the true area.
        let area = result_area(&result);
        assert!(area < expected + 1e-9);
        assert!(area > expected - 0.05);
    }

    #[test]
    fn square_dilation_mitre_join_is_exact_square() {
        let mut params = BufferParameters::new();
        params.set_join_style(JoinStyle::Mitre);
        let result = buffer_with_parameters(&square(0.0, 10.0), 1.0, &params).unwrap();
        assert_eq!(result.len(), 1);
        let bbox = BoundingBox::from_points(result[0].shell());
        assert!((bbox.min_x() + 1.0).abs() < 1e-9);
        assert!((bbox.max_x() - 11.0).abs() < 1e-9);
        assert!((result_area(&result) - 144.0).abs() < 1e-6);
    }

    #[test]
    fn polygon_with_hole_keeps_shrunken_hole() {
        let donut = Geometry::Polygon(
            Polygon::new(
                vec![
                    p(0.0, 0.0),
                    p(20.0, 0.0),
                    p(20.0, 20.0),
                    p(0.0, 20.0),
                    p(0.0, 0.0),
                ],
                vec![vec![
                    p(6.0, 6.0),
                    p(6.0, 14.0),
                    p(14.0, 14.0),
                    p(14.0, 6.0),
                    p(6.0, 6.0),
                ]],
            )
            .unwrap(),
        );
        let result = buffer(&donut, 1.0).unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].holes().len(), 1);
        let hole_bbox = BoundingBox::from_points(&result[0].holes()[0]);
        // The hole shrinks by the buffer distance on each side.
        assert!((hole_bbox.min_x() - 7.0).abs() < 1e-9);
        assert!((hole_bbox.max_x() - 13.0).abs() < 1e-9);
        assert!((hole_bbox.min_y() - 7.0).abs() < 1e-9);
        assert!((hole_bbox.max_y() - 13.0).abs() < 1e-9);
    }

    #[test]
    fn hole_swallowed_by_large_dilation() {
        let donut = Geometry::Polygon(
            Polygon::new(
                vec![
                    p(0.0, 0.0),
                    p(20.0, 0.0),
                    p(20.0, 20.0),
                    p(0.0, 20.0),
                    p(0.0, 0.0),
                ],
                vec![vec![
                    p(9.0, 9.0),
                    p(9.0, 11.0),
                    p(11.0, 11.0),
                    p(11.0, 9.0),
                    p(9.0, 9.0),
                ]],
            )
            .unwrap(),
        );
        let result = buffer(&donut, 3.0).unwrap();
        assert_eq!(result.len(), 1);
        assert!(result[0].holes().is_empty());
    }

    #[test]
    fn disjoint_points_give_two_polygons() {
        let g = Geometry::Collection(vec![
            Geometry::Point(p(0.0, 0.0)),
            Geometry::Point(p(100.0, 0.0)),
        ]);
        let result = buffer(&g, 2.0).unwrap();
        assert_eq!(result.len(), 2);
    }

    #[test]
    fn overlapping_points_merge_into_one_polygon() {
        let g = Geometry::Collection(vec![
            Geometry::Point(p(0.0, 0.0)),
            Geometry::Point(p(3.0, 0.0)),
        ]);
        let result = buffer(&g, 2.0).unwrap();
        assert_eq!(result.len(), 1);
        // The union covers both centres.
        assert!(is_point_in_ring(&p(0.0, 0.0), result[0].shell()));
        assert!(is_point_in_ring(&p(3.0, 0.0), result[0].shell()));
        assert!(is_point_in_ring(&p(1.5, 0.0), result[0].shell()));
    }

    #[test]
    fn bent_line_buffer_is_closed_and_positive() {
        let g = line(vec![p(0.0, 0.0), p(5.0, 5.0), p(10.0, 0.0), p(15.0, 5.0)]);
        let result = buffer(&g, 1.0).unwrap();
        assert_eq!(result.len(), 1);
        let shell = result[0].shell();
        assert_eq!(shell.first(), shell.last());
        assert!(result_area(&result) > 0.0);
        // Rough lower bound: a strip of width 2 along the line's length.
        let strip = 2.0 * (3.0 * 50.0_f64.sqrt());
        assert!(result_area(&result) > strip * 0.9);
    }

    #[test]
    fn sharp_spike_line_buffers_cleanly() {
        // A spike that folds back on itself: the raw curve self-intersects
        // heavily and must be resolved by noding and depth labeling.
        let g = line(vec![p(0.0, 0.0), p(10.0, 0.0), p(0.0, 0.5)]);
        let result = buffer(&g, 1.5).unwrap();
        assert_eq!(result.len(), 1);
        assert!(result_area(&result) > 0.0);
        assert!(is_point_in_ring(&p(5.0, 0.25), result[0].shell()));
    }

    #[test]
    fn single_sided_line_buffer() {
        let mut params = BufferParameters::new();
        params.set_single_sided(true);
        let g = line(vec![p(0.0, 0.0), p(10.0, 0.0)]);

        let left = buffer_with_parameters(&g, 2.0, &params).unwrap();
        assert_eq!(left.len(), 1);
        let bbox = BoundingBox::from_points(left[0].shell());
        assert!((bbox.max_y() - 2.0).abs() < 1e-9);
        assert!(bbox.min_y() > -1e-9);

        let right = buffer_with_parameters(&g, -2.0, &params).unwrap();
        assert_eq!(right.len(), 1);
        let bbox = BoundingBox::from_points(right[0].shell());
        assert!((bbox.min_y() + 2.0).abs() < 1e-9);
        assert!(bbox.max_y() < 1e-9);
    }

    #[test]
    fn square_cap_point_buffer() {
        let result =
            buffer_with_cap_style(&Geometry::Point(p(1.0, 1.0)), 2.0, 8, EndCapStyle::Square)
                .unwrap();
        assert_eq!(result.len(), 1);
        assert!((result_area(&result) - 16.0).abs() < 1e-9);
    }

    #[test]
    fn result_shells_are_clockwise_holes_counter_clockwise() {
        let donut = Geometry::Polygon(
            Polygon::new(
                vec![
                    p(0.0, 0.0),
                    p(20.0, 0.0),
                    p(20.0, 20.0),
                    p(0.0, 20.0),
                    p(0.0, 0.0),
                ],
                vec![vec![
                    p(6.0, 6.0),
                    p(6.0, 14.0),
                    p(14.0, 14.0),
                    p(14.0, 6.0),
                    p(6.0, 6.0),
                ]],
            )
            .unwrap(),
        );
        let result = buffer(&donut, 1.0).unwrap();
        assert!(signed_area_2d(result[0].shell()) < 0.0);
        for hole in result[0].holes() {
            assert!(signed_area_2d(hole) > 0.0);
        }
    }

    #[test]
    fn fixed_precision_scale_factor_tracks_magnitude() {
        let g = Geometry::Point(p(1000.0, 0.0));
        // Envelope magnitude ~1000 (4 digits) leaves 8 fractional digits
        // out of 12 significant digits.
        let scale = precision_scale_factor(&g, 1.0, 12);
        assert!((scale - 1e8).abs() < 1e-3);
        let scale0 = precision_scale_factor(&g, 1.0, 0);
        assert!(scale0 <= 1e-3);
    }

    #[test]
    fn collection_with_line_and_polygon() {
        let g = Geometry::Collection(vec![
            square(0.0, 5.0),
            line(vec![p(20.0, 0.0), p(30.0, 0.0)]),
        ]);
        let result = buffer(&g, 1.0).unwrap();
        assert_eq!(result.len(), 2);
    }
}
