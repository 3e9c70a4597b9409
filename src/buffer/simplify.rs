use crate::math::distance_2d::point_to_segment_dist;
use crate::math::orientation_2d::{orientation_index, Orientation};
use crate::math::Point2;

/// Number of points sampled along a candidate span when checking that the
/// whole span stays within tolerance of its chord.
const NUM_PTS_TO_CHECK: usize = 10;

/// Simplifies an input line prior to offset-curve generation.
///
/// Vertices are removed when they deviate from the adjacent chord by less
/// than the tolerance *and* turn away from the side being buffered, since
/// detail on the concave side is covered by the buffer fillets anyway.
/// A positive tolerance simplifies for buffering the left side of the line,
/// a negative tolerance for the right side.
///
/// The endpoints are always preserved, so closed rings stay closed.
#[must_use]
pub fn simplify(input: &[Point2], distance_tol: f64) -> Vec<Point2> {
    if input.len() < 3 {
        return input.to_vec();
    }
    let concave_orientation = if distance_tol < 0.0 {
        Orientation::Clockwise
    } else {
        Orientation::CounterClockwise
    };
    let tol = distance_tol.abs();

    let mut deleted = vec![false; input.len()];
    while delete_shallow_concavities(input, &mut deleted, tol, concave_orientation) {}

    input
        .iter()
        .zip(&deleted)
        .filter(|(_, &is_deleted)| !is_deleted)
        .map(|(p, _)| *p)
        .collect()
}

fn delete_shallow_concavities(
    input: &[Point2],
    deleted: &mut [bool],
    tol: f64,
    concave_orientation: Orientation,
) -> bool {
    let n = input.len();
    let mut index = 0;
    let mut mid = next_non_deleted(deleted, index, n);
    let mut last = next_non_deleted(deleted, mid, n);
    let mut changed = false;

    while last < n {
        let mut mid_deleted = false;
        if is_deletable(input, index, mid, last, tol, concave_orientation) {
            deleted[mid] = true;
            mid_deleted = true;
            changed = true;
        }
        index = if mid_deleted { last } else { mid };
        mid = next_non_deleted(deleted, index, n);
        last = next_non_deleted(deleted, mid, n);
    }
    changed
}

fn next_non_deleted(deleted: &[bool], from: usize, n: usize) -> usize {
    let mut i = from + 1;
    while i < n && deleted[i] {
        i += 1;
    }
    i
}

fn is_deletable(
    input: &[Point2],
    i0: usize,
    i1: usize,
    i2: usize,
    tol: f64,
    concave_orientation: Orientation,
) -> bool {
    let p0 = &input[i0];
    let p1 = &input[i1];
    let p2 = &input[i2];
    if orientation_index(p0, p1, p2) != concave_orientation {
        return false;
    }
    if point_to_segment_dist(p1, p0, p2) >= tol {
        return false;
    }
    is_shallow_sampled(input, i0, i2, tol)
}

fn is_shallow_sampled(input: &[Point2], i0: usize, i2: usize, tol: f64) -> bool {
    let mut inc = (i2 - i0) / NUM_PTS_TO_CHECK;
    if inc == 0 {
        inc = 1;
    }
    let mut i = i0;
    while i < i2 {
        if point_to_segment_dist(&input[i], &input[i0], &input[i2]) >= tol {
            return false;
        }
        i += inc;
    }
    true
}
