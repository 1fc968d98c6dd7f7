//! Douglas-Peucker ring reduction.
//!
//! Hand-drawn AOIs routinely arrive with thousands of near-collinear
//! vertices (circle approximations, shaky tracing). Each ring is reduced
//! independently: interior points closer than the tolerance to the chord
//! between two anchors are dropped, recursively.
//!
//! Distances are squared Euclidean in raw (lng, lat) degree space with no
//! projection correction; at the default tolerance the error stays in the
//! tens-of-meters range even at high latitudes.

use super::{MIN_RING_POINTS, Position, Ring};

/// Default simplification tolerance in degrees (~11 m at the equator).
pub const DEFAULT_TOLERANCE_DEG: f64 = 1e-4;

/// Reduce one ring, keeping its first and last points as fixed anchors.
///
/// Rings with `MIN_RING_POINTS` or fewer points pass through untouched,
/// and a ring that would shrink below that floor is returned unsimplified.
pub(crate) fn simplify_ring(ring: &Ring, tolerance_deg: f64) -> Ring {
    if ring.len() <= MIN_RING_POINTS {
        return ring.clone();
    }

    let mut keep = vec![false; ring.len()];
    keep[0] = true;
    keep[ring.len() - 1] = true;
    douglas_peucker(ring, 0, ring.len() - 1, tolerance_deg * tolerance_deg, &mut keep);

    let reduced: Ring = ring
        .iter()
        .zip(&keep)
        .filter_map(|(&point, &kept)| kept.then_some(point))
        .collect();

    if reduced.len() < MIN_RING_POINTS {
        return ring.clone();
    }
    reduced
}

/// Mark the interior point farthest from the chord `first..last` and
/// recurse on both halves, if that distance exceeds the tolerance.
///
/// The split index is an `Option` so that "no point exceeded the
/// tolerance" can never be confused with a split at index 0.
fn douglas_peucker(points: &[Position], first: usize, last: usize, sq_tolerance: f64, keep: &mut [bool]) {
    if last <= first + 1 {
        return;
    }

    let mut split = None;
    let mut max_sq_dist = sq_tolerance;
    for i in first + 1..last {
        let sq_dist = sq_segment_distance(points[i], points[first], points[last]);
        if sq_dist > max_sq_dist {
            split = Some(i);
            max_sq_dist = sq_dist;
        }
    }

    if let Some(mid) = split {
        keep[mid] = true;
        douglas_peucker(points, first, mid, sq_tolerance, keep);
        douglas_peucker(points, mid, last, sq_tolerance, keep);
    }
}

/// Squared distance from `p` to the segment `a..b`, in degree space.
///
/// Degenerate segments (a == b, e.g. the chord of a fully closed ring)
/// collapse to the squared distance to `a`.
fn sq_segment_distance(p: Position, a: Position, b: Position) -> f64 {
    let (px, py) = p;
    let (mut x, mut y) = a;
    let dx = b.0 - x;
    let dy = b.1 - y;

    if dx != 0.0 || dy != 0.0 {
        let t = ((px - x) * dx + (py - y) * dy) / (dx * dx + dy * dy);
        if t > 1.0 {
            x = b.0;
            y = b.1;
        } else if t > 0.0 {
            x += dx * t;
            y += dy * t;
        }
    }

    let ex = px - x;
    let ey = py - y;
    ex * ex + ey * ey
}
