//! Proper-crossing detection between lane segments.
//!
//! Coordinates are treated as planar `(x = lon, y = lat)` points.  Over the
//! extent of a single city this is the same approximation the colinearity
//! check in [`crate::split`] tolerates.
//!
//! # Crossing rule
//!
//! `(A, B)` properly crosses `(C, D)` iff C and D lie strictly on opposite
//! sides of line AB **and** A and B lie strictly on opposite sides of line CD.
//! An orientation of exactly zero counts as "same side", so segments that only
//! touch at a shared endpoint, T-junctions where an endpoint lands on the
//! other segment, and collinear overlaps never report a crossing.
//!
//! Complexity is O(n²) in segment count.

use log::{debug, info};
use rustc_hash::FxHashSet;

use pc_core::{Coordinate, Segment};

/// Output of [`detect_intersections`].
#[derive(Clone, Debug, Default)]
pub struct IntersectionReport {
    /// The segments that were scanned, in input order.
    pub segments: Vec<Segment>,
    /// Distinct crossing points, in order of first discovery over the pair
    /// scan `(0,1), (0,2), …, (1,2), …`.
    pub points: Vec<Coordinate>,
}

/// Signed area of the triangle `a, b, c` (twice over).
///
/// Positive when `c` is counter-clockwise of the directed line `a → b`,
/// negative when clockwise, zero when collinear.
#[inline]
pub fn orientation(a: Coordinate, b: Coordinate, c: Coordinate) -> f64 {
    (c.lat - a.lat) * (b.lon - a.lon) - (b.lat - a.lat) * (c.lon - a.lon)
}

#[inline]
fn strictly_opposite(o1: f64, o2: f64) -> bool {
    (o1 > 0.0 && o2 < 0.0) || (o1 < 0.0 && o2 > 0.0)
}

/// `true` if `s` and `t` cross at a point interior to both.
pub fn properly_cross(s: &Segment, t: &Segment) -> bool {
    strictly_opposite(orientation(s.start, s.end, t.start), orientation(s.start, s.end, t.end))
        && strictly_opposite(orientation(t.start, t.end, s.start), orientation(t.start, t.end, s.end))
}

/// Intersection of the infinite lines through `s` and `t`.
///
/// Returns `None` when the determinant magnitude is below
/// `parallel_epsilon`.
pub fn line_intersection(s: &Segment, t: &Segment, parallel_epsilon: f64) -> Option<Coordinate> {
    let [x1, y1] = s.start.xy();
    let [x2, y2] = s.end.xy();
    let [x3, y3] = t.start.xy();
    let [x4, y4] = t.end.xy();

    let den = (x1 - x2) * (y3 - y4) - (y1 - y2) * (x3 - x4);
    if den.abs() < parallel_epsilon {
        return None;
    }

    let a = x1 * y2 - y1 * x2;
    let b = x3 * y4 - y3 * x4;
    let px = (a * (x3 - x4) - (x1 - x2) * b) / den;
    let py = (a * (y3 - y4) - (y1 - y2) * b) / den;
    Some(Coordinate::new(px, py))
}

/// The crossing point of `s` and `t`, if they properly cross and are not
/// numerically parallel.
pub fn crossing_point(s: &Segment, t: &Segment, parallel_epsilon: f64) -> Option<Coordinate> {
    if properly_cross(s, t) {
        line_intersection(s, t, parallel_epsilon)
    } else {
        None
    }
}

/// Find every proper crossing among all unordered pairs of `segments`.
pub fn detect_intersections(segments: &[Segment], parallel_epsilon: f64) -> IntersectionReport {
    let raw = scan_pairs(segments, parallel_epsilon);
    let found = raw.len();

    let mut seen: FxHashSet<[u64; 2]> = FxHashSet::default();
    let mut points: Vec<Coordinate> = Vec::with_capacity(found);
    for p in raw {
        if seen.insert([(p.lon + 0.0).to_bits(), (p.lat + 0.0).to_bits()]) {
            points.push(p);
        }
    }

    info!(
        "intersection scan: {} segments, {} crossings, {} distinct points",
        segments.len(),
        found,
        points.len()
    );
    if found != points.len() {
        debug!("{} crossings coincided with an earlier point", found - points.len());
    }

    IntersectionReport { segments: segments.to_vec(), points }
}

#[cfg(not(feature = "parallel"))]
fn scan_pairs(segments: &[Segment], parallel_epsilon: f64) -> Vec<Coordinate> {
    let mut out = Vec::new();
    for (i, s) in segments.iter().enumerate() {
        for t in &segments[i + 1..] {
            if let Some(p) = crossing_point(s, t, parallel_epsilon) {
                out.push(p);
            }
        }
    }
    out
}

#[cfg(feature = "parallel")]
fn scan_pairs(segments: &[Segment], parallel_epsilon: f64) -> Vec<Coordinate> {
    use rayon::prelude::*;

    // Rayon's `collect` into a `Vec` keeps the sequential order.
    segments
        .par_iter()
        .enumerate()
        .flat_map_iter(|(i, s)| {
            segments[i + 1..]
                .iter()
                .filter_map(move |t| crossing_point(s, t, parallel_epsilon))
        })
        .collect()
}
