//! Cut segments at the crossing points that lie on them.

use log::{debug, trace};

use pc_core::{Coordinate, Segment};

/// `true` if `p` lies on `seg` within `tolerance_m`, measured as the detour
/// `d(start, p) + d(p, end) − d(start, end)`.
#[inline]
fn lies_on(seg: &Segment, p: Coordinate, tolerance_m: f64) -> bool {
    let total = seg.start.distance_m(seg.end);
    let via = seg.start.distance_m(p) + p.distance_m(seg.end);
    (via - total).abs() < tolerance_m
}

/// Split one segment at every point of `points` lying on it.
///
/// Cut points are ordered by distance from `seg.start`; ties keep the order
/// of `points`.  Points equal to an endpoint, and repeated points, produce no
/// cut.  The first sub-segment starts at `seg.start`, the last ends at
/// `seg.end`, and consecutive sub-segments share their joint exactly.  A
/// segment with no cut is returned unchanged.
pub fn split_segment(seg: &Segment, points: &[Coordinate], tolerance_m: f64) -> Vec<Segment> {
    let mut cuts: Vec<(f64, Coordinate)> = Vec::new();
    for &p in points {
        if p == seg.start || p == seg.end || cuts.iter().any(|&(_, c)| c == p) {
            continue;
        }
        if lies_on(seg, p, tolerance_m) {
            cuts.push((seg.start.distance_m(p), p));
        }
    }

    if cuts.is_empty() {
        return vec![*seg];
    }
    cuts.sort_by(|a, b| a.0.total_cmp(&b.0));
    trace!("segment {} → {} cut at {} point(s)", seg.start, seg.end, cuts.len());

    let mut out = Vec::with_capacity(cuts.len() + 1);
    let mut from = seg.start;
    for (_, c) in cuts {
        out.push(Segment::new(from, c));
        from = c;
    }
    out.push(Segment::new(from, seg.end));
    out
}

/// Split every segment of `segments` at the crossing points lying on it,
/// preserving segment order.
pub fn split_segments(segments: &[Segment], points: &[Coordinate], tolerance_m: f64) -> Vec<Segment> {
    let out: Vec<Segment> = segments
        .iter()
        .flat_map(|s| split_segment(s, points, tolerance_m))
        .collect();
    debug!("split {} segments into {}", segments.len(), out.len());
    out
}
