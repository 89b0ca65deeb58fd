//! Unit tests for pc-topology.
//!
//! Geometry is kept near Lima (lon −77, lat −12) or on the equator where
//! metre offsets are easy to reason about.

#[cfg(test)]
mod helpers {
    use pc_core::{Coordinate, Segment};

    pub fn seg(a: (f64, f64), b: (f64, f64)) -> Segment {
        Segment::new(Coordinate::new(a.0, a.1), Coordinate::new(b.0, b.1))
    }

    /// Two diagonals of a 0.02° square centred on (−77.04, −12.04).
    pub fn x_pair() -> [Segment; 2] {
        [
            seg((-77.05, -12.05), (-77.03, -12.03)),
            seg((-77.05, -12.03), (-77.03, -12.05)),
        ]
    }

    /// Equator offset that is just over 2 m.
    pub const STEP_DEG: f64 = 0.000_018;

    /// Tiny deterministic LCG; good enough to scatter test points.
    pub fn scatter(n: usize, seed: u64) -> Vec<Coordinate> {
        let mut state = seed;
        let mut next = move || {
            state = state.wrapping_mul(6_364_136_223_846_793_005).wrapping_add(1);
            ((state >> 11) as f64) / ((1u64 << 53) as f64)
        };
        (0..n)
            .map(|_| Coordinate::new(-77.04 + next() * 0.0005, -12.04 + next() * 0.0005))
            .collect()
    }
}

// ── Intersection detection ────────────────────────────────────────────────────

#[cfg(test)]
mod intersect {
    use super::helpers::{seg, x_pair};
    use crate::{crossing_point, detect_intersections, orientation, properly_cross};
    use pc_core::{BuildConfig, Coordinate};

    const EPS: f64 = BuildConfig::DEFAULT_PARALLEL_EPSILON;

    #[test]
    fn orientation_sign() {
        let a = Coordinate::new(0.0, 0.0);
        let b = Coordinate::new(1.0, 0.0);
        assert!(orientation(a, b, Coordinate::new(0.5, 1.0)) > 0.0);
        assert!(orientation(a, b, Coordinate::new(0.5, -1.0)) < 0.0);
        assert_eq!(orientation(a, b, Coordinate::new(2.0, 0.0)), 0.0);
    }

    #[test]
    fn single_interior_crossing() {
        let [s, t] = x_pair();
        let report = detect_intersections(&[s, t], EPS);
        assert_eq!(report.segments, vec![s, t]);
        assert_eq!(report.points.len(), 1);

        let p = report.points[0];
        assert!((p.lon - -77.04).abs() < 1e-9, "got {p}");
        assert!((p.lat - -12.04).abs() < 1e-9, "got {p}");

        // The point lies on both segments within the splitter's tolerance.
        for s in [s, t] {
            let detour = s.start.distance_m(p) + p.distance_m(s.end) - s.length_m();
            assert!(detour.abs() < 2.0, "detour {detour}");
        }
    }

    #[test]
    fn shared_endpoint_is_not_a_crossing() {
        let s = seg((0.0, 0.0), (10.0, 0.0));
        let t = seg((0.0, 0.0), (5.0, 5.0));
        assert!(!properly_cross(&s, &t));
        assert!(detect_intersections(&[s, t], EPS).points.is_empty());
    }

    #[test]
    fn t_junction_is_not_a_crossing() {
        let s = seg((0.0, 0.0), (10.0, 0.0));
        let t = seg((5.0, 0.0), (5.0, 5.0));
        assert!(crossing_point(&s, &t, EPS).is_none());
    }

    #[test]
    fn collinear_overlap_is_not_a_crossing() {
        let s = seg((0.0, 0.0), (10.0, 0.0));
        let t = seg((5.0, 0.0), (15.0, 0.0));
        assert!(!properly_cross(&s, &t));
    }

    #[test]
    fn parallel_segments() {
        let s = seg((0.0, 0.0), (10.0, 0.0));
        let t = seg((0.0, 1.0), (10.0, 1.0));
        assert!(detect_intersections(&[s, t], EPS).points.is_empty());
    }

    #[test]
    fn disjoint_non_parallel() {
        // Lines would meet at (20, 0), outside both segments.
        let s = seg((0.0, 0.0), (10.0, 0.0));
        let t = seg((20.0, 1.0), (20.0, 5.0));
        assert!(crossing_point(&s, &t, EPS).is_none());
    }

    #[test]
    fn determinant_guard_suppresses_point() {
        let [s, t] = x_pair();
        // det here is 0.02 * 0.02 * 2 = 8e-4; an epsilon above that drops it.
        assert!(crossing_point(&s, &t, 1e-3).is_none());
        assert!(crossing_point(&s, &t, 1e-4).is_some());
    }

    #[test]
    fn coincident_crossings_are_reported_once() {
        let segments = [
            seg((-1.0, -1.0), (1.0, 1.0)),
            seg((-1.0, 1.0), (1.0, -1.0)),
            seg((-1.0, 0.0), (1.0, 0.0)),
        ];
        let report = detect_intersections(&segments, EPS);
        assert_eq!(report.points.len(), 1);
        assert_eq!(report.points[0], Coordinate::new(0.0, 0.0));
    }

    #[test]
    fn points_follow_pair_order() {
        // A long horizontal crossed by two verticals.
        let segments = [
            seg((0.0, 0.0), (10.0, 0.0)),
            seg((7.0, -1.0), (7.0, 1.0)),
            seg((3.0, -1.0), (3.0, 1.0)),
        ];
        let report = detect_intersections(&segments, EPS);
        assert_eq!(
            report.points,
            vec![Coordinate::new(7.0, 0.0), Coordinate::new(3.0, 0.0)]
        );
    }
}

// ── Segment splitting ─────────────────────────────────────────────────────────

#[cfg(test)]
mod split {
    use super::helpers::{seg, x_pair};
    use crate::{detect_intersections, split_segment, split_segments};
    use pc_core::{BuildConfig, Coordinate};

    const TOL: f64 = BuildConfig::DEFAULT_COLINEAR_TOLERANCE_M;

    #[test]
    fn crossing_pair_splits_into_four() {
        let pair = x_pair();
        let report = detect_intersections(&pair, BuildConfig::DEFAULT_PARALLEL_EPSILON);
        let out = split_segments(&pair, &report.points, TOL);
        assert_eq!(out.len(), 4);

        for (i, original) in pair.iter().enumerate() {
            let parts = &out[i * 2..i * 2 + 2];
            assert_eq!(parts[0].start, original.start);
            assert_eq!(parts[1].end, original.end);
            assert_eq!(parts[0].end, parts[1].start);
            assert_eq!(parts[0].end, report.points[0]);
        }
    }

    #[test]
    fn no_cut_passes_through() {
        let s = seg((0.0, 0.0), (0.01, 0.0));
        assert_eq!(split_segment(&s, &[], TOL), vec![s]);
        // 0.001° north of the midpoint is ~111 m off the segment.
        let off = Coordinate::new(0.005, 0.001);
        assert_eq!(split_segment(&s, &[off], TOL), vec![s]);
    }

    #[test]
    fn cuts_sorted_from_start() {
        let s = seg((0.0, 0.0), (0.01, 0.0));
        let near = Coordinate::new(0.003, 0.0);
        let far = Coordinate::new(0.007, 0.0);
        let parts = split_segment(&s, &[far, near], TOL);
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0].start, s.start);
        assert_eq!(parts[0].end, near);
        assert_eq!(parts[1].end, far);
        assert_eq!(parts[2].end, s.end);

        // Reversed segment cuts in the opposite order.
        let parts = split_segment(&s.reversed(), &[near, far], TOL);
        assert_eq!(parts[0].end, far);
        assert_eq!(parts[1].end, near);
    }

    #[test]
    fn endpoint_and_repeated_points_do_not_cut() {
        let s = seg((0.0, 0.0), (0.01, 0.0));
        let mid = Coordinate::new(0.005, 0.0);
        let parts = split_segment(&s, &[s.start, mid, mid, s.end], TOL);
        assert_eq!(parts.len(), 2);
    }

    #[test]
    fn point_within_tolerance_cuts() {
        // 0.00001° (~1.1 m) north of the line: the detour is far below 2 m.
        let s = seg((0.0, 0.0), (0.01, 0.0));
        let near_line = Coordinate::new(0.005, 0.000_01);
        assert_eq!(split_segment(&s, &[near_line], TOL).len(), 2);
    }
}

// ── Node snapping ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod snap {
    use super::helpers::{STEP_DEG, scatter};
    use crate::NodeSnapper;
    use pc_core::{Coordinate, NodeId, SnapMode, SnapOrder};

    fn chain() -> [Coordinate; 4] {
        [0.0, 1.0, 2.0, 3.0].map(|k| Coordinate::new(k * STEP_DEG, 0.0))
    }

    #[test]
    fn close_points_merge() {
        let a = Coordinate::new(-77.03, -12.05);
        let b = Coordinate::new(-77.030_01, -12.05); // ~1.1 m
        let s = NodeSnapper::new(3.0).snap([a, b]);
        assert_eq!(s.nodes.len(), 1);
        let id_a = NodeId::from_coordinate(a);
        assert_eq!(s.mapping.resolve(&id_a), Some(&id_a));
        assert_eq!(s.mapping.resolve(&NodeId::from_coordinate(b)), Some(&id_a));
    }

    #[test]
    fn distant_points_stay_apart() {
        let a = Coordinate::new(-77.03, -12.05);
        let b = Coordinate::new(-77.030_05, -12.05); // ~5.4 m
        let s = NodeSnapper::new(3.0).snap([a, b]);
        assert_eq!(s.nodes.len(), 2);
        assert_eq!(s.representatives, vec![a, b]);
    }

    #[test]
    fn duplicates_collapse_before_snapping() {
        let a = Coordinate::new(1.0, 1.0);
        let s = NodeSnapper::new(0.0).snap([a, a, a]);
        assert_eq!(s.nodes.len(), 1);
        assert_eq!(s.mapping.len(), 1);
    }

    #[test]
    fn greedy_compares_against_representatives_only() {
        let s = NodeSnapper::new(3.0).snap(chain());
        let [p0, p1, p2, p3] = chain().map(NodeId::from_coordinate);
        assert_eq!(s.nodes.len(), 2);
        assert_eq!(s.mapping.resolve(&p1), Some(&p0));
        assert_eq!(s.mapping.resolve(&p2), Some(&p2));
        assert_eq!(s.mapping.resolve(&p3), Some(&p2));
    }

    #[test]
    fn union_find_chains_transitively() {
        let s = NodeSnapper::new(3.0).mode(SnapMode::UnionFind).snap(chain());
        assert_eq!(s.nodes.len(), 1);
        let p0 = NodeId::from_coordinate(chain()[0]);
        for c in chain() {
            assert_eq!(s.mapping.resolve(&NodeId::from_coordinate(c)), Some(&p0));
        }
        // Extreme members are farther apart than the threshold.
        assert!(chain()[0].distance_m(chain()[3]) > 3.0);
    }

    #[test]
    fn order_is_a_parameter() {
        let mut reversed = chain();
        reversed.reverse();

        let first_seen = NodeSnapper::new(3.0).snap(reversed);
        let ids: Vec<_> = first_seen.nodes.keys().cloned().collect();
        assert_eq!(
            ids,
            vec![NodeId::from_coordinate(chain()[1]), NodeId::from_coordinate(chain()[3])]
        );

        // Lexicographic ordering ignores input permutation.
        let a = NodeSnapper::new(3.0).order(SnapOrder::Lexicographic).snap(reversed);
        let b = NodeSnapper::new(3.0).order(SnapOrder::Lexicographic).snap(chain());
        assert_eq!(a.nodes, b.nodes);
        assert!(a.nodes.contains_key(&NodeId::from_coordinate(chain()[0])));
    }

    #[test]
    fn representatives_pairwise_apart_and_mapping_total() {
        let pts = scatter(300, 7);
        for mode in [SnapMode::Greedy, SnapMode::UnionFind] {
            let s = NodeSnapper::new(3.0).mode(mode).snap(pts.iter().copied());
            let reps: Vec<Coordinate> = s.nodes.values().copied().collect();
            for (i, a) in reps.iter().enumerate() {
                for b in &reps[i + 1..] {
                    assert!(a.distance_m(*b) >= 3.0, "{mode:?}: {a} and {b} too close");
                }
            }
            assert_eq!(s.mapping.len(), pts.len());
            for p in &pts {
                let canon = s.mapping.resolve(&NodeId::from_coordinate(*p)).unwrap();
                assert!(s.nodes.contains_key(canon));
            }
        }
    }

    #[test]
    fn greedy_index_matches_linear_scan() {
        // Reference: the plain O(n·k) scan over representatives.
        let pts = scatter(400, 11);
        let mut reps: Vec<Coordinate> = Vec::new();
        for p in &pts {
            if !reps.iter().any(|r| r.distance_m(*p) < 3.0) {
                reps.push(*p);
            }
        }
        let s = NodeSnapper::new(3.0).snap(pts.iter().copied());
        assert_eq!(s.representatives, reps);
    }

    #[test]
    fn polar_fallback() {
        let a = Coordinate::new(0.0, 89.999_999_9);
        let b = Coordinate::new(10.0, 89.999_999_9);
        assert_eq!(NodeSnapper::new(3.0).snap([a, b]).nodes.len(), 1);
    }

    #[test]
    fn antimeridian_fallback() {
        let a = Coordinate::new(179.999_99, 0.0);
        let b = Coordinate::new(-179.999_99, 0.0); // ~2.2 m across the seam
        assert_eq!(NodeSnapper::new(3.0).snap([a, b]).nodes.len(), 1);
        assert_eq!(
            NodeSnapper::new(3.0).mode(SnapMode::UnionFind).snap([a, b]).nodes.len(),
            1
        );
    }
}
