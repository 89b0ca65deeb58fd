//! Merge near-duplicate coordinates into canonical nodes.
//!
//! # Modes
//!
//! - [`SnapMode::Greedy`]: one pass in snap order.  Each coordinate is
//!   compared against the representatives created so far (not against every
//!   earlier input) and joins the *earliest* one closer than the threshold;
//!   otherwise it becomes a new representative.  Order-dependent: a chain of
//!   points each within the threshold of the previous one can all fall into
//!   one node whose extreme members are farther apart than the threshold, and
//!   a later point may land in a different node than its nearest neighbour.
//!   This is an approximation, not a metric clustering.
//! - [`SnapMode::UnionFind`]: any two inputs closer than the threshold share
//!   a node (transitive closure).  The representative is the member that
//!   comes first in snap order.
//!
//! In both modes representatives are pairwise at least `threshold_m` apart.
//!
//! # Spatial index
//!
//! Candidates are found through an `rstar` R-tree in degree space.  The query
//! window is a conservative bound, derived from the haversine formula, on
//! every point closer than the threshold; the exact haversine test decides.
//! Where no finite window exists (near the poles or across the antimeridian) the
//! snapper falls back to a linear scan.

use std::collections::BTreeMap;

use log::{debug, info};
use rstar::{AABB, PointDistance, RTree, RTreeObject};
use rustc_hash::{FxHashMap, FxHashSet};

use pc_core::{BuildConfig, Coordinate, EARTH_RADIUS_M, NodeId, SnapMode, SnapOrder};

// ── R-tree entry ──────────────────────────────────────────────────────────────

/// A `[lon, lat]` point tagged with its rank in snap order.
#[derive(Clone)]
struct RankedPoint {
    point: [f64; 2],
    rank: u32,
}

impl RTreeObject for RankedPoint {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for RankedPoint {
    /// Squared Euclidean distance in degree space.  Only used by rstar
    /// internals; the snap decision itself is made with haversine.
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dx = self.point[0] - point[0];
        let dy = self.point[1] - point[1];
        dx * dx + dy * dy
    }
}

/// Degree-space box containing every coordinate closer than `threshold_m`
/// to `c`, or `None` if it cannot be bounded without wrapping.
fn search_window(c: Coordinate, threshold_m: f64) -> Option<AABB<[f64; 2]>> {
    const SLACK: f64 = 1.000_001;

    let delta = threshold_m / EARTH_RADIUS_M;
    let lat = c.lat.to_radians();
    let far_lat = lat.abs() + delta;
    if far_lat >= std::f64::consts::FRAC_PI_2 {
        return None;
    }

    // hav(d) = hav(Δφ) + cos φ1 cos φ2 hav(Δλ) ≥ cos φ1 cos φ2 hav(Δλ)
    let hav_delta = (delta * 0.5).sin().powi(2);
    let q = hav_delta / (lat.cos() * far_lat.cos());
    if q >= 1.0 {
        return None;
    }
    let d_lon = (2.0 * q.sqrt().asin()).to_degrees() * SLACK;
    let d_lat = delta.to_degrees() * SLACK;

    if c.lon - d_lon < -180.0 || c.lon + d_lon > 180.0 {
        return None;
    }
    Some(AABB::from_corners(
        [c.lon - d_lon, c.lat - d_lat],
        [c.lon + d_lon, c.lat + d_lat],
    ))
}

// ── Output types ──────────────────────────────────────────────────────────────

/// Total map from every raw coordinate id to the canonical node that absorbed
/// it.
#[derive(Clone, Debug, Default)]
pub struct NodeMapping {
    canonical: FxHashMap<NodeId, NodeId>,
}

impl NodeMapping {
    /// Canonical node for `raw`, or `None` if `raw` was never snapped.
    pub fn resolve(&self, raw: &NodeId) -> Option<&NodeId> {
        self.canonical.get(raw)
    }

    pub fn len(&self) -> usize {
        self.canonical.len()
    }

    pub fn is_empty(&self) -> bool {
        self.canonical.is_empty()
    }
}

/// Result of one snapping pass.
#[derive(Clone, Debug, Default)]
pub struct Snapped {
    /// Canonical nodes keyed by id.
    pub nodes: BTreeMap<NodeId, Coordinate>,
    /// Representatives in creation order.
    pub representatives: Vec<Coordinate>,
    pub mapping: NodeMapping,
}

// ── NodeSnapper ───────────────────────────────────────────────────────────────

/// Configurable node snapper.
///
/// ```
/// use pc_core::Coordinate;
/// use pc_topology::NodeSnapper;
///
/// let a = Coordinate::new(-77.0300000, -12.0500000);
/// let b = Coordinate::new(-77.0300100, -12.0500000); // ~1.1 m east
/// let snapped = NodeSnapper::new(3.0).snap([a, b]);
/// assert_eq!(snapped.nodes.len(), 1);
/// ```
#[derive(Clone, Debug)]
pub struct NodeSnapper {
    threshold_m: f64,
    order: SnapOrder,
    mode: SnapMode,
}

impl NodeSnapper {
    /// Greedy snapper in first-seen order.
    pub fn new(threshold_m: f64) -> Self {
        Self { threshold_m, order: SnapOrder::FirstSeen, mode: SnapMode::Greedy }
    }

    pub fn from_config(config: &BuildConfig) -> Self {
        Self {
            threshold_m: config.snap_threshold_m,
            order: config.snap_order,
            mode: config.snap_mode,
        }
    }

    pub fn order(mut self, order: SnapOrder) -> Self {
        self.order = order;
        self
    }

    pub fn mode(mut self, mode: SnapMode) -> Self {
        self.mode = mode;
        self
    }

    /// Snap `coords`.  Repeated coordinates (same [`NodeId`]) are collapsed to
    /// their first occurrence before ordering.
    pub fn snap<I>(&self, coords: I) -> Snapped
    where
        I: IntoIterator<Item = Coordinate>,
    {
        let inputs = self.ordered_inputs(coords);
        let snapped = match self.mode {
            SnapMode::Greedy => self.snap_greedy(&inputs),
            SnapMode::UnionFind => self.snap_union_find(&inputs),
        };
        info!(
            "snapped {} coordinates into {} nodes ({:?}, {:?}, {} m)",
            inputs.len(),
            snapped.nodes.len(),
            self.mode,
            self.order,
            self.threshold_m
        );
        snapped
    }

    fn ordered_inputs<I>(&self, coords: I) -> Vec<(NodeId, Coordinate)>
    where
        I: IntoIterator<Item = Coordinate>,
    {
        let mut seen: FxHashSet<NodeId> = FxHashSet::default();
        let mut inputs: Vec<(NodeId, Coordinate)> = Vec::new();
        for c in coords {
            let id = NodeId::from_coordinate(c);
            if seen.insert(id.clone()) {
                inputs.push((id, c));
            }
        }
        if self.order == SnapOrder::Lexicographic {
            inputs.sort_by(|(_, a), (_, b)| a.lon.total_cmp(&b.lon).then(a.lat.total_cmp(&b.lat)));
        }
        inputs
    }

    fn snap_greedy(&self, inputs: &[(NodeId, Coordinate)]) -> Snapped {
        let mut tree: RTree<RankedPoint> = RTree::new();
        let mut reps: Vec<(NodeId, Coordinate)> = Vec::new();
        let mut canonical: FxHashMap<NodeId, NodeId> =
            FxHashMap::with_capacity_and_hasher(inputs.len(), Default::default());
        let mut fallbacks = 0usize;

        for (id, c) in inputs {
            let hit = match search_window(*c, self.threshold_m) {
                Some(window) => tree
                    .locate_in_envelope(&window)
                    .filter(|e| reps[e.rank as usize].1.distance_m(*c) < self.threshold_m)
                    .map(|e| e.rank)
                    .min(),
                None => {
                    fallbacks += 1;
                    reps.iter()
                        .position(|(_, r)| r.distance_m(*c) < self.threshold_m)
                        .map(|i| i as u32)
                }
            };

            match hit {
                Some(rank) => {
                    canonical.insert(id.clone(), reps[rank as usize].0.clone());
                }
                None => {
                    let rank = reps.len() as u32;
                    tree.insert(RankedPoint { point: c.xy(), rank });
                    reps.push((id.clone(), *c));
                    canonical.insert(id.clone(), id.clone());
                }
            }
        }

        if fallbacks > 0 {
            debug!("{fallbacks} coordinates used the linear-scan fallback");
        }
        finish(reps, canonical)
    }

    fn snap_union_find(&self, inputs: &[(NodeId, Coordinate)]) -> Snapped {
        let n = inputs.len();
        let tree = RTree::bulk_load(
            inputs
                .iter()
                .enumerate()
                .map(|(i, (_, c))| RankedPoint { point: c.xy(), rank: i as u32 })
                .collect(),
        );

        let mut parent: Vec<u32> = (0..n as u32).collect();
        for (i, (_, c)) in inputs.iter().enumerate() {
            let close: Vec<u32> = match search_window(*c, self.threshold_m) {
                Some(window) => tree
                    .locate_in_envelope(&window)
                    .filter(|e| e.rank as usize > i)
                    .filter(|e| inputs[e.rank as usize].1.distance_m(*c) < self.threshold_m)
                    .map(|e| e.rank)
                    .collect(),
                None => (i + 1..n)
                    .filter(|&j| inputs[j].1.distance_m(*c) < self.threshold_m)
                    .map(|j| j as u32)
                    .collect(),
            };
            for j in close {
                union(&mut parent, i as u32, j);
            }
        }

        let mut reps: Vec<(NodeId, Coordinate)> = Vec::new();
        let mut canonical: FxHashMap<NodeId, NodeId> =
            FxHashMap::with_capacity_and_hasher(n, Default::default());
        for (i, (id, c)) in inputs.iter().enumerate() {
            let root = find(&mut parent, i as u32) as usize;
            if root == i {
                reps.push((id.clone(), *c));
            }
            canonical.insert(id.clone(), inputs[root].0.clone());
        }
        finish(reps, canonical)
    }
}

fn finish(reps: Vec<(NodeId, Coordinate)>, canonical: FxHashMap<NodeId, NodeId>) -> Snapped {
    let representatives = reps.iter().map(|(_, c)| *c).collect();
    Snapped {
        nodes: reps.into_iter().collect(),
        representatives,
        mapping: NodeMapping { canonical },
    }
}

// ── Union-find helpers ────────────────────────────────────────────────────────

fn find(parent: &mut [u32], x: u32) -> u32 {
    let mut root = x;
    while parent[root as usize] != root {
        root = parent[root as usize];
    }
    // Path compression.
    let mut cur = x;
    while parent[cur as usize] != root {
        let next = parent[cur as usize];
        parent[cur as usize] = root;
        cur = next;
    }
    root
}

/// Merge the sets of `a` and `b`; the smaller rank becomes the root so the
/// root is always the earliest member in snap order.
fn union(parent: &mut [u32], a: u32, b: u32) {
    let ra = find(parent, a);
    let rb = find(parent, b);
    if ra != rb {
        let (lo, hi) = if ra < rb { (ra, rb) } else { (rb, ra) };
        parent[hi as usize] = lo;
    }
}
