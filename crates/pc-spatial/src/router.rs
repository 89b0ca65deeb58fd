//! Routing trait and default Dijkstra implementation.
//!
//! # Pluggability
//!
//! The route query calls routing via the [`Router`] trait, so callers can
//! swap in A* or a precomputed hierarchy without touching the query
//! pipeline.  The default [`DijkstraRouter`] is sufficient at city scale.
//!
//! # Cost units
//!
//! Costs are metres (`f64`), the sum of traversed edge weights.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use pc_core::NodeIx;

use crate::network::BikeNetwork;
use crate::{SpatialError, SpatialResult};

// ── Path ──────────────────────────────────────────────────────────────────────

/// A shortest path: node sequence from source to destination inclusive, and
/// its total length.
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    pub nodes: Vec<NodeIx>,
    pub total_m: f64,
}

impl Path {
    /// `true` if the source and destination are the same node.
    pub fn is_trivial(&self) -> bool {
        self.nodes.len() == 1
    }
}

// ── Router trait ──────────────────────────────────────────────────────────────

/// Pluggable single-pair shortest-path engine.
///
/// # Thread safety
///
/// Implementations must be `Send + Sync` so one router can serve concurrent
/// requests.
pub trait Router: Send + Sync {
    /// Shortest path from `from` to `to`.
    ///
    /// Returns `Ok(None)` when `to` is unreachable.  `from == to` yields a
    /// single-node path of length zero.
    ///
    /// # Errors
    ///
    /// [`SpatialError::NodeNotFound`] if either index is outside `network`.
    fn shortest_path(&self, network: &BikeNetwork, from: NodeIx, to: NodeIx) -> SpatialResult<Option<Path>>;
}

// ── DijkstraRouter ────────────────────────────────────────────────────────────

/// Dijkstra's algorithm over the CSR bike graph.
///
/// Lazy deletion: relaxation pushes a fresh heap entry per improvement and
/// stale entries are skipped on pop.  A node is settled the first time it is
/// popped and never expanded again; the search stops as soon as the target
/// is settled.  Equal-cost entries pop in ascending `NodeIx` (= `NodeId`)
/// order.  Paths are rebuilt from a predecessor array after termination.
pub struct DijkstraRouter;

impl Router for DijkstraRouter {
    fn shortest_path(&self, network: &BikeNetwork, from: NodeIx, to: NodeIx) -> SpatialResult<Option<Path>> {
        for ix in [from, to] {
            if ix.index() >= network.node_count() {
                return Err(SpatialError::NodeNotFound(ix));
            }
        }
        Ok(dijkstra(network, from, to))
    }
}

// ── Dijkstra internals ────────────────────────────────────────────────────────

#[derive(Copy, Clone, PartialEq)]
struct State {
    cost: f64,
    node: NodeIx,
}

impl Eq for State {}

// BinaryHeap is a max-heap: reverse both keys so the cheapest entry, then the
// smallest node, comes out first.
impl Ord for State {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for State {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

fn dijkstra(network: &BikeNetwork, from: NodeIx, to: NodeIx) -> Option<Path> {
    if from == to {
        return Some(Path { nodes: vec![from], total_m: 0.0 });
    }

    let n = network.node_count();
    // dist[v] = best known cost (m) to reach v.
    let mut dist = vec![f64::INFINITY; n];
    // prev[v] = node that reached v; NodeIx::INVALID for the source and unreached nodes.
    let mut prev = vec![NodeIx::INVALID; n];
    let mut settled = vec![false; n];

    dist[from.index()] = 0.0;
    let mut heap = BinaryHeap::new();
    heap.push(State { cost: 0.0, node: from });

    while let Some(State { cost, node }) = heap.pop() {
        if settled[node.index()] {
            continue;
        }
        settled[node.index()] = true;

        if node == to {
            return Some(Path { nodes: reconstruct(&prev, to), total_m: cost });
        }

        for (neighbor, w) in network.neighbors(node) {
            if settled[neighbor.index()] {
                continue;
            }
            let new_cost = cost + w;
            if new_cost < dist[neighbor.index()] {
                dist[neighbor.index()] = new_cost;
                prev[neighbor.index()] = node;
                heap.push(State { cost: new_cost, node: neighbor });
            }
        }
    }

    None
}

fn reconstruct(prev: &[NodeIx], to: NodeIx) -> Vec<NodeIx> {
    let mut nodes = vec![to];
    let mut cur = to;
    while prev[cur.index()] != NodeIx::INVALID {
        cur = prev[cur.index()];
        nodes.push(cur);
    }
    nodes.reverse();
    nodes
}
