//! Bike-lane network representation and builder.
//!
//! # Data layout
//!
//! The graph is undirected but stored as symmetric directed adjacency in
//! **Compressed Sparse Row (CSR)** format.  Given a `NodeIx n`, its adjacency
//! entries occupy the slice:
//!
//! ```text
//! edge_to[ node_out_start[n] .. node_out_start[n+1] ]
//! ```
//!
//! Nodes are stored in ascending [`NodeId`] order, so `NodeIx` order equals
//! id order and every iteration over the network is deterministic.  Within
//! a node's slice, entries are sorted by neighbour index.
//!
//! # Invariants
//!
//! - Symmetric: an entry `a → b` with weight `w` implies `b → a` with `w`.
//! - No self-loops.
//! - At most one entry per ordered node pair.

use std::collections::BTreeMap;

use log::debug;
use rustc_hash::FxHashMap;

use pc_core::{Coordinate, EdgeIx, NodeId, NodeIx, Segment};
use pc_topology::{NodeMapping, Snapped};

// ── BikeNetwork ───────────────────────────────────────────────────────────────

/// Undirected, distance-weighted bike-lane graph in CSR format.
///
/// Fields are `pub` for direct indexed access on hot paths.  Do not construct
/// directly; use [`NetworkBuilder`] or [`crate::build_network`].
pub struct BikeNetwork {
    // ── Node data ─────────────────────────────────────────────────────────
    /// Node identifiers, ascending.  Indexed by `NodeIx`.
    pub node_ids: Vec<NodeId>,

    /// Representative coordinate of each node.  Indexed by `NodeIx`.
    pub node_pos: Vec<Coordinate>,

    // ── CSR adjacency ─────────────────────────────────────────────────────
    /// CSR row pointer.  Length = `node_count + 1`.
    pub node_out_start: Vec<u32>,

    /// Source node of each adjacency entry.
    pub edge_from: Vec<NodeIx>,

    /// Destination node of each adjacency entry.
    pub edge_to: Vec<NodeIx>,

    /// Edge weight in metres: the haversine length of the lane piece that
    /// produced the edge, measured between its pre-snap endpoints.
    pub edge_length_m: Vec<f64>,

    index: FxHashMap<NodeId, NodeIx>,
}

impl BikeNetwork {
    /// A network with no nodes or edges.  Route queries against it fail with
    /// [`SpatialError::EmptyNetwork`](crate::SpatialError::EmptyNetwork).
    pub fn empty() -> Self {
        NetworkBuilder::new().build()
    }

    // ── Graph dimensions ──────────────────────────────────────────────────

    pub fn node_count(&self) -> usize {
        self.node_ids.len()
    }

    /// Number of directed adjacency entries (twice the undirected edges).
    pub fn edge_count(&self) -> usize {
        self.edge_to.len()
    }

    pub fn undirected_edge_count(&self) -> usize {
        self.edge_to.len() / 2
    }

    pub fn is_empty(&self) -> bool {
        self.node_ids.is_empty()
    }

    // ── Node lookup ───────────────────────────────────────────────────────

    pub fn index_of(&self, id: &NodeId) -> Option<NodeIx> {
        self.index.get(id).copied()
    }

    #[inline]
    pub fn node_id(&self, node: NodeIx) -> &NodeId {
        &self.node_ids[node.index()]
    }

    #[inline]
    pub fn position(&self, node: NodeIx) -> Coordinate {
        self.node_pos[node.index()]
    }

    /// All nodes in id order.
    pub fn nodes(&self) -> impl Iterator<Item = (&NodeId, Coordinate)> + '_ {
        self.node_ids.iter().zip(self.node_pos.iter().copied())
    }

    // ── Graph traversal ───────────────────────────────────────────────────

    /// Iterator over the adjacency entries of `node`.
    #[inline]
    pub fn out_edges(&self, node: NodeIx) -> impl Iterator<Item = EdgeIx> + '_ {
        let start = self.node_out_start[node.index()];
        let end = self.node_out_start[node.index() + 1];
        (start..end).map(EdgeIx)
    }

    #[inline]
    pub fn out_degree(&self, node: NodeIx) -> usize {
        (self.node_out_start[node.index() + 1] - self.node_out_start[node.index()]) as usize
    }

    /// `(neighbour, weight)` pairs of `node`, ascending by neighbour.
    pub fn neighbors(&self, node: NodeIx) -> impl Iterator<Item = (NodeIx, f64)> + '_ {
        self.out_edges(node)
            .map(|e| (self.edge_to[e.index()], self.edge_length_m[e.index()]))
    }

    /// Weight of the edge `a`-`b`, if any.
    pub fn edge_weight(&self, a: NodeIx, b: NodeIx) -> Option<f64> {
        let start = self.node_out_start[a.index()] as usize;
        let end = self.node_out_start[a.index() + 1] as usize;
        self.edge_to[start..end]
            .binary_search(&b)
            .ok()
            .map(|i| self.edge_length_m[start + i])
    }

    /// The graph as nested maps: node id → neighbour id → weight in metres.
    /// Every node appears as a key, including isolated ones.
    pub fn adjacency(&self) -> BTreeMap<NodeId, BTreeMap<NodeId, f64>> {
        (0..self.node_count())
            .map(|i| {
                let node = NodeIx(i as u32);
                let row = self
                    .neighbors(node)
                    .map(|(nb, w)| (self.node_id(nb).clone(), w))
                    .collect();
                (self.node_id(node).clone(), row)
            })
            .collect()
    }

    // ── Spatial queries ───────────────────────────────────────────────────

    /// The node closest to `pos` by haversine distance.
    ///
    /// Linear scan in id order; on ties the node with the smaller id wins.
    /// Returns `None` only if the network has no nodes.
    pub fn nearest_node(&self, pos: Coordinate) -> Option<NodeIx> {
        let mut best: Option<(NodeIx, f64)> = None;
        for (i, &p) in self.node_pos.iter().enumerate() {
            let d = pos.distance_m(p);
            if best.is_none_or(|(_, bd)| d < bd) {
                best = Some((NodeIx(i as u32), d));
            }
        }
        best.map(|(ix, _)| ix)
    }
}

// ── NetworkBuilder ────────────────────────────────────────────────────────────

/// Construct a [`BikeNetwork`] incrementally, then call [`build`](Self::build).
///
/// # Example
///
/// ```
/// use pc_core::{Coordinate, NodeId};
/// use pc_spatial::NetworkBuilder;
///
/// let a = Coordinate::new(-77.03, -12.05);
/// let c = Coordinate::new(-77.02, -12.05);
/// let mut b = NetworkBuilder::new();
/// b.add_node(NodeId::from(a), a);
/// b.add_node(NodeId::from(c), c);
/// b.add_edge(&NodeId::from(a), &NodeId::from(c), 1_087.0);
/// let net = b.build();
/// assert_eq!(net.node_count(), 2);
/// assert_eq!(net.edge_count(), 2); // symmetric
/// ```
#[derive(Default)]
pub struct NetworkBuilder {
    nodes: BTreeMap<NodeId, Coordinate>,
    adjacency: BTreeMap<NodeId, BTreeMap<NodeId, f64>>,
}

impl NetworkBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from the canonical nodes of a snapping pass, each with an empty
    /// neighbour map.
    pub fn from_snapped(snapped: &Snapped) -> Self {
        let mut b = Self::new();
        for (id, &pos) in &snapped.nodes {
            b.add_node(id.clone(), pos);
        }
        b
    }

    /// Add a node.  Returns `false` (and keeps the existing position) if the
    /// id is already present.
    pub fn add_node(&mut self, id: NodeId, pos: Coordinate) -> bool {
        if self.nodes.contains_key(&id) {
            return false;
        }
        self.adjacency.insert(id.clone(), BTreeMap::new());
        self.nodes.insert(id, pos);
        true
    }

    /// Add the edge for one lane piece.
    ///
    /// Both endpoints are resolved through `mapping`.  An endpoint the mapping
    /// does not know keeps its raw id; a canonical id missing from the node
    /// set is added on demand with the endpoint itself as representative.  The
    /// weight is the length of `seg` between its original endpoints, not the
    /// distance between canonical representatives.
    ///
    /// Returns `false` if both endpoints resolve to the same node.
    pub fn add_segment(&mut self, seg: &Segment, mapping: &NodeMapping) -> bool {
        let a = self.resolve_endpoint(seg.start, mapping);
        let b = self.resolve_endpoint(seg.end, mapping);
        self.add_edge(&a, &b, seg.length_m())
    }

    fn resolve_endpoint(&mut self, p: Coordinate, mapping: &NodeMapping) -> NodeId {
        let raw = NodeId::from_coordinate(p);
        let id = mapping.resolve(&raw).cloned().unwrap_or(raw);
        if !self.nodes.contains_key(&id) {
            self.add_node(id.clone(), p);
        }
        id
    }

    /// Add an undirected edge between two existing nodes.
    ///
    /// Self-loops are ignored.  When the pair is already connected the
    /// smaller weight is kept.  Returns `true` if the stored weight changed.
    pub fn add_edge(&mut self, a: &NodeId, b: &NodeId, length_m: f64) -> bool {
        if a == b || !self.nodes.contains_key(a) || !self.nodes.contains_key(b) {
            return false;
        }
        let changed = upsert_min(self.adjacency.entry(a.clone()).or_default(), b, length_m);
        upsert_min(self.adjacency.entry(b.clone()).or_default(), a, length_m);
        changed
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Undirected edges added so far.
    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(BTreeMap::len).sum::<usize>() / 2
    }

    /// Consume the builder and produce a [`BikeNetwork`].
    pub fn build(self) -> BikeNetwork {
        let node_count = self.nodes.len();

        let index: FxHashMap<NodeId, NodeIx> = self
            .nodes
            .keys()
            .enumerate()
            .map(|(i, id)| (id.clone(), NodeIx(i as u32)))
            .collect();

        let mut node_out_start = Vec::with_capacity(node_count + 1);
        let mut edge_from = Vec::new();
        let mut edge_to = Vec::new();
        let mut edge_length_m = Vec::new();
        node_out_start.push(0u32);

        // BTreeMap iteration gives ascending ids for both rows and columns.
        for (i, row) in self.adjacency.values().enumerate() {
            for (nb, &w) in row {
                edge_from.push(NodeIx(i as u32));
                edge_to.push(index[nb]);
                edge_length_m.push(w);
            }
            node_out_start.push(edge_to.len() as u32);
        }
        debug_assert_eq!(node_out_start.len(), node_count + 1);

        let (node_ids, node_pos): (Vec<NodeId>, Vec<Coordinate>) = self.nodes.into_iter().unzip();

        debug!("built network: {} nodes, {} edges", node_count, edge_to.len() / 2);

        BikeNetwork {
            node_ids,
            node_pos,
            node_out_start,
            edge_from,
            edge_to,
            edge_length_m,
            index,
        }
    }
}

fn upsert_min(row: &mut BTreeMap<NodeId, f64>, key: &NodeId, w: f64) -> bool {
    match row.get_mut(key) {
        Some(existing) if *existing <= w => false,
        Some(existing) => {
            *existing = w;
            true
        }
        None => {
            row.insert(key.clone(), w);
            true
        }
    }
}
