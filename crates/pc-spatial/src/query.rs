//! Coordinate-to-coordinate route queries.

use log::{debug, info};

use pc_core::{BuildConfig, Coordinate, CoreError, LaneRecord, NodeId};

use crate::build::build_from_records;
use crate::network::BikeNetwork;
use crate::router::Router;
use crate::{SpatialError, SpatialResult};

/// Start and end of a requested trip.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RouteQuery {
    pub start: Coordinate,
    pub end: Coordinate,
}

impl RouteQuery {
    pub fn new(start: Coordinate, end: Coordinate) -> Self {
        Self { start, end }
    }
}

/// A found route.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RouteResult {
    pub start_node: NodeId,
    pub end_node: NodeId,
    /// Sum of the traversed edge weights.
    pub distance_m: f64,
    /// Node ids from `start_node` to `end_node`, inclusive.
    pub path_nodes: Vec<NodeId>,
    /// Representative coordinate of each entry of `path_nodes`.
    pub path_coords: Vec<Coordinate>,
}

/// Outcome of a well-formed query against a non-empty network.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "status", rename_all = "snake_case"))]
pub enum RouteOutcome {
    Found(RouteResult),
    /// Both coordinates resolved to nodes, but the nodes lie in different
    /// connected components.
    NoPath { start_node: NodeId, end_node: NodeId },
}

impl RouteOutcome {
    pub fn is_found(&self) -> bool {
        matches!(self, RouteOutcome::Found(_))
    }

    pub fn found(&self) -> Option<&RouteResult> {
        match self {
            RouteOutcome::Found(r) => Some(r),
            RouteOutcome::NoPath { .. } => None,
        }
    }

    /// Route length in metres; infinite when there is no path.
    pub fn distance_m(&self) -> f64 {
        self.found().map_or(f64::INFINITY, |r| r.distance_m)
    }
}

/// Answer `query` against an already built network.
///
/// # Errors
///
/// - [`SpatialError::Core`] if either coordinate is non-finite or out of range.
/// - [`SpatialError::EmptyNetwork`] if the network has no nodes.
///
/// An unreachable destination is [`RouteOutcome::NoPath`], not an error.
pub fn route<R: Router>(network: &BikeNetwork, query: &RouteQuery, router: &R) -> SpatialResult<RouteOutcome> {
    for c in [query.start, query.end] {
        if !c.is_valid() {
            return Err(CoreError::InvalidCoordinate { lon: c.lon, lat: c.lat }.into());
        }
    }

    let from = network.nearest_node(query.start).ok_or(SpatialError::EmptyNetwork)?;
    let to = network.nearest_node(query.end).ok_or(SpatialError::EmptyNetwork)?;
    let start_node = network.node_id(from).clone();
    let end_node = network.node_id(to).clone();
    debug!("query {} → {} resolved to {start_node} → {end_node}", query.start, query.end);

    let Some(path) = router.shortest_path(network, from, to)? else {
        info!("no connected path between {start_node} and {end_node}");
        return Ok(RouteOutcome::NoPath { start_node, end_node });
    };

    info!("route {start_node} → {end_node}: {} nodes, {:.1} m", path.nodes.len(), path.total_m);
    Ok(RouteOutcome::Found(RouteResult {
        start_node,
        end_node,
        distance_m: path.total_m,
        path_nodes: path.nodes.iter().map(|&n| network.node_id(n).clone()).collect(),
        path_coords: path.nodes.iter().map(|&n| network.position(n)).collect(),
    }))
}

/// Build the routing network from `records` and answer `query`, keeping
/// nothing between calls.
pub fn route_records<R: Router>(
    records: &[LaneRecord],
    query: &RouteQuery,
    config: &BuildConfig,
    router: &R,
) -> SpatialResult<RouteOutcome> {
    let built = build_from_records(records, config)?;
    route(&built.network, query, router)
}
