//! The topology pipeline: segments → crossings → split → snap → graph.
//!
//! Every call rebuilds from the full segment set; nothing is retained between
//! calls.  Callers that want reuse wrap this in a [`NetworkCache`](crate::NetworkCache).

use log::{debug, info, warn};

use pc_core::{BuildConfig, Coordinate, CoreError, LaneRecord, Segment, segments_from_records};
use pc_topology::{NodeMapping, NodeSnapper, Snapped, detect_intersections, split_segments};

use crate::network::{BikeNetwork, NetworkBuilder};
use crate::SpatialResult;

/// Everything a build produces.  Only `network` is needed for routing; the
/// rest is exposed for export and diagnostics.
pub struct BuildOutput {
    pub network: BikeNetwork,
    /// Raw coordinate id → canonical node id, for every snapped coordinate.
    pub mapping: NodeMapping,
    /// Distinct proper crossings among the input segments.
    pub intersections: Vec<Coordinate>,
    /// Input segments cut at the crossings.
    pub split_segments: Vec<Segment>,
}

/// Which coordinates feed the node snapper, in snap order.
#[derive(Copy, Clone, Debug, PartialEq)]
enum SnapFeed {
    /// Original endpoints, then crossing points, then split endpoints.
    FullNetwork,
    /// Split endpoints only.
    SplitEndpoints,
}

/// Build the full network from fully specified segments.
///
/// The snapper sees the original endpoints first, then the crossing points,
/// then the split endpoints, so crossings become canonical nodes too.  A
/// crossing that no piece ends at (its detour exceeds the colinearity
/// tolerance, as happens on long spans) is kept as an isolated node; route
/// on [`build_route_network`] instead.
pub fn build_network(segments: &[Segment], config: &BuildConfig) -> SpatialResult<BuildOutput> {
    assemble(segments, config, SnapFeed::FullNetwork)
}

/// Build the routing network, snapping only the endpoints of the split
/// segments.
///
/// Every node is the end of some lane piece.  The node set differs from
/// [`build_network`] only by crossings that no piece ends at, which the full
/// build keeps as isolated nodes.  [`build_from_records`], the route query
/// and [`NetworkCache`](crate::NetworkCache) all route on this build.
pub fn build_route_network(segments: &[Segment], config: &BuildConfig) -> SpatialResult<BuildOutput> {
    assemble(segments, config, SnapFeed::SplitEndpoints)
}

/// Drop incomplete records, then [`build_route_network`].
pub fn build_from_records(records: &[LaneRecord], config: &BuildConfig) -> SpatialResult<BuildOutput> {
    let (segments, dropped) = segments_from_records(records);
    if dropped > 0 {
        warn!("dropped {dropped} of {} lane records with a missing endpoint", records.len());
    }
    build_route_network(&segments, config)
}

fn assemble(segments: &[Segment], config: &BuildConfig, feed: SnapFeed) -> SpatialResult<BuildOutput> {
    config.validate()?;
    validate_segments(segments)?;

    let report = detect_intersections(segments, config.parallel_epsilon);
    let split = split_segments(&report.segments, &report.points, config.colinear_tolerance_m);

    let split_endpoints = split.iter().flat_map(Segment::endpoints);
    let snapper = NodeSnapper::from_config(config);
    let snapped = match feed {
        SnapFeed::FullNetwork => snapper.snap(
            segments
                .iter()
                .flat_map(Segment::endpoints)
                .chain(report.points.iter().copied())
                .chain(split_endpoints),
        ),
        SnapFeed::SplitEndpoints => snapper.snap(split_endpoints),
    };
    debug!("{feed:?}: {} canonical nodes before edge insertion", snapped.nodes.len());

    let network = connect(&split, &snapped);
    info!(
        "network ready: {} segments → {} pieces, {} nodes, {} edges",
        segments.len(),
        split.len(),
        network.node_count(),
        network.undirected_edge_count()
    );

    Ok(BuildOutput {
        network,
        mapping: snapped.mapping,
        intersections: report.points,
        split_segments: split,
    })
}

/// Seed a builder with the snapped nodes and add one edge per lane piece.
fn connect(pieces: &[Segment], snapped: &Snapped) -> BikeNetwork {
    let mut builder = NetworkBuilder::from_snapped(snapped);
    let added = pieces
        .iter()
        .filter(|piece| builder.add_segment(piece, &snapped.mapping))
        .count();
    if added < pieces.len() {
        debug!("{} lane pieces were self-loops or parallel duplicates", pieces.len() - added);
    }
    builder.build()
}

fn validate_segments(segments: &[Segment]) -> Result<(), CoreError> {
    for p in segments.iter().flat_map(Segment::endpoints) {
        if !p.is_valid() {
            return Err(CoreError::InvalidCoordinate { lon: p.lon, lat: p.lat });
        }
    }
    Ok(())
}
