//! CSV export of a built network.
//!
//! Creates two files in the target directory:
//! - `nodes.csv`: `node_id,lon,lat,degree`, one row per node in id order
//! - `edges.csv`: `from,to,length_m`, one row per undirected edge
//!   (`from < to`)

use std::fs::File;
use std::path::Path;

use csv::Writer;
use log::info;

use pc_core::NodeIx;
use pc_spatial::BikeNetwork;

use crate::DataResult;

/// Write `nodes.csv` and `edges.csv` for `network` into `dir`.
pub fn export_network_csv(network: &BikeNetwork, dir: &Path) -> DataResult<()> {
    let mut nodes: Writer<File> = Writer::from_path(dir.join("nodes.csv"))?;
    nodes.write_record(["node_id", "lon", "lat", "degree"])?;
    for (i, (id, pos)) in network.nodes().enumerate() {
        let degree = network.out_degree(NodeIx(i as u32));
        nodes.write_record(&[
            id.to_string(),
            pos.lon.to_string(),
            pos.lat.to_string(),
            degree.to_string(),
        ])?;
    }
    nodes.flush()?;

    let mut edges: Writer<File> = Writer::from_path(dir.join("edges.csv"))?;
    edges.write_record(["from", "to", "length_m"])?;
    for e in 0..network.edge_count() {
        let (from, to) = (network.edge_from[e], network.edge_to[e]);
        if from < to {
            edges.write_record(&[
                network.node_id(from).to_string(),
                network.node_id(to).to_string(),
                format!("{:.3}", network.edge_length_m[e]),
            ])?;
        }
    }
    edges.flush()?;

    info!(
        "exported {} nodes and {} edges to {}",
        network.node_count(),
        network.undirected_edge_count(),
        dir.display()
    );
    Ok(())
}
