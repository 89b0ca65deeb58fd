//! Whole-network summary figures.

use pc_core::NodeIx;

use crate::network::BikeNetwork;

/// Connectivity summary of a [`BikeNetwork`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NetworkStats {
    pub node_count: usize,
    /// Undirected edges.
    pub edge_count: usize,
    pub component_count: usize,
    pub largest_component_size: usize,
    /// `largest_component_size / node_count`; 0 for an empty network.
    pub largest_component_fraction: f64,
    /// `2E / (N (N − 1))`; 0 when `N ≤ 1`.
    pub density: f64,
    /// Sum of undirected edge weights.
    pub total_length_m: f64,
}

impl NetworkStats {
    pub fn compute(network: &BikeNetwork) -> Self {
        let n = network.node_count();
        let e = network.undirected_edge_count();
        let sizes = component_sizes(network);
        let largest = sizes.iter().copied().max().unwrap_or(0);

        let total_length_m: f64 = network
            .edge_from
            .iter()
            .zip(&network.edge_to)
            .zip(&network.edge_length_m)
            .filter(|((from, to), _)| from < to)
            .map(|(_, w)| w)
            .sum();

        Self {
            node_count: n,
            edge_count: e,
            component_count: sizes.len(),
            largest_component_size: largest,
            largest_component_fraction: if n == 0 { 0.0 } else { largest as f64 / n as f64 },
            density: if n <= 1 { 0.0 } else { 2.0 * e as f64 / (n as f64 * (n as f64 - 1.0)) },
            total_length_m,
        }
    }
}

/// Component of every node, labelled `0..k` in order of each component's
/// smallest node.
pub fn component_labels(network: &BikeNetwork) -> Vec<u32> {
    let n = network.node_count();
    let mut label = vec![u32::MAX; n];
    let mut next = 0u32;
    let mut stack: Vec<NodeIx> = Vec::new();

    for seed in 0..n {
        if label[seed] != u32::MAX {
            continue;
        }
        label[seed] = next;
        stack.push(NodeIx(seed as u32));
        while let Some(node) = stack.pop() {
            for (nb, _) in network.neighbors(node) {
                if label[nb.index()] == u32::MAX {
                    label[nb.index()] = next;
                    stack.push(nb);
                }
            }
        }
        next += 1;
    }
    label
}

fn component_sizes(network: &BikeNetwork) -> Vec<usize> {
    let labels = component_labels(network);
    let k = labels.iter().map(|&l| l as usize + 1).max().unwrap_or(0);
    let mut sizes = vec![0usize; k];
    for l in labels {
        sizes[l as usize] += 1;
    }
    sizes
}
