//! Binning spike times into time-aligned count tensors.

use ephys_core::{BinEdges, SpikeEvent};
use ndarray::Array3;
use serde::{Deserialize, Serialize};

/// Spike counts histogrammed around a per-trial alignment time.
///
/// Axes are (cluster, time-bin, trial). The cluster-id order and the
/// edge sequence are recorded alongside the counts so consumers can
/// reproduce the binning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinnedTensor {
    /// Spike counts, (cluster, time-bin, trial).
    pub counts: Array3<u32>,
    /// Cluster id for each row of the cluster axis, ascending.
    pub clusters: Vec<u32>,
    /// Bin edge sequence, `num_bins + 1` values.
    pub edges: Vec<f64>,
}

impl BinnedTensor {
    /// Row index of a cluster id on the cluster axis, if present.
    pub fn cluster_row(&self, cluster: u32) -> Option<usize> {
        self.clusters.binary_search(&cluster).ok()
    }
}

/// Histograms every cluster's spike times relative to each trial's
/// alignment time.
///
/// The cluster axis covers every cluster id present in the spike
/// table, in ascending order. Clusters with no spikes inside a window
/// keep their row with all-zero bins; no rows are dropped.
pub fn bin_spikes(spikes: &[SpikeEvent], align_times: &[f64], edges: &BinEdges) -> BinnedTensor {
    let mut clusters: Vec<u32> = spikes.iter().map(|spike| spike.cluster).collect();
    clusters.sort_unstable();
    clusters.dedup();

    let num_bins = edges.num_bins();
    let mut counts = Array3::<u32>::zeros((clusters.len(), num_bins, align_times.len()));

    for spike in spikes {
        // Ids were collected from the same table, so the lookup
        // cannot fail.
        let Ok(row) = clusters.binary_search(&spike.cluster) else {
            continue;
        };
        for (trial, align) in align_times.iter().enumerate() {
            if let Some(bin) = edges.bin_index(spike.time - align) {
                counts[[row, bin, trial]] += 1;
            }
        }
    }

    BinnedTensor {
        counts,
        clusters,
        edges: edges.edges(),
    }
}
