use ephys_core::{BinEdges, SpikeEvent};
use ephys_summary::bin_spikes;
use proptest::prelude::*;

fn spike(cluster: u32, time: f64) -> SpikeEvent {
    SpikeEvent { cluster, time }
}

#[test]
fn counts_land_in_half_open_bins() {
    let edges = BinEdges::new(-1.0, 1.0, 0.5).unwrap();
    let spikes = vec![
        spike(3, 9.0),  // bin 0 of trial at 10.0
        spike(3, 9.99), // bin 1 of trial at 10.0
        spike(3, 11.0), // excluded upper edge for 10.0, bin 2 for 11.0
        spike(5, 10.5), // bin 3 of trial at 10.0, bin 1 of trial at 11.0
    ];
    let tensor = bin_spikes(&spikes, &[10.0, 11.0], &edges);

    assert_eq!(tensor.clusters, vec![3, 5]);
    assert_eq!(tensor.counts.shape(), &[2, 4, 2]);
    assert_eq!(tensor.counts[[0, 0, 0]], 1);
    assert_eq!(tensor.counts[[0, 1, 0]], 1);
    assert_eq!(tensor.counts[[1, 3, 0]], 1);
    assert_eq!(tensor.counts[[0, 2, 1]], 1);
    assert_eq!(tensor.counts[[1, 1, 1]], 1);
    let trial0_total: u32 = tensor.counts.slice(ndarray::s![.., .., 0]).iter().sum();
    assert_eq!(trial0_total, 3);
}

#[test]
fn cluster_with_no_spikes_in_any_window_keeps_zero_row() {
    let edges = BinEdges::new(0.0, 1.0, 0.25).unwrap();
    let spikes = vec![spike(1, 10.1), spike(2, 500.0)];
    let tensor = bin_spikes(&spikes, &[10.0], &edges);

    assert_eq!(tensor.clusters, vec![1, 2]);
    let row2 = tensor.counts.slice(ndarray::s![1, .., ..]);
    assert!(row2.iter().all(|count| *count == 0));
    assert_eq!(tensor.counts[[0, 0, 0]], 1);
}

#[test]
fn edge_sequence_is_recorded_alongside_counts() {
    let edges = BinEdges::new(-1.0, 3.0, 0.05).unwrap();
    let tensor = bin_spikes(&[spike(1, 0.0)], &[0.0], &edges);
    assert_eq!(tensor.edges.len(), tensor.counts.shape()[1] + 1);
    assert!((tensor.edges[0] - -1.0).abs() < 1e-12);
}

#[test]
fn empty_spike_table_yields_empty_cluster_axis() {
    let edges = BinEdges::new(0.0, 1.0, 0.5).unwrap();
    let tensor = bin_spikes(&[], &[1.0, 2.0], &edges);
    assert!(tensor.clusters.is_empty());
    assert_eq!(tensor.counts.shape(), &[0, 2, 2]);
}

proptest! {
    // The time-bin dimension depends only on the edge triple, never
    // on cluster or trial count.
    #[test]
    fn bin_dimension_matches_edge_triple(
        start in -10.0f64..10.0,
        step in 0.01f64..1.0,
        bins in 1usize..50,
        frac in 0.1f64..0.9,
        cluster_count in 0u32..8,
        trial_count in 0usize..6,
    ) {
        let stop = start + bins as f64 * step + frac * step;
        let edges = BinEdges::new(start, stop, step).unwrap();
        prop_assert_eq!(edges.num_bins(), bins);

        let spikes: Vec<SpikeEvent> = (0..cluster_count)
            .map(|cluster| spike(cluster, start + cluster as f64 * 0.1))
            .collect();
        let align: Vec<f64> = (0..trial_count).map(|t| t as f64).collect();
        let tensor = bin_spikes(&spikes, &align, &edges);
        prop_assert_eq!(tensor.counts.shape()[1], bins);
        prop_assert_eq!(tensor.counts.shape()[2], trial_count);
        prop_assert_eq!(tensor.edges.len(), bins + 1);
    }
}
