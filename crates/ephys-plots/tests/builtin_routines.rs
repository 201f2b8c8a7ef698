use ephys_core::{BinEdges, ClusterRecord, SessionId, SpikeEvent, TrialEvent};
use ephys_plots::{dispatch, RoutineRegistry};
use ephys_session::{LoadedSession, MetadataSource};
use ephys_summary::{assemble, find_summary, read_summary, write_summary};
use tempfile::TempDir;

fn write_sample_summary(results: &TempDir, probe_stims: &[f64]) {
    let session = SessionId::new("BH", "AS20", "03112025");
    let loaded = LoadedSession {
        trial_events: vec![
            TrialEvent {
                stim: 10.0,
                stim_time: 1.0,
                resp_time: 1.4,
            },
            TrialEvent {
                stim: 16.0,
                stim_time: 3.0,
                resp_time: 3.6,
            },
            TrialEvent {
                stim: 10.0,
                stim_time: 5.0,
                resp_time: 5.5,
            },
            TrialEvent {
                stim: 16.0,
                stim_time: 7.0,
                resp_time: 7.3,
            },
        ],
        spikes: vec![
            SpikeEvent { cluster: 3, time: 1.1 },
            SpikeEvent { cluster: 3, time: 3.1 },
            SpikeEvent { cluster: 3, time: 3.2 },
            SpikeEvent { cluster: 7, time: 5.1 },
            SpikeEvent { cluster: 7, time: 7.2 },
        ],
        cluster_info: vec![
            ClusterRecord {
                cluster: 3,
                group: "good".to_string(),
                depth: 1200.0,
                firing_rate: 5.5,
            },
            ClusterRecord {
                cluster: 7,
                group: "good".to_string(),
                depth: 800.0,
                firing_rate: 2.1,
            },
        ],
        kept_clusters: vec![3, 7],
        event_count: 4,
    };
    let stim_edges = BinEdges::new(-0.5, 1.0, 0.25).unwrap();
    let resp_edges = BinEdges::new(-1.0, 0.5, 0.25).unwrap();
    let record = assemble(
        &session,
        &loaded,
        &stim_edges,
        &resp_edges,
        &MetadataSource::None,
        probe_stims,
    )
    .unwrap();
    write_summary(&record, results.path(), "summary.json").unwrap();
}

#[test]
fn overview_routine_writes_a_figure() {
    let results = TempDir::new().unwrap();
    write_sample_summary(&results, &[16.0]);

    let registry = RoutineRegistry::with_builtins();
    let report = dispatch(
        &registry,
        results.path(),
        &["summary-overview".to_string()],
    );

    assert!(report.all_succeeded(), "failures: {:?}", report.failed);
    let figure = results.path().join("figures/overview.png");
    assert!(figure.exists());
    assert!(figure.metadata().unwrap().len() > 0);
}

#[test]
fn psth_routine_writes_one_figure_per_cluster() {
    let results = TempDir::new().unwrap();
    write_sample_summary(&results, &[16.0]);

    let registry = RoutineRegistry::with_builtins();
    let report = dispatch(&registry, results.path(), &["condition-psth".to_string()]);

    assert!(report.all_succeeded(), "failures: {:?}", report.failed);
    assert!(results.path().join("figures/psth_cluster_3.png").exists());
    assert!(results.path().join("figures/psth_cluster_7.png").exists());
}

#[test]
fn psth_with_empty_ranking_falls_back_to_tensor_order() {
    let results = TempDir::new().unwrap();
    // No probe stims makes every onset effect undefined, so the
    // ranking comes out empty.
    write_sample_summary(&results, &[]);

    let blob = find_summary(results.path(), "summary.json").unwrap();
    let summary = read_summary(&blob).unwrap();
    assert!(summary.ranked_clusters.is_empty());

    let registry = RoutineRegistry::with_builtins();
    let report = dispatch(&registry, results.path(), &["condition-psth".to_string()]);

    assert!(report.all_succeeded(), "failures: {:?}", report.failed);
    assert!(results.path().join("figures/psth_cluster_3.png").exists());
    assert!(results.path().join("figures/psth_cluster_7.png").exists());
}

#[test]
fn missing_summary_blob_is_a_routine_failure_not_a_crash() {
    let empty = TempDir::new().unwrap();
    let registry = RoutineRegistry::with_builtins();
    let report = dispatch(
        &registry,
        empty.path(),
        &[
            "summary-overview".to_string(),
            "condition-psth".to_string(),
        ],
    );
    assert!(report.succeeded.is_empty());
    assert_eq!(report.failed.len(), 2);
}
