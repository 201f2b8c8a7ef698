//! Session loading: turning resolved artifact paths into the lab's
//! standard tables.

use std::fs;
use std::path::Path;

use ephys_core::{ClusterRecord, EphysError, ErrorInfo, SpikeEvent, TrialEvent};
use serde::Deserialize;

use crate::locate::SessionPaths;

/// Everything the loader produces for one session.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedSession {
    /// Behavioral trial records, chronological order.
    pub trial_events: Vec<TrialEvent>,
    /// Sorted spike events, all clusters interleaved.
    pub spikes: Vec<SpikeEvent>,
    /// One row per sorted cluster with quality metrics.
    pub cluster_info: Vec<ClusterRecord>,
    /// Cluster ids that passed quality filtering.
    pub kept_clusters: Vec<u32>,
    /// Number of behavioral event times recorded by the rig.
    pub event_count: usize,
}

/// Contract for producing the standard session tables from resolved
/// artifact paths.
///
/// The pipeline only depends on this shape; where the tables come from
/// (flat files, an acquisition database, a remote store) is up to the
/// implementation.
pub trait SessionLoader {
    /// Loads the session tables. The `interneuron_search` toggle
    /// widens quality filtering to include multi-unit clusters.
    fn load(
        &self,
        paths: &SessionPaths,
        interneuron_search: bool,
    ) -> Result<LoadedSession, EphysError>;
}

/// Reference loader reading the lab's exported delimited text files.
#[derive(Debug, Default, Clone, Copy)]
pub struct FlatFileLoader;

#[derive(Debug, Deserialize)]
struct ClusterRow {
    cluster_id: u32,
    group: String,
    depth: f64,
    fr: f64,
}

impl SessionLoader for FlatFileLoader {
    fn load(
        &self,
        paths: &SessionPaths,
        interneuron_search: bool,
    ) -> Result<LoadedSession, EphysError> {
        let trial_events = read_trial_events(&paths.trial_events)?;
        let spikes = read_spikes(&paths.spike_times)?;
        let cluster_info = read_cluster_info(&paths.cluster_info)?;
        let event_count = read_event_count(&paths.behavior)?;

        let kept_clusters: Vec<u32> = cluster_info
            .iter()
            .filter(|record| {
                record.group == "good" || (interneuron_search && record.group == "mua")
            })
            .map(|record| record.cluster)
            .collect();

        if event_count != trial_events.len() {
            log::warn!(
                "behavior file has {} event times but {} trials were loaded",
                event_count,
                trial_events.len()
            );
        }
        log::info!(
            "loaded session: {} trials, {} spikes, {} clusters ({} kept)",
            trial_events.len(),
            spikes.len(),
            cluster_info.len(),
            kept_clusters.len()
        );

        Ok(LoadedSession {
            trial_events,
            spikes,
            cluster_info,
            kept_clusters,
            event_count,
        })
    }
}

fn read_trial_events(path: &Path) -> Result<Vec<TrialEvent>, EphysError> {
    let mut reader = csv::Reader::from_path(path).map_err(|err| read_error(path, err))?;
    let mut events = Vec::new();
    for row in reader.deserialize() {
        let event: TrialEvent = row.map_err(|err| parse_error(path, err))?;
        events.push(event);
    }
    Ok(events)
}

fn read_spikes(path: &Path) -> Result<Vec<SpikeEvent>, EphysError> {
    let mut reader = csv::Reader::from_path(path).map_err(|err| read_error(path, err))?;
    let mut spikes = Vec::new();
    for row in reader.deserialize() {
        let spike: SpikeEvent = row.map_err(|err| parse_error(path, err))?;
        spikes.push(spike);
    }
    Ok(spikes)
}

fn read_cluster_info(path: &Path) -> Result<Vec<ClusterRecord>, EphysError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .from_path(path)
        .map_err(|err| read_error(path, err))?;
    let mut records = Vec::new();
    for row in reader.deserialize() {
        let row: ClusterRow = row.map_err(|err| parse_error(path, err))?;
        records.push(ClusterRecord {
            cluster: row.cluster_id,
            group: row.group,
            depth: row.depth,
            firing_rate: row.fr,
        });
    }
    Ok(records)
}

/// The behavior file holds one event time per line; only the count is
/// carried into the summary.
fn read_event_count(path: &Path) -> Result<usize, EphysError> {
    let contents = fs::read_to_string(path).map_err(|err| read_error(path, err))?;
    let mut count = 0;
    for (line_no, line) in contents.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        line.parse::<f64>().map_err(|err| {
            EphysError::Loader(
                ErrorInfo::new("parse-failed", "behavior file line is not a number")
                    .with_context("path", path.display().to_string())
                    .with_context("line", (line_no + 1).to_string())
                    .with_hint(err.to_string()),
            )
        })?;
        count += 1;
    }
    Ok(count)
}

fn read_error(path: &Path, err: impl std::fmt::Display) -> EphysError {
    EphysError::Loader(
        ErrorInfo::new("read-failed", "cannot read session artifact")
            .with_context("path", path.display().to_string())
            .with_hint(err.to_string()),
    )
}

fn parse_error(path: &Path, err: impl std::fmt::Display) -> EphysError {
    EphysError::Loader(
        ErrorInfo::new("parse-failed", "cannot parse session artifact row")
            .with_context("path", path.display().to_string())
            .with_hint(err.to_string()),
    )
}
