//! Packing the per-session summary record and persisting it as a
//! single blob.

use std::fs;
use std::path::{Path, PathBuf};

use ephys_core::{
    BinEdges, ClusterRecord, EphysError, ErrorInfo, SessionId, SpikeEvent, TrialEvent,
};
use ephys_session::{LoadedSession, MetadataSource};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::rank::{onset_effects, rank_by_effect};
use crate::tensor::{bin_spikes, BinnedTensor};

/// Default file-name suffix for the persisted summary blob. Plotting
/// routines locate the blob by this suffix pattern.
pub const DEFAULT_SUMMARY_SUFFIX: &str = "summary.json";

/// The single persisted artifact for a session: identity, metadata,
/// the loaded tables, both aligned tensors, and the effect ranking.
///
/// Every key a plotting routine may read is always present, even when
/// empty. Written exactly once per run and immutable afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryRecord {
    /// Experimenter initials.
    pub experimenter: String,
    /// Subject id.
    pub subject: String,
    /// Session date, MMDDYYYY.
    pub date: String,
    /// Free-form session metadata; empty mapping when none supplied.
    #[serde(default)]
    pub session_info: Map<String, Value>,
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
    /// Spike counts aligned to stimulus onset.
    pub stim_tensor: BinnedTensor,
    /// Spike counts aligned to response onset.
    pub resp_tensor: BinnedTensor,
    /// Kept clusters ordered by descending absolute onset effect;
    /// may be empty.
    pub ranked_clusters: Vec<u32>,
}

impl SummaryRecord {
    /// Session identity of the record.
    pub fn session(&self) -> SessionId {
        SessionId::new(&self.experimenter, &self.subject, &self.date)
    }
}

/// Combines loader output, metadata, and the two edge specs into the
/// in-memory summary record.
///
/// Metadata is resolved first, so a malformed-metadata error aborts
/// assembly before anything else happens. The returned record is
/// ready for immediate reuse; persistence is a separate step.
pub fn assemble(
    session: &SessionId,
    loaded: &LoadedSession,
    stim_edges: &BinEdges,
    resp_edges: &BinEdges,
    metadata: &MetadataSource,
    probe_stims: &[f64],
) -> Result<SummaryRecord, EphysError> {
    let session_info = metadata.resolve()?;

    let stim_times: Vec<f64> = loaded.trial_events.iter().map(|e| e.stim_time).collect();
    let resp_times: Vec<f64> = loaded.trial_events.iter().map(|e| e.resp_time).collect();
    let stim_tensor = bin_spikes(&loaded.spikes, &stim_times, stim_edges);
    let resp_tensor = bin_spikes(&loaded.spikes, &resp_times, resp_edges);

    let effects = onset_effects(
        &stim_tensor,
        &loaded.trial_events,
        probe_stims,
        &loaded.kept_clusters,
    );
    let ranked_clusters = rank_by_effect(&loaded.kept_clusters, &effects);
    log::info!(
        "ranked {} of {} kept clusters by onset effect",
        ranked_clusters.len(),
        loaded.kept_clusters.len()
    );

    Ok(SummaryRecord {
        experimenter: session.experimenter.clone(),
        subject: session.subject.clone(),
        date: session.date.clone(),
        session_info,
        trial_events: loaded.trial_events.clone(),
        spikes: loaded.spikes.clone(),
        cluster_info: loaded.cluster_info.clone(),
        kept_clusters: loaded.kept_clusters.clone(),
        event_count: loaded.event_count,
        stim_tensor,
        resp_tensor,
        ranked_clusters,
    })
}

/// Persists the record under the results root at its deterministic
/// path, overwriting any existing blob (no versioning). Returns the
/// written path.
pub fn write_summary(
    record: &SummaryRecord,
    results_root: &Path,
    suffix: &str,
) -> Result<PathBuf, EphysError> {
    fs::create_dir_all(results_root).map_err(|err| {
        EphysError::Summary(
            ErrorInfo::new("summary-dir", "cannot create results directory")
                .with_context("path", results_root.display().to_string())
                .with_hint(err.to_string()),
        )
    })?;
    let path = results_root.join(record.session().blob_file_name(suffix));
    let bytes = serde_json::to_vec(record).map_err(|err| {
        EphysError::Summary(
            ErrorInfo::new("summary-encode", "cannot serialize summary record")
                .with_hint(err.to_string()),
        )
    })?;
    fs::write(&path, bytes).map_err(|err| {
        EphysError::Summary(
            ErrorInfo::new("summary-write", "cannot write summary blob")
                .with_context("path", path.display().to_string())
                .with_hint(err.to_string()),
        )
    })?;
    log::info!("wrote summary blob: {}", path.display());
    Ok(path)
}

/// Reloads a persisted summary blob.
pub fn read_summary(path: &Path) -> Result<SummaryRecord, EphysError> {
    let bytes = fs::read(path).map_err(|err| {
        EphysError::Summary(
            ErrorInfo::new("summary-read", "cannot read summary blob")
                .with_context("path", path.display().to_string())
                .with_hint(err.to_string()),
        )
    })?;
    serde_json::from_slice(&bytes).map_err(|err| {
        EphysError::Summary(
            ErrorInfo::new("summary-decode", "cannot deserialize summary blob")
                .with_context("path", path.display().to_string())
                .with_hint(err.to_string()),
        )
    })
}

/// Locates a summary blob in a directory by its suffix pattern, first
/// sorted match. This is the plot-routine side of the contract: the
/// blob is discoverable from the dispatch base directory alone.
pub fn find_summary(dir: &Path, suffix: &str) -> Result<PathBuf, EphysError> {
    ephys_session::resolve(dir, &format!("*{suffix}"))
}
