use serde::{Deserialize, Serialize};

use crate::errors::{EphysError, ErrorInfo};

/// One behavioral trial: the presented stimulus and the two alignment
/// times used for spike binning.
///
/// Trials are kept in chronological order; downstream binning assumes
/// monotonically increasing times.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrialEvent {
    /// Numeric stimulus identifier.
    pub stim: f64,
    /// Stimulus onset time, seconds, session-relative.
    pub stim_time: f64,
    /// Response onset time, seconds, session-relative.
    pub resp_time: f64,
}

/// One detected spike event: the sorted cluster it was attributed to
/// and its time in seconds, session-relative.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpikeEvent {
    /// Sorted cluster id.
    pub cluster: u32,
    /// Spike time, seconds, session-relative.
    pub time: f64,
}

/// One row of sorter output: a cluster and its quality metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterRecord {
    /// Sorted cluster id.
    pub cluster: u32,
    /// Curation label assigned by the sorter (`good`, `mua`, `noise`).
    pub group: String,
    /// Recording depth of the cluster along the probe, micrometers.
    pub depth: f64,
    /// Mean firing rate over the session, Hz.
    pub firing_rate: f64,
}

/// Half-open time-bin edge specification `[start, stop)` with a fixed
/// step, used to histogram spike times around an alignment event.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BinEdges {
    /// First edge, seconds relative to the alignment time.
    pub start: f64,
    /// Upper bound; the last full bin ends at or before this value.
    pub stop: f64,
    /// Bin width, seconds.
    pub step: f64,
}

impl BinEdges {
    /// Validates and creates an edge specification.
    ///
    /// The step must be positive and the span must admit at least one
    /// full bin.
    pub fn new(start: f64, stop: f64, step: f64) -> Result<Self, EphysError> {
        let edges = Self { start, stop, step };
        if !step.is_finite() || step <= 0.0 || !start.is_finite() || !stop.is_finite() {
            return Err(EphysError::Summary(
                ErrorInfo::new("edges-invalid", "bin edges must be finite with a positive step")
                    .with_context("start", start.to_string())
                    .with_context("stop", stop.to_string())
                    .with_context("step", step.to_string()),
            ));
        }
        if edges.num_bins() == 0 {
            return Err(EphysError::Summary(
                ErrorInfo::new("edges-empty", "bin edges span less than one bin")
                    .with_context("start", start.to_string())
                    .with_context("stop", stop.to_string())
                    .with_context("step", step.to_string()),
            ));
        }
        Ok(edges)
    }

    /// Number of complete half-open bins in `[start, stop)`.
    pub fn num_bins(&self) -> usize {
        let span = (self.stop - self.start) / self.step;
        if !span.is_finite() || span < 0.0 {
            return 0;
        }
        // Tolerate representation error when the span is an exact
        // multiple of the step.
        (span + 1e-9).floor() as usize
    }

    /// Edge sequence recorded alongside each tensor, `num_bins + 1`
    /// values.
    pub fn edges(&self) -> Vec<f64> {
        (0..=self.num_bins())
            .map(|i| self.start + i as f64 * self.step)
            .collect()
    }

    /// Bin index for a time relative to the alignment event, or `None`
    /// when the time falls outside `[start, stop)`.
    pub fn bin_index(&self, relative_time: f64) -> Option<usize> {
        if !relative_time.is_finite() || relative_time < self.start {
            return None;
        }
        let bin = ((relative_time - self.start) / self.step).floor() as usize;
        (bin < self.num_bins()).then_some(bin)
    }
}
