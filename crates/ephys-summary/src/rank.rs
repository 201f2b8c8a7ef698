//! Effect-size ranking of kept clusters.

use ephys_core::TrialEvent;

use crate::tensor::BinnedTensor;

/// Orders cluster ids by descending absolute effect magnitude.
///
/// Entries with an undefined (NaN) effect are dropped. An empty
/// result is valid; plotting routines fall back to tensor order.
pub fn rank_by_effect(ids: &[u32], effects: &[f64]) -> Vec<u32> {
    let mut ranked: Vec<(u32, f64)> = ids
        .iter()
        .zip(effects.iter())
        .filter(|(_, effect)| !effect.is_nan())
        .map(|(id, effect)| (*id, effect.abs()))
        .collect();
    ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    ranked.into_iter().map(|(id, _)| id).collect()
}

/// Stim values treated as probe stims when none are given explicitly:
/// every unique value strictly above the threshold.
pub fn probe_stims_above(trial_events: &[TrialEvent], threshold: f64) -> Vec<f64> {
    let mut stims: Vec<f64> = trial_events
        .iter()
        .map(|event| event.stim)
        .filter(|stim| *stim > threshold)
        .collect();
    stims.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    stims.dedup();
    stims
}

/// Signed onset effect per requested cluster id: a d-prime style
/// contrast of total stim-aligned spike counts between probe and
/// non-probe trials.
///
/// Ids missing from the tensor, trials all on one side of the split,
/// or a degenerate (zero) pooled spread all yield NaN, which the
/// ranking then drops.
pub fn onset_effects(
    tensor: &BinnedTensor,
    trial_events: &[TrialEvent],
    probe_stims: &[f64],
    ids: &[u32],
) -> Vec<f64> {
    let is_probe: Vec<bool> = trial_events
        .iter()
        .map(|event| probe_stims.iter().any(|probe| (probe - event.stim).abs() < 1e-9))
        .collect();

    ids.iter()
        .map(|id| match tensor.cluster_row(*id) {
            Some(row) => effect_for_row(tensor, row, &is_probe),
            None => f64::NAN,
        })
        .collect()
}

fn effect_for_row(tensor: &BinnedTensor, row: usize, is_probe: &[bool]) -> f64 {
    let trials = tensor.counts.shape()[2];
    let mut probe = Vec::new();
    let mut other = Vec::new();
    for trial in 0..trials.min(is_probe.len()) {
        let total: u32 = tensor
            .counts
            .slice(ndarray::s![row, .., trial])
            .iter()
            .sum();
        if is_probe[trial] {
            probe.push(total as f64);
        } else {
            other.push(total as f64);
        }
    }
    if probe.is_empty() || other.is_empty() {
        return f64::NAN;
    }
    let (mean_p, var_p) = mean_var(&probe);
    let (mean_o, var_o) = mean_var(&other);
    let pooled = ((var_p + var_o) / 2.0).sqrt();
    if pooled == 0.0 {
        return f64::NAN;
    }
    (mean_p - mean_o) / pooled
}

fn mean_var(values: &[f64]) -> (f64, f64) {
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let var = values.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / n;
    (mean, var)
}
