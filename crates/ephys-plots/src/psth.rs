//! Per-cluster stim-aligned PSTH figures, rendered in effect-ranked
//! order.

use std::path::Path;

use ephys_core::EphysError;
use ephys_summary::{find_summary, read_summary, BinnedTensor, DEFAULT_SUMMARY_SUFFIX};
use plotters::prelude::*;

use crate::overview::draw_error;
use crate::routine::{figures_dir, PlottingRoutine};

/// Built-in routine producing one `psth_cluster_{id}.png` per ranked
/// cluster, capped to keep batch runs bounded.
pub struct ConditionPsth {
    suffix: String,
    max_clusters: usize,
}

impl ConditionPsth {
    /// Routine matching blobs by a non-default suffix pattern.
    pub fn with_suffix(suffix: impl Into<String>) -> Self {
        Self {
            suffix: suffix.into(),
            max_clusters: 12,
        }
    }
}

impl Default for ConditionPsth {
    fn default() -> Self {
        Self::with_suffix(DEFAULT_SUMMARY_SUFFIX)
    }
}

impl PlottingRoutine for ConditionPsth {
    fn name(&self) -> &'static str {
        "condition-psth"
    }

    fn run(&self, base: &Path) -> Result<(), EphysError> {
        let blob = find_summary(base, &self.suffix)?;
        let summary = read_summary(&blob)?;
        let figures = figures_dir(base)?;

        // An empty ranking is valid; fall back to tensor order so the
        // routine still produces output.
        let order: Vec<u32> = if summary.ranked_clusters.is_empty() {
            summary.stim_tensor.clusters.clone()
        } else {
            summary.ranked_clusters.clone()
        };

        let mut rendered = 0;
        for cluster in order.into_iter().take(self.max_clusters) {
            let Some(row) = summary.stim_tensor.cluster_row(cluster) else {
                log::warn!("ranked cluster {cluster} is absent from the stim tensor, skipping");
                continue;
            };
            let out = figures.join(format!("psth_cluster_{cluster}.png"));
            render_psth(&summary.stim_tensor, row, &out)?;
            rendered += 1;
        }

        log::info!(
            "wrote {} PSTH figures for {} into {}",
            rendered,
            summary.session().label(),
            figures.display()
        );
        Ok(())
    }
}

fn render_psth(tensor: &BinnedTensor, row: usize, out: &Path) -> Result<(), EphysError> {
    let bins = tensor.counts.shape()[1];
    let trials = tensor.counts.shape()[2].max(1) as f64;
    let mean_counts: Vec<f64> = (0..bins)
        .map(|bin| {
            let total: u32 = tensor.counts.slice(ndarray::s![row, bin, ..]).iter().sum();
            total as f64 / trials
        })
        .collect();
    let centers: Vec<f64> = (0..bins)
        .map(|bin| (tensor.edges[bin] + tensor.edges[bin + 1]) / 2.0)
        .collect();

    let x_min = tensor.edges.first().copied().unwrap_or(0.0);
    let x_max = tensor.edges.last().copied().unwrap_or(1.0);
    let y_max = mean_counts.iter().cloned().fold(1e-3f64, f64::max);

    let root = BitMapBackend::new(out, (700, 400)).into_drawing_area();
    root.fill(&WHITE).map_err(draw_error)?;
    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .build_cartesian_2d(x_min..x_max, 0f64..y_max * 1.1)
        .map_err(draw_error)?;
    chart
        .draw_series(LineSeries::new(
            centers.iter().cloned().zip(mean_counts.iter().cloned()),
            &RED,
        ))
        .map_err(draw_error)?;
    root.present().map_err(draw_error)?;
    Ok(())
}
