//! Session overview figure: total stim-aligned spike counts per
//! trial across all clusters.

use std::path::Path;

use ephys_core::{EphysError, ErrorInfo};
use ephys_summary::{find_summary, read_summary, DEFAULT_SUMMARY_SUFFIX};
use plotters::prelude::*;

use crate::routine::{figures_dir, PlottingRoutine};

/// Built-in routine producing a single `overview.png` with one point
/// per trial.
pub struct SummaryOverview {
    suffix: String,
}

impl SummaryOverview {
    /// Routine matching blobs by a non-default suffix pattern.
    pub fn with_suffix(suffix: impl Into<String>) -> Self {
        Self {
            suffix: suffix.into(),
        }
    }
}

impl Default for SummaryOverview {
    fn default() -> Self {
        Self::with_suffix(DEFAULT_SUMMARY_SUFFIX)
    }
}

impl PlottingRoutine for SummaryOverview {
    fn name(&self) -> &'static str {
        "summary-overview"
    }

    fn run(&self, base: &Path) -> Result<(), EphysError> {
        let blob = find_summary(base, &self.suffix)?;
        let summary = read_summary(&blob)?;
        let figures = figures_dir(base)?;

        let trials = summary.stim_tensor.counts.shape()[2];
        let totals: Vec<f64> = (0..trials)
            .map(|trial| {
                summary
                    .stim_tensor
                    .counts
                    .slice(ndarray::s![.., .., trial])
                    .iter()
                    .map(|count| *count as f64)
                    .sum()
            })
            .collect();
        let y_max = totals.iter().cloned().fold(1.0f64, f64::max);

        let out = figures.join("overview.png");
        let root = BitMapBackend::new(&out, (900, 400)).into_drawing_area();
        root.fill(&WHITE).map_err(draw_error)?;
        let mut chart = ChartBuilder::on(&root)
            .margin(20)
            .build_cartesian_2d(0f64..trials.max(1) as f64, 0f64..y_max * 1.1)
            .map_err(draw_error)?;
        chart
            .draw_series(LineSeries::new(
                totals.iter().enumerate().map(|(i, v)| (i as f64, *v)),
                &BLUE,
            ))
            .map_err(draw_error)?;
        root.present().map_err(draw_error)?;

        log::info!(
            "wrote overview figure for {}: {}",
            summary.session().label(),
            out.display()
        );
        Ok(())
    }
}

pub(crate) fn draw_error(err: impl std::fmt::Display) -> EphysError {
    EphysError::Plot(
        ErrorInfo::new("figure-render", "failed to render figure").with_hint(err.to_string()),
    )
}
