use std::path::PathBuf;

use clap::Args;
use ephys_core::EphysError;
use ephys_plots::{dispatch, RoutineRegistry};
use ephys_summary::{find_summary, DEFAULT_SUMMARY_SUFFIX};

#[derive(Args, Debug)]
pub struct PlotArgs {
    /// Directory holding an already-persisted summary blob.
    #[arg(long)]
    pub summary_dir: PathBuf,
    /// File-name suffix the blob is matched by.
    #[arg(long, default_value = DEFAULT_SUMMARY_SUFFIX)]
    pub summary_suffix: String,
    /// Plotting routines to run, in order.
    #[arg(long = "plot-scripts", value_name = "NAME", num_args = 1..)]
    pub plot_scripts: Vec<String>,
}

pub fn run(args: &PlotArgs) -> Result<(), EphysError> {
    // Fail up front when there is nothing to plot against; individual
    // routine failures below stay isolated.
    let blob = find_summary(&args.summary_dir, &args.summary_suffix)?;
    log::info!("dispatching against summary blob: {}", blob.display());

    let registry = RoutineRegistry::matching_suffix(&args.summary_suffix);
    let report = dispatch(&registry, &args.summary_dir, &args.plot_scripts);
    log::info!(
        "plotting finished: {} succeeded, {} failed",
        report.succeeded.len(),
        report.failed.len()
    );
    Ok(())
}
