use std::path::PathBuf;

use clap::Args;
use ephys_core::{BinEdges, SessionId};
use ephys_plots::{dispatch, RoutineRegistry};
use ephys_session::{
    FlatFileLoader, MetadataSource, PatternSet, SessionLoader, SessionPaths,
};
use ephys_summary::{assemble, probe_stims_above, write_summary, DEFAULT_SUMMARY_SUFFIX};

#[derive(Args, Debug)]
pub struct ProcessArgs {
    /// Experimenter initials, for example 'BH'.
    #[arg(long, short = 'e')]
    pub experimenter: String,
    /// Mouse/subject id, for example 'AS20'.
    #[arg(long, short = 'i')]
    pub subject: String,
    /// Session date, MMDDYYYY, for example '03112025'.
    #[arg(long, short = 's')]
    pub date: String,
    /// Where to find and read input data files.
    #[arg(long, short = 'd', default_value = "/data")]
    pub data_root: PathBuf,
    /// Where to find and read input analysis products.
    #[arg(long, short = 'a', default_value = "/analysis")]
    pub analysis_root: PathBuf,
    /// Where to write output result files.
    #[arg(long, short = 'r', default_value = "/results")]
    pub results_root: PathBuf,
    /// Session metadata as inline JSON (conflicts with the file flag).
    #[arg(long, conflicts_with = "session_metadata_file")]
    pub session_metadata: Option<String>,
    /// Session metadata as a path to a JSON file.
    #[arg(long)]
    pub session_metadata_file: Option<PathBuf>,
    /// 'true' or 'false', whether to widen quality filtering for the
    /// interneuron search. App panels only pass explicit values, so
    /// this takes a truthy word rather than acting as a flag.
    #[arg(long, short = 'I', value_parser = parse_truthy, default_value = "false")]
    pub interneuron_search: bool,
    /// Trial stim values to treat as probe stims. Default is every
    /// unique stim value above 14.0.
    #[arg(long = "probe-stims", short = 'p', value_name = "STIM", num_args = 0..)]
    pub probe_stims: Vec<f64>,
    /// Glob pattern to locate the trial events table within the
    /// session analysis subdir: ANALYSIS_ROOT/SUBJECT/DATE.
    #[arg(long, short = 'E', default_value = "exported/**/trial_events.csv")]
    pub trial_events_pattern: String,
    /// Glob pattern to locate the adjusted spike times table within
    /// the session analysis subdir.
    #[arg(long, short = 'S', default_value = "exported/**/spike_times.csv")]
    pub spike_times_pattern: String,
    /// Glob pattern to locate the curated cluster info table within
    /// the session analysis subdir.
    #[arg(long, short = 'C', default_value = "curated/**/cluster_info.tsv")]
    pub cluster_info_pattern: String,
    /// Glob pattern to locate the behavior event times file within
    /// the session data subdir: DATA_ROOT/SUBJECT/DATE.
    #[arg(long, short = 'T', default_value = "behavior/*.txt")]
    pub behavior_pattern: String,
    /// Stim-aligned bin edges as 'start,stop,step' in seconds.
    #[arg(long, value_parser = parse_edges, allow_hyphen_values = true,
          default_value = "-1.0,3.0,0.05")]
    pub stim_edges: BinEdges,
    /// Response-aligned bin edges as 'start,stop,step' in seconds.
    #[arg(long, value_parser = parse_edges, allow_hyphen_values = true,
          default_value = "-2.0,2.0,0.05")]
    pub resp_edges: BinEdges,
    /// File-name suffix for the persisted summary blob.
    #[arg(long, default_value = DEFAULT_SUMMARY_SUFFIX)]
    pub summary_suffix: String,
    /// Plotting routines to run after the summary is written, in
    /// order.
    #[arg(long = "plot-scripts", value_name = "NAME", num_args = 0..,
          default_values_t = vec!["summary-overview".to_string()])]
    pub plot_scripts: Vec<String>,
}

/// Parse a string argument value into a boolean.
///
/// Operator panels pass explicit values like "--option true" rather
/// than bare flags, and `bool("false")` style parsing is a trap, so
/// accept a small set of truthy words and treat everything else as
/// false.
fn parse_truthy(value: &str) -> Result<bool, String> {
    let truthy = ["true", "t", "yes", "y", "1"];
    Ok(truthy.contains(&value.to_ascii_lowercase().as_str()))
}

/// Parse a 'start,stop,step' triple into validated bin edges.
fn parse_edges(value: &str) -> Result<BinEdges, String> {
    let parts: Vec<&str> = value.split(',').map(str::trim).collect();
    if parts.len() != 3 {
        return Err(format!("expected 'start,stop,step', got '{value}'"));
    }
    let mut numbers = [0.0f64; 3];
    for (slot, part) in numbers.iter_mut().zip(&parts) {
        *slot = part
            .parse::<f64>()
            .map_err(|err| format!("bad edge value '{part}': {err}"))?;
    }
    BinEdges::new(numbers[0], numbers[1], numbers[2]).map_err(|err| err.to_string())
}

pub fn run(args: &ProcessArgs) -> Result<(), ephys_core::EphysError> {
    let session = SessionId::new(&args.experimenter, &args.subject, &args.date);
    log::info!("processing session {}", session.label());

    let patterns = PatternSet {
        trial_events: args.trial_events_pattern.clone(),
        spike_times: args.spike_times_pattern.clone(),
        cluster_info: args.cluster_info_pattern.clone(),
        behavior: args.behavior_pattern.clone(),
    };
    let paths = SessionPaths::resolve(&session, &args.data_root, &args.analysis_root, &patterns)?;
    let loaded = FlatFileLoader.load(&paths, args.interneuron_search)?;

    let metadata = match (&args.session_metadata, &args.session_metadata_file) {
        (Some(text), _) => MetadataSource::FromText(text.clone()),
        (None, Some(path)) => MetadataSource::FromFile(path.clone()),
        (None, None) => MetadataSource::None,
    };
    let probe_stims = if args.probe_stims.is_empty() {
        probe_stims_above(&loaded.trial_events, 14.0)
    } else {
        args.probe_stims.clone()
    };

    let record = assemble(
        &session,
        &loaded,
        &args.stim_edges,
        &args.resp_edges,
        &metadata,
        &probe_stims,
    )?;
    write_summary(&record, &args.results_root, &args.summary_suffix)?;

    let registry = RoutineRegistry::matching_suffix(&args.summary_suffix);
    let report = dispatch(&registry, &args.results_root, &args.plot_scripts);
    log::info!(
        "plotting finished: {} succeeded, {} failed",
        report.succeeded.len(),
        report.failed.len()
    );

    Ok(())
}
