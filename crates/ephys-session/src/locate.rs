//! Glob-based resolution of per-session artifact paths.

use std::path::{Path, PathBuf};

use ephys_core::{EphysError, ErrorInfo, SessionId};

/// Glob patterns for each artifact role, resolved relative to the
/// session subdirectory of its root.
///
/// Neural artifacts live under `ANALYSIS_ROOT/SUBJECT/DATE`, behavior
/// artifacts under `DATA_ROOT/SUBJECT/DATE`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternSet {
    /// Trial events table within the session analysis subdir.
    pub trial_events: String,
    /// Adjusted spike times table within the session analysis subdir.
    pub spike_times: String,
    /// Curated cluster info table within the session analysis subdir.
    pub cluster_info: String,
    /// Behavior event times file within the session data subdir.
    pub behavior: String,
}

impl Default for PatternSet {
    fn default() -> Self {
        Self {
            trial_events: "exported/**/trial_events.csv".to_string(),
            spike_times: "exported/**/spike_times.csv".to_string(),
            cluster_info: "curated/**/cluster_info.tsv".to_string(),
            behavior: "behavior/*.txt".to_string(),
        }
    }
}

/// Concrete artifact paths for one session after glob resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionPaths {
    /// Resolved trial events table.
    pub trial_events: PathBuf,
    /// Resolved spike times table.
    pub spike_times: PathBuf,
    /// Resolved cluster info table.
    pub cluster_info: PathBuf,
    /// Resolved behavior event times file.
    pub behavior: PathBuf,
}

impl SessionPaths {
    /// Resolves every artifact role for the session, failing on the
    /// first role with zero matches.
    pub fn resolve(
        session: &SessionId,
        data_root: &Path,
        analysis_root: &Path,
        patterns: &PatternSet,
    ) -> Result<Self, EphysError> {
        let analysis_dir = session.session_dir(analysis_root);
        let data_dir = session.session_dir(data_root);
        Ok(Self {
            trial_events: resolve(&analysis_dir, &patterns.trial_events)?,
            spike_times: resolve(&analysis_dir, &patterns.spike_times)?,
            cluster_info: resolve(&analysis_dir, &patterns.cluster_info)?,
            behavior: resolve(&data_dir, &patterns.behavior)?,
        })
    }
}

/// Resolves one glob pattern under a root directory to a single path.
///
/// Zero matches is a fatal missing-artifact error. Multiple matches
/// are not fatal: the first match in sorted order wins and a warning
/// is logged.
pub fn resolve(root: &Path, pattern: &str) -> Result<PathBuf, EphysError> {
    let full_pattern = root.join(pattern);
    let full_pattern = full_pattern.to_string_lossy();
    let entries = glob::glob(&full_pattern).map_err(|err| {
        EphysError::Locate(
            ErrorInfo::new("pattern-invalid", "artifact glob pattern is not valid")
                .with_context("pattern", pattern)
                .with_context("root", root.display().to_string())
                .with_hint(err.to_string()),
        )
    })?;

    let mut matches: Vec<PathBuf> = entries.filter_map(Result::ok).collect();
    matches.sort();

    match matches.len() {
        0 => Err(EphysError::Locate(
            ErrorInfo::new("artifact-missing", "no files match artifact pattern")
                .with_context("pattern", pattern)
                .with_context("root", root.display().to_string()),
        )),
        1 => Ok(matches.remove(0)),
        n => {
            log::warn!(
                "pattern '{}' under {} matched {} files, using first: {}",
                pattern,
                root.display(),
                n,
                matches[0].display()
            );
            Ok(matches.remove(0))
        }
    }
}
