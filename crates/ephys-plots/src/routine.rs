//! The plugin boundary for per-session plotting.

use std::fs;
use std::path::{Path, PathBuf};

use ephys_core::{EphysError, ErrorInfo};

/// A named plotting routine invoked after the summary blob has been
/// persisted.
///
/// Routines receive only the base directory containing the blob.
/// They must locate and load the blob themselves (by suffix pattern)
/// and write any figures under `base/figures`. Passing the base
/// explicitly keeps concurrent dispatches from sharing any
/// process-wide working directory.
pub trait PlottingRoutine {
    /// Stable name the routine is registered and requested under.
    fn name(&self) -> &'static str;

    /// Runs the routine against the given base directory.
    fn run(&self, base: &Path) -> Result<(), EphysError>;
}

/// Returns `base/figures`, creating it on demand.
pub fn figures_dir(base: &Path) -> Result<PathBuf, EphysError> {
    let dir = base.join("figures");
    fs::create_dir_all(&dir).map_err(|err| {
        EphysError::Plot(
            ErrorInfo::new("figures-dir", "cannot create figures directory")
                .with_context("path", dir.display().to_string())
                .with_hint(err.to_string()),
        )
    })?;
    Ok(dir)
}
