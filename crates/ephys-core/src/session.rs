use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Unique key for one recording session: experimenter, subject, date.
///
/// Set once from CLI input and immutable for the rest of the run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionId {
    /// Experimenter initials, for example `BH`.
    pub experimenter: String,
    /// Mouse/subject id, for example `AS20`.
    pub subject: String,
    /// Session date as recorded by the rig, MMDDYYYY.
    pub date: String,
}

impl SessionId {
    /// Creates a session identity from its three string components.
    pub fn new(
        experimenter: impl Into<String>,
        subject: impl Into<String>,
        date: impl Into<String>,
    ) -> Self {
        Self {
            experimenter: experimenter.into(),
            subject: subject.into(),
            date: date.into(),
        }
    }

    /// Deterministic file name for the persisted summary blob,
    /// `{experimenter}_{subject}_{date}_{suffix}`.
    pub fn blob_file_name(&self, suffix: &str) -> String {
        format!("{}_{}_{}_{}", self.experimenter, self.subject, self.date, suffix)
    }

    /// Session subdirectory under a data or analysis root,
    /// `ROOT/SUBJECT/DATE`.
    pub fn session_dir(&self, root: &Path) -> PathBuf {
        root.join(&self.subject).join(&self.date)
    }

    /// Short human readable label used in figure titles and logs.
    pub fn label(&self) -> String {
        format!("{}-{}", self.subject, self.date)
    }
}
