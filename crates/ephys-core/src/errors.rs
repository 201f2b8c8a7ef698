//! Structured error types shared across the pipeline crates.

use std::collections::BTreeMap;
use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structured payload attached to every [`EphysError`] variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Stable machine readable error code.
    pub code: String,
    /// Human readable diagnostic message.
    pub message: String,
    /// Contextual key value pairs (paths, patterns, identifiers).
    #[serde(default)]
    pub context: BTreeMap<String, String>,
    /// Optional hint that may help the operator resolve the issue.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ErrorInfo {
    /// Creates a new error payload with the provided code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            context: BTreeMap::new(),
            hint: None,
        }
    }

    /// Adds a context entry to the payload.
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    /// Sets a human readable hint for remediation.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

/// Canonical error type for the session-summary pipeline.
///
/// Locate, Loader, Metadata and Summary errors are fatal and abort the
/// run. Plot errors come from individual plotting routines and are
/// isolated by the dispatcher rather than escalated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "family", content = "detail")]
pub enum EphysError {
    /// Artifact path resolution errors (missing file, bad pattern).
    #[error("locate error: {0}")]
    Locate(ErrorInfo),
    /// Session loader errors (unreadable or malformed input tables).
    #[error("loader error: {0}")]
    Loader(ErrorInfo),
    /// Malformed session metadata errors.
    #[error("metadata error: {0}")]
    Metadata(ErrorInfo),
    /// Summary assembly and persistence errors.
    #[error("summary error: {0}")]
    Summary(ErrorInfo),
    /// Plotting routine errors.
    #[error("plot error: {0}")]
    Plot(ErrorInfo),
}

impl Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code: {})", self.message, self.code)?;
        if !self.context.is_empty() {
            write!(f, " | context: [")?;
            for (idx, (key, value)) in self.context.iter().enumerate() {
                if idx > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{key}={value}")?;
            }
            write!(f, "]")?;
        }
        if let Some(hint) = &self.hint {
            write!(f, " | hint: {hint}")?;
        }
        Ok(())
    }
}

impl EphysError {
    /// Returns a reference to the payload describing the error.
    pub fn info(&self) -> &ErrorInfo {
        match self {
            EphysError::Locate(info)
            | EphysError::Loader(info)
            | EphysError::Metadata(info)
            | EphysError::Summary(info)
            | EphysError::Plot(info) => info,
        }
    }
}
