//! Free-form session metadata supplied at the CLI boundary.

use std::fs;
use std::path::PathBuf;

use ephys_core::{EphysError, ErrorInfo};
use serde_json::{Map, Value};

/// Where the optional session metadata comes from.
///
/// The variant is chosen explicitly at the CLI boundary (separate
/// flags for file and inline input) instead of probing the filesystem
/// to guess what a bare string means.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum MetadataSource {
    /// No metadata supplied; resolves to an empty mapping so that
    /// consumers never have to distinguish absent from empty.
    #[default]
    None,
    /// Metadata mapping already in memory.
    Inline(Map<String, Value>),
    /// Path to a JSON file holding the metadata mapping.
    FromFile(PathBuf),
    /// Raw JSON text holding the metadata mapping.
    FromText(String),
}

impl MetadataSource {
    /// Resolves the source to a concrete mapping.
    ///
    /// A missing file, unreadable file, unparseable text, or a JSON
    /// value that is not an object is a fatal malformed-metadata
    /// error.
    pub fn resolve(&self) -> Result<Map<String, Value>, EphysError> {
        match self {
            MetadataSource::None => Ok(Map::new()),
            MetadataSource::Inline(map) => Ok(map.clone()),
            MetadataSource::FromFile(path) => {
                let text = fs::read_to_string(path).map_err(|err| {
                    EphysError::Metadata(
                        ErrorInfo::new("metadata-file", "cannot read session metadata file")
                            .with_context("path", path.display().to_string())
                            .with_hint(err.to_string()),
                    )
                })?;
                parse_object(&text)
            }
            MetadataSource::FromText(text) => parse_object(text),
        }
    }
}

fn parse_object(text: &str) -> Result<Map<String, Value>, EphysError> {
    let value: Value = serde_json::from_str(text).map_err(|err| {
        EphysError::Metadata(
            ErrorInfo::new("metadata-parse", "session metadata is not valid JSON")
                .with_hint(err.to_string()),
        )
    })?;
    match value {
        Value::Object(map) => Ok(map),
        other => Err(EphysError::Metadata(
            ErrorInfo::new("metadata-not-object", "session metadata must be a JSON object")
                .with_context("found", json_kind(&other)),
        )),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
