#![deny(missing_docs)]
//! Artifact location and session loading for the ephys pipeline.

mod loader;
mod locate;
mod metadata;

pub use loader::{FlatFileLoader, LoadedSession, SessionLoader};
pub use locate::{resolve, PatternSet, SessionPaths};
pub use metadata::MetadataSource;
