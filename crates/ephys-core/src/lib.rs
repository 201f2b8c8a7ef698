#![deny(missing_docs)]
#![doc = "Core types and errors for the ephys session-summary pipeline."]

pub mod errors;
mod session;
mod tables;

pub use errors::{EphysError, ErrorInfo};
pub use session::SessionId;
pub use tables::{BinEdges, ClusterRecord, SpikeEvent, TrialEvent};
