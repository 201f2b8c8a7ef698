#![deny(missing_docs)]
//! Summary assembly for the ephys pipeline: spike binning, effect
//! ranking, and blob persistence.

mod assemble;
mod rank;
mod tensor;

pub use assemble::{
    assemble, find_summary, read_summary, write_summary, SummaryRecord, DEFAULT_SUMMARY_SUFFIX,
};
pub use rank::{onset_effects, probe_stims_above, rank_by_effect};
pub use tensor::{bin_spikes, BinnedTensor};
