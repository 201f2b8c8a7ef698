#![deny(missing_docs)]
//! Plotting routine registry and dispatcher for the ephys pipeline.

mod dispatch;
mod overview;
mod psth;
mod registry;
mod routine;

pub use dispatch::{dispatch, DispatchReport};
pub use overview::SummaryOverview;
pub use psth::ConditionPsth;
pub use registry::RoutineRegistry;
pub use routine::{figures_dir, PlottingRoutine};
