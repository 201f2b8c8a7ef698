//! Name-to-routine registry populated at startup.

use std::collections::BTreeMap;

use crate::overview::SummaryOverview;
use crate::psth::ConditionPsth;
use crate::routine::PlottingRoutine;

/// Maps routine names to boxed implementations.
///
/// The dispatcher resolves requested names against this map, so new
/// routines are added by registration alone.
#[derive(Default)]
pub struct RoutineRegistry {
    routines: BTreeMap<String, Box<dyn PlottingRoutine>>,
}

impl RoutineRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding the built-in routines, matching
    /// blobs by the default suffix.
    pub fn with_builtins() -> Self {
        Self::matching_suffix(ephys_summary::DEFAULT_SUMMARY_SUFFIX)
    }

    /// Creates a registry holding the built-in routines, matching
    /// blobs by a custom suffix.
    pub fn matching_suffix(suffix: &str) -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(SummaryOverview::with_suffix(suffix)));
        registry.register(Box::new(ConditionPsth::with_suffix(suffix)));
        registry
    }

    /// Registers a routine under its own name, replacing any previous
    /// routine with that name.
    pub fn register(&mut self, routine: Box<dyn PlottingRoutine>) {
        self.routines.insert(routine.name().to_string(), routine);
    }

    /// Looks up a routine by name.
    pub fn get(&self, name: &str) -> Option<&dyn PlottingRoutine> {
        self.routines.get(name).map(|routine| routine.as_ref())
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> Vec<&str> {
        self.routines.keys().map(|name| name.as_str()).collect()
    }
}
