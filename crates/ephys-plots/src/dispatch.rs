//! Sequential dispatch of plotting routines with failure isolation.

use std::path::Path;

use crate::registry::RoutineRegistry;

/// Outcome of one dispatch pass: which routines succeeded and which
/// failed, with the failure rendered for reporting.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchReport {
    /// Names that completed without error, in dispatch order.
    pub succeeded: Vec<String>,
    /// (name, error) pairs for routines that failed or were unknown.
    pub failed: Vec<(String, String)>,
}

impl DispatchReport {
    /// True when every requested routine completed.
    pub fn all_succeeded(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Runs the named routines one at a time, in the given order, against
/// the directory holding the persisted summary blob.
///
/// A routine failure (or an unknown name) is logged with the routine
/// identified and recorded in the report; it never prevents the
/// remaining routines from running. Dispatch itself always completes.
pub fn dispatch(registry: &RoutineRegistry, base: &Path, names: &[String]) -> DispatchReport {
    let mut report = DispatchReport::default();
    for name in names {
        let Some(routine) = registry.get(name) else {
            log::error!(
                "unknown plotting routine '{}', known routines: {:?}",
                name,
                registry.names()
            );
            report
                .failed
                .push((name.clone(), "unknown plotting routine".to_string()));
            continue;
        };
        log::info!("running plotting routine '{}' in {}", name, base.display());
        match routine.run(base) {
            Ok(()) => {
                log::info!("plotting routine '{name}' finished");
                report.succeeded.push(name.clone());
            }
            Err(err) => {
                log::error!("plotting routine '{name}' failed: {err}");
                report.failed.push((name.clone(), err.to_string()));
            }
        }
    }
    report
}
