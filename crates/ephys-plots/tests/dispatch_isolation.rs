use std::fs;
use std::path::Path;

use ephys_core::{EphysError, ErrorInfo};
use ephys_plots::{dispatch, figures_dir, PlottingRoutine, RoutineRegistry};
use tempfile::TempDir;

struct AlwaysFails;

impl PlottingRoutine for AlwaysFails {
    fn name(&self) -> &'static str {
        "always-fails"
    }

    fn run(&self, _base: &Path) -> Result<(), EphysError> {
        Err(EphysError::Plot(ErrorInfo::new(
            "figure-render",
            "synthetic failure",
        )))
    }
}

struct WritesMarker;

impl PlottingRoutine for WritesMarker {
    fn name(&self) -> &'static str {
        "writes-marker"
    }

    fn run(&self, base: &Path) -> Result<(), EphysError> {
        let figures = figures_dir(base)?;
        fs::write(figures.join("marker.png"), b"png").map_err(|err| {
            EphysError::Plot(
                ErrorInfo::new("figure-write", "cannot write marker").with_hint(err.to_string()),
            )
        })
    }
}

fn test_registry() -> RoutineRegistry {
    let mut registry = RoutineRegistry::new();
    registry.register(Box::new(AlwaysFails));
    registry.register(Box::new(WritesMarker));
    registry
}

#[test]
fn one_failure_does_not_stop_the_rest() {
    let base = TempDir::new().unwrap();
    let names = vec!["always-fails".to_string(), "writes-marker".to_string()];

    let report = dispatch(&test_registry(), base.path(), &names);

    assert_eq!(report.succeeded, vec!["writes-marker".to_string()]);
    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].0, "always-fails");
    assert!(report.failed[0].1.contains("synthetic failure"));
    assert!(base.path().join("figures/marker.png").exists());
}

#[test]
fn unknown_names_are_reported_and_skipped() {
    let base = TempDir::new().unwrap();
    let names = vec!["no-such-routine".to_string(), "writes-marker".to_string()];

    let report = dispatch(&test_registry(), base.path(), &names);

    assert_eq!(report.succeeded, vec!["writes-marker".to_string()]);
    assert_eq!(report.failed[0].0, "no-such-routine");
    assert!(!report.all_succeeded());
}

#[test]
fn routines_run_in_request_order() {
    let base = TempDir::new().unwrap();
    let names = vec![
        "writes-marker".to_string(),
        "always-fails".to_string(),
        "writes-marker".to_string(),
    ];

    let report = dispatch(&test_registry(), base.path(), &names);
    assert_eq!(report.succeeded.len(), 2);
    assert_eq!(report.failed.len(), 1);
}

#[test]
fn empty_request_list_is_a_clean_noop() {
    let base = TempDir::new().unwrap();
    let report = dispatch(&test_registry(), base.path(), &[]);
    assert!(report.all_succeeded());
    assert!(report.succeeded.is_empty());
}

#[test]
fn registry_lists_builtins() {
    let registry = RoutineRegistry::with_builtins();
    assert_eq!(registry.names(), vec!["condition-psth", "summary-overview"]);
    assert!(registry.get("summary-overview").is_some());
}
