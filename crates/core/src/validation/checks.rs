//! Synchronous checks over the entry form snapshot.
//!
//! Each rule is a small pure function returning field notes; [`evaluate`]
//! runs every rule that has its inputs filled in. Fields that are still
//! empty are left alone rather than flagged.

use crate::checklist::ChecklistFlags;
use crate::run::{ComponentStatus, ReferenceRunOption, RunSnapshot, RunType, TypeOption};
use crate::types::RunNumber;
use crate::validation::report::{FieldNote, Severity, ValidationReport};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Lowest acceptable run number.
pub const MIN_RUN_NUMBER: RunNumber = 300_000;

/// Highest acceptable run number.
pub const MAX_RUN_NUMBER: RunNumber = 999_999;

/// How far a reference run may trail the certified run before the pairing
/// is flagged as suspicious.
pub const MAX_REFERENCE_DISTANCE: RunNumber = 6_000;

// ---------------------------------------------------------------------------
// Field rules
// ---------------------------------------------------------------------------

/// Check that the run number lies in the certification range.
pub fn check_run_number(run_number: RunNumber) -> FieldNote {
    if run_number < MIN_RUN_NUMBER {
        FieldNote::error(
            "run_number",
            format!("Run number {run_number} is too low, expected at least {MIN_RUN_NUMBER}"),
        )
    } else if run_number > MAX_RUN_NUMBER {
        FieldNote::error(
            "run_number",
            format!("Run number {run_number} is too high, expected at most {MAX_RUN_NUMBER}"),
        )
    } else {
        FieldNote::success("run_number")
    }
}

/// Check that the reference run is plausibly close to the certified run.
///
/// A reference newer than the run, or trailing it by more than
/// [`MAX_REFERENCE_DISTANCE`], is unusual enough to warn about.
pub fn check_reference_proximity(run_number: RunNumber, reference_run: RunNumber) -> FieldNote {
    if reference_run > run_number {
        FieldNote::warning(
            "reference_run",
            format!("Reference run {reference_run} is newer than run {run_number}"),
        )
    } else if run_number - reference_run > MAX_REFERENCE_DISTANCE {
        FieldNote::warning(
            "reference_run",
            format!(
                "Reference run {reference_run} is more than {MAX_REFERENCE_DISTANCE} runs \
                 behind {run_number}"
            ),
        )
    } else {
        FieldNote::success("reference_run")
    }
}

/// Check that the reference run was taken under the same runtype as the
/// selected Type.
pub fn check_reference_compatibility(
    run_type: &TypeOption,
    reference: &ReferenceRunOption,
) -> Option<FieldNote> {
    if run_type.runtype != reference.runtype {
        return Some(FieldNote::error(
            "reference_run",
            format!(
                "Reference run is incompatible with selected Type. ({} != {})",
                run_type.runtype.as_str(),
                reference.runtype.as_str()
            ),
        ));
    }
    None
}

/// Check the integrated luminosity against the runtype.
///
/// Cosmics runs see no collisions and should record 0; collision runs
/// should record something.
pub fn check_luminosity(runtype: RunType, value: f64) -> FieldNote {
    if !value.is_finite() {
        return FieldNote::error(
            "int_luminosity",
            "Integrated luminosity must be a finite number",
        );
    }
    match runtype {
        RunType::Cosmics if value != 0.0 => FieldNote::warning(
            "int_luminosity",
            "Cosmics runs are expected to have an integrated luminosity of 0",
        ),
        RunType::Collisions if value == 0.0 => FieldNote::warning(
            "int_luminosity",
            "Collisions runs are expected to have a non-zero integrated luminosity",
        ),
        _ => FieldNote::success("int_luminosity"),
    }
}

/// Cross-check the tracking verdict against the components it derives from.
///
/// Tracking cannot be good while SiStrip is bad; in collision runs the same
/// holds against Pixel. Cosmics runs ignore Pixel entirely.
pub fn check_component_consistency(
    tracking: Option<ComponentStatus>,
    sistrip: Option<ComponentStatus>,
    pixel: Option<ComponentStatus>,
    runtype: Option<RunType>,
) -> Vec<FieldNote> {
    let mut notes = Vec::new();
    let tracking_good = tracking.is_some_and(|status| status.is_good());
    if !tracking_good {
        return notes;
    }

    if sistrip.is_some_and(|status| status.is_bad()) {
        notes.push(FieldNote::error(
            "tracking",
            "Tracking can not be GOOD if SiStrip is BAD. Please correct.",
        ));
    }
    if runtype == Some(RunType::Collisions) && pixel.is_some_and(|status| status.is_bad()) {
        notes.push(FieldNote::error(
            "tracking",
            "Tracking can not be GOOD if Pixel is BAD. Please correct.",
        ));
    }
    notes
}

/// Check that every certification checklist has been confirmed.
pub fn check_checklists(flags: &ChecklistFlags) -> Option<FieldNote> {
    let unconfirmed = flags.unconfirmed();
    if unconfirmed.is_empty() {
        return None;
    }
    let names: Vec<&str> = unconfirmed.iter().map(|kind| kind.as_str()).collect();
    Some(FieldNote::error(
        "checklists",
        format!("Checklists not confirmed: {}", names.join(", ")),
    ))
}

// ---------------------------------------------------------------------------
// Evaluation
// ---------------------------------------------------------------------------

/// Run every rule whose inputs are filled in and collect the notes.
pub fn evaluate(snapshot: &RunSnapshot) -> ValidationReport {
    let mut report = ValidationReport::default();

    if let Some(run_number) = snapshot.run_number {
        let note = check_run_number(run_number);
        let in_range = note.severity != Severity::Error;
        report.push(note);

        // Proximity is only meaningful once the run number itself is valid.
        if in_range {
            if let Some(reference) = &snapshot.reference_run {
                report.push(check_reference_proximity(run_number, reference.reference_run));
            }
        }
    }

    if let (Some(run_type), Some(reference)) = (&snapshot.run_type, &snapshot.reference_run) {
        if let Some(note) = check_reference_compatibility(run_type, reference) {
            report.push(note);
        }
    }

    if let (Some(runtype), Some(value)) = (snapshot.runtype(), snapshot.int_luminosity) {
        report.push(check_luminosity(runtype, value));
    }

    for note in check_component_consistency(
        snapshot.tracking,
        snapshot.sistrip,
        snapshot.pixel,
        snapshot.runtype(),
    ) {
        report.push(note);
    }

    if let Some(note) = check_checklists(&snapshot.checklists) {
        report.push(note);
    }

    report
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::run::{BeamEnergy, BeamType, Bfield, RecoType};

    fn type_option(runtype: RunType) -> TypeOption {
        TypeOption {
            id: 3,
            reco: RecoType::Express,
            runtype,
            bfield: Bfield::Nominal,
            beamtype: BeamType::ProtonProton,
            beamenergy: BeamEnergy::Tev13,
            dataset: "/Express/Run2018/DQMIO".to_string(),
        }
    }

    fn reference_option(reference_run: RunNumber, runtype: RunType) -> ReferenceRunOption {
        ReferenceRunOption {
            id: 7,
            reference_run,
            reco: RecoType::Express,
            runtype,
            bfield: Bfield::Nominal,
            beamtype: BeamType::ProtonProton,
            beamenergy: BeamEnergy::Tev13,
            dataset: "/Express/Run2018/DQMIO".to_string(),
        }
    }

    fn confirmed_checklists() -> ChecklistFlags {
        ChecklistFlags {
            general: true,
            trackermap: true,
            pixel: true,
            sistrip: true,
            tracking: true,
        }
    }

    // -- check_run_number -----------------------------------------------------

    #[test]
    fn run_number_below_range_is_too_low() {
        let note = check_run_number(299_999);
        assert_eq!(note.severity, Severity::Error);
        assert!(note.message.contains("too low"));
    }

    #[test]
    fn run_number_above_range_is_too_high() {
        let note = check_run_number(1_000_000);
        assert_eq!(note.severity, Severity::Error);
        assert!(note.message.contains("too high"));
    }

    #[test]
    fn run_number_bounds_are_inclusive() {
        assert_eq!(check_run_number(300_000).severity, Severity::Success);
        assert_eq!(check_run_number(999_999).severity, Severity::Success);
    }

    // -- check_reference_proximity --------------------------------------------

    #[test]
    fn reference_in_the_future_warns() {
        let note = check_reference_proximity(500_000, 500_001);
        assert_eq!(note.severity, Severity::Warning);
        assert!(note.message.contains("newer"));
    }

    #[test]
    fn reference_too_far_behind_warns() {
        let note = check_reference_proximity(500_000, 493_999);
        assert_eq!(note.severity, Severity::Warning);
    }

    #[test]
    fn reference_at_distance_boundary_passes() {
        assert_eq!(
            check_reference_proximity(500_000, 494_000).severity,
            Severity::Success
        );
        assert_eq!(
            check_reference_proximity(500_000, 500_000).severity,
            Severity::Success
        );
    }

    // -- check_reference_compatibility ----------------------------------------

    #[test]
    fn mismatched_runtype_is_incompatible() {
        let note = check_reference_compatibility(
            &type_option(RunType::Collisions),
            &reference_option(499_000, RunType::Cosmics),
        )
        .unwrap();
        assert_eq!(note.severity, Severity::Error);
        assert_eq!(
            note.message,
            "Reference run is incompatible with selected Type. (Collisions != Cosmics)"
        );
    }

    #[test]
    fn matching_runtype_is_compatible() {
        assert!(check_reference_compatibility(
            &type_option(RunType::Cosmics),
            &reference_option(499_000, RunType::Cosmics),
        )
        .is_none());
    }

    // -- check_luminosity -----------------------------------------------------

    #[test]
    fn cosmics_with_luminosity_warns() {
        let note = check_luminosity(RunType::Cosmics, 1.2);
        assert_eq!(note.severity, Severity::Warning);
    }

    #[test]
    fn collisions_without_luminosity_warns() {
        let note = check_luminosity(RunType::Collisions, 0.0);
        assert_eq!(note.severity, Severity::Warning);
    }

    #[test]
    fn expected_luminosity_passes() {
        assert_eq!(check_luminosity(RunType::Cosmics, 0.0).severity, Severity::Success);
        assert_eq!(check_luminosity(RunType::Collisions, 2.5).severity, Severity::Success);
    }

    #[test]
    fn non_finite_luminosity_is_an_error() {
        assert_eq!(check_luminosity(RunType::Collisions, f64::NAN).severity, Severity::Error);
    }

    // -- check_component_consistency ------------------------------------------

    #[test]
    fn bad_sistrip_blocks_good_tracking_for_any_runtype() {
        for runtype in [None, Some(RunType::Cosmics), Some(RunType::Collisions)] {
            let notes = check_component_consistency(
                Some(ComponentStatus::Good),
                Some(ComponentStatus::Bad),
                None,
                runtype,
            );
            assert_eq!(notes.len(), 1, "runtype {runtype:?}");
            assert_eq!(
                notes[0].message,
                "Tracking can not be GOOD if SiStrip is BAD. Please correct."
            );
        }
    }

    #[test]
    fn bad_pixel_blocks_good_tracking_only_for_collisions() {
        let collisions = check_component_consistency(
            Some(ComponentStatus::Good),
            Some(ComponentStatus::Good),
            Some(ComponentStatus::Bad),
            Some(RunType::Collisions),
        );
        assert_eq!(collisions.len(), 1);
        assert_eq!(
            collisions[0].message,
            "Tracking can not be GOOD if Pixel is BAD. Please correct."
        );

        let cosmics = check_component_consistency(
            Some(ComponentStatus::Good),
            Some(ComponentStatus::Good),
            Some(ComponentStatus::Bad),
            Some(RunType::Cosmics),
        );
        assert!(cosmics.is_empty());
    }

    #[test]
    fn excluded_and_lowstat_use_the_same_groups() {
        // Lowstat tracking still claims a usable run, Excluded sistrip
        // still denies one.
        let notes = check_component_consistency(
            Some(ComponentStatus::Lowstat),
            Some(ComponentStatus::Excluded),
            None,
            None,
        );
        assert_eq!(notes.len(), 1);
    }

    #[test]
    fn bad_tracking_needs_no_consistency_check() {
        let notes = check_component_consistency(
            Some(ComponentStatus::Bad),
            Some(ComponentStatus::Bad),
            Some(ComponentStatus::Bad),
            Some(RunType::Collisions),
        );
        assert!(notes.is_empty());
    }

    // -- check_checklists -----------------------------------------------------

    #[test]
    fn unconfirmed_checklists_block_submission() {
        let note = check_checklists(&ChecklistFlags::default()).unwrap();
        assert_eq!(note.severity, Severity::Error);
        assert!(note.message.contains("general"));
    }

    #[test]
    fn confirmed_checklists_pass() {
        assert!(check_checklists(&confirmed_checklists()).is_none());
    }

    // -- evaluate -------------------------------------------------------------

    fn valid_snapshot() -> RunSnapshot {
        RunSnapshot {
            run_number: Some(500_000),
            run_type: Some(type_option(RunType::Collisions)),
            reference_run: Some(reference_option(499_000, RunType::Collisions)),
            number_of_ls: Some(120),
            int_luminosity: Some(2.5),
            pixel: Some(ComponentStatus::Good),
            sistrip: Some(ComponentStatus::Good),
            tracking: Some(ComponentStatus::Good),
            checklists: confirmed_checklists(),
            ..RunSnapshot::default()
        }
    }

    #[test]
    fn complete_valid_snapshot_is_submittable() {
        let report = evaluate(&valid_snapshot());
        assert!(!report.is_blocking(), "{:?}", report.notes);
        assert_eq!(report.field_severity("run_number"), Some(Severity::Success));
        assert_eq!(report.field_severity("reference_run"), Some(Severity::Success));
    }

    #[test]
    fn empty_fields_are_not_flagged() {
        let report = evaluate(&RunSnapshot {
            checklists: confirmed_checklists(),
            ..RunSnapshot::default()
        });
        assert!(report.notes.is_empty());
    }

    #[test]
    fn out_of_range_run_number_skips_proximity() {
        let snapshot = RunSnapshot {
            run_number: Some(299_999),
            ..valid_snapshot()
        };
        let report = evaluate(&snapshot);
        assert!(report.is_blocking());
        assert!(report.notes_for("reference_run").all(|n| n.severity != Severity::Warning));
    }

    #[test]
    fn evaluate_collects_cross_field_errors() {
        let snapshot = RunSnapshot {
            sistrip: Some(ComponentStatus::Bad),
            ..valid_snapshot()
        };
        let report = evaluate(&snapshot);
        assert!(report.is_blocking());
        assert_eq!(report.field_severity("tracking"), Some(Severity::Error));
    }

    #[test]
    fn evaluate_blocks_on_unconfirmed_checklists() {
        let snapshot = RunSnapshot {
            checklists: ChecklistFlags::default(),
            ..valid_snapshot()
        };
        let report = evaluate(&snapshot);
        assert!(report.is_blocking());
        assert_eq!(report.field_severity("checklists"), Some(Severity::Error));
    }
}
