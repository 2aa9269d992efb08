// Multi-field business validation for one side's setting
use crate::domain::setting::{Cycle, InputField, UserInputsDraft};
use crate::domain::validation::{FieldError, PfOmRule};

const REQUIRED: &str = "is required (provide Kpa or InHg)";

/// Collects every rule violation for one side; never stops at the first one.
///
/// `side` is the request prefix (`"left"` or `"right"`). Presence is checked
/// first: if any field is missing only the "required" errors are returned.
pub fn validate_user_inputs(
    side: &str,
    inputs: &UserInputsDraft,
    pf_om_rule: PfOmRule,
) -> Vec<FieldError> {
    let path = |field: InputField| format!("{}.inputs.{}", side, field.as_str());

    let Some(v) = inputs.complete() else {
        return inputs
            .fields()
            .into_iter()
            .filter(|(_, value)| value.is_none())
            .map(|(field, _)| FieldError::new(path(field), REQUIRED))
            .collect();
    };

    let non_finite: Vec<FieldError> = inputs
        .fields()
        .into_iter()
        .filter(|(_, value)| value.is_some_and(|x| !x.is_finite()))
        .map(|(field, _)| FieldError::new(path(field), "must be a finite number"))
        .collect();
    if !non_finite.is_empty() {
        return non_finite;
    }

    let mut errs = Vec::new();

    // Request-level bounds
    if v.om_duration_sec < 0.0 {
        errs.push(FieldError::new(path(InputField::OmDurationSec), "must be >= 0"));
    }
    if v.frequency_bpm <= 0.0 {
        errs.push(FieldError::new(path(InputField::FrequencyBpm), "must be > 0"));
    }
    if v.phase_a_ms <= 0.0 {
        errs.push(FieldError::new(path(InputField::PhaseAMs), "must be > 0"));
    }
    if v.phase_c_ms <= 0.0 {
        errs.push(FieldError::new(path(InputField::PhaseCMs), "must be > 0"));
    }

    // Milking vacuum
    if v.pf_vacuum_kpa > v.milking_vacuum_max_kpa {
        errs.push(FieldError::new(
            path(InputField::PfVacuumKpa),
            "must be <= milkingVacuumMaxKpa",
        ));
    }
    if v.om_vacuum_kpa > v.milking_vacuum_max_kpa {
        errs.push(FieldError::new(
            path(InputField::OmVacuumKpa),
            "must be <= milkingVacuumMaxKpa",
        ));
    }
    if v.milking_vacuum_max_kpa <= 0.0 {
        errs.push(FieldError::new(
            path(InputField::MilkingVacuumMaxKpa),
            "must be > 0",
        ));
    }
    if v.pf_vacuum_kpa < v.om_vacuum_kpa {
        let reason = "should be >= omVacuumKpa";
        match pf_om_rule {
            PfOmRule::Enforce => errs.push(FieldError::new(path(InputField::PfVacuumKpa), reason)),
            PfOmRule::Warn => errs.push(FieldError::advisory(path(InputField::PfVacuumKpa), reason)),
            PfOmRule::Off => {}
        }
    }

    if v.ratio_pct <= 0.0 || v.ratio_pct >= 100.0 {
        errs.push(FieldError::new(
            path(InputField::RatioPct),
            "must be between 0 and 100",
        ));
    }

    // Phase durations only make sense for a positive period
    if v.frequency_bpm > 0.0 {
        let cycle = Cycle::new(v.frequency_bpm, v.ratio_pct);

        if ![cycle.t_ms, cycle.on_ms, cycle.off_ms].iter().all(|ms| ms.is_finite()) {
            errs.push(FieldError::new(
                path(InputField::FrequencyBpm),
                "frequencyBpm results in a non-finite cycle period",
            ));
            return errs;
        }

        if cycle.on_ms <= 0.0 {
            errs.push(FieldError::new(
                path(InputField::RatioPct),
                "ratioPct results in ON_ms <= 0",
            ));
        }
        if cycle.off_ms <= 0.0 {
            errs.push(FieldError::new(
                path(InputField::RatioPct),
                "ratioPct results in OFF_ms <= 0",
            ));
        }

        if cycle.on_ms - v.phase_a_ms < 0.0 {
            errs.push(FieldError::new(
                path(InputField::PhaseAMs),
                "phaseAMs cannot exceed ON_ms (ratioPct/frequencyBpm combination)",
            ));
        }
        if cycle.off_ms - v.phase_c_ms < 0.0 {
            errs.push(FieldError::new(
                path(InputField::PhaseCMs),
                "phaseCMs cannot exceed OFF_ms (ratioPct/frequencyBpm combination)",
            ));
        }
    }

    errs
}

/// Validates both sides and reports their issues together, left first.
pub fn validate_compare_request(
    left: &UserInputsDraft,
    right: &UserInputsDraft,
    pf_om_rule: PfOmRule,
) -> Vec<FieldError> {
    let mut errs = validate_user_inputs("left", left, pf_om_rule);
    errs.extend(validate_user_inputs("right", right, pf_om_rule));
    errs
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference_inputs() -> UserInputsDraft {
        UserInputsDraft {
            milking_vacuum_max_kpa: Some(42.0),
            pf_vacuum_kpa: Some(38.0),
            om_vacuum_kpa: Some(30.0),
            om_duration_sec: Some(10.0),
            frequency_bpm: Some(60.0),
            ratio_pct: Some(60.0),
            phase_a_ms: Some(150.0),
            phase_c_ms: Some(150.0),
        }
    }

    fn paths(errs: &[FieldError]) -> Vec<&str> {
        errs.iter().map(|e| e.path.as_str()).collect()
    }

    #[test]
    fn test_reference_inputs_are_valid() {
        let errs = validate_user_inputs("left", &reference_inputs(), PfOmRule::Enforce);
        assert!(errs.is_empty(), "unexpected errors: {:?}", errs);
    }

    #[test]
    fn test_missing_fields_short_circuit() {
        let inputs = UserInputsDraft {
            pf_vacuum_kpa: None,
            phase_c_ms: None,
            // would otherwise fail the ratio rule
            ratio_pct: Some(150.0),
            ..reference_inputs()
        };
        let errs = validate_user_inputs("right", &inputs, PfOmRule::Enforce);
        assert_eq!(
            paths(&errs),
            vec!["right.inputs.pfVacuumKpa", "right.inputs.phaseCMs"]
        );
        assert!(errs.iter().all(|e| e.reason == REQUIRED));
    }

    #[test]
    fn test_pf_above_max_names_pf_field() {
        let inputs = UserInputsDraft {
            pf_vacuum_kpa: Some(999.0),
            ..reference_inputs()
        };
        let errs = validate_user_inputs("left", &inputs, PfOmRule::Enforce);
        assert_eq!(paths(&errs), vec!["left.inputs.pfVacuumKpa"]);
        assert_eq!(errs[0].reason, "must be <= milkingVacuumMaxKpa");
    }

    #[test]
    fn test_om_above_max_also_trips_pf_om_rule() {
        let inputs = UserInputsDraft {
            om_vacuum_kpa: Some(50.0),
            ..reference_inputs()
        };
        let errs = validate_user_inputs("left", &inputs, PfOmRule::Enforce);
        assert_eq!(
            paths(&errs),
            vec!["left.inputs.omVacuumKpa", "left.inputs.pfVacuumKpa"]
        );
    }

    #[test]
    fn test_phase_a_longer_than_on_time() {
        let inputs = UserInputsDraft {
            phase_a_ms: Some(700.0),
            ..reference_inputs()
        };
        let errs = validate_user_inputs("left", &inputs, PfOmRule::Enforce);
        assert_eq!(paths(&errs), vec!["left.inputs.phaseAMs"]);
        assert!(errs[0].reason.contains("cannot exceed ON_ms"));
    }

    #[test]
    fn test_phase_c_longer_than_off_time() {
        let inputs = UserInputsDraft {
            phase_c_ms: Some(401.0),
            ..reference_inputs()
        };
        let errs = validate_user_inputs("left", &inputs, PfOmRule::Enforce);
        assert_eq!(paths(&errs), vec!["left.inputs.phaseCMs"]);
    }

    #[test]
    fn test_phase_filling_whole_on_time_is_allowed() {
        let inputs = UserInputsDraft {
            phase_a_ms: Some(600.0),
            phase_c_ms: Some(400.0),
            ..reference_inputs()
        };
        assert!(validate_user_inputs("left", &inputs, PfOmRule::Enforce).is_empty());
    }

    #[test]
    fn test_ratio_bounds() {
        for ratio in [0.0, 100.0, -5.0] {
            let inputs = UserInputsDraft {
                ratio_pct: Some(ratio),
                ..reference_inputs()
            };
            let errs = validate_user_inputs("left", &inputs, PfOmRule::Enforce);
            assert!(
                errs.iter().any(|e| e.path == "left.inputs.ratioPct"
                    && e.reason == "must be between 0 and 100"),
                "ratio {} not rejected: {:?}",
                ratio,
                errs
            );
        }
    }

    #[test]
    fn test_zero_frequency_skips_phase_rules() {
        let inputs = UserInputsDraft {
            frequency_bpm: Some(0.0),
            ..reference_inputs()
        };
        let errs = validate_user_inputs("left", &inputs, PfOmRule::Enforce);
        assert_eq!(paths(&errs), vec!["left.inputs.frequencyBpm"]);
    }

    #[test]
    fn test_subnormal_frequency_rejected() {
        let inputs = UserInputsDraft {
            frequency_bpm: Some(1e-310),
            ..reference_inputs()
        };
        let errs = validate_user_inputs("left", &inputs, PfOmRule::Enforce);
        assert_eq!(paths(&errs), vec!["left.inputs.frequencyBpm"]);
        assert_eq!(errs[0].reason, "frequencyBpm results in a non-finite cycle period");
    }

    #[test]
    fn test_non_positive_max_vacuum() {
        let inputs = UserInputsDraft {
            milking_vacuum_max_kpa: Some(0.0),
            pf_vacuum_kpa: Some(0.0),
            om_vacuum_kpa: Some(0.0),
            ..reference_inputs()
        };
        let errs = validate_user_inputs("left", &inputs, PfOmRule::Enforce);
        assert_eq!(paths(&errs), vec!["left.inputs.milkingVacuumMaxKpa"]);
    }

    #[test]
    fn test_boundary_rules() {
        let inputs = UserInputsDraft {
            om_duration_sec: Some(-1.0),
            phase_a_ms: Some(0.0),
            phase_c_ms: Some(-3.0),
            ..reference_inputs()
        };
        let errs = validate_user_inputs("left", &inputs, PfOmRule::Enforce);
        assert_eq!(
            paths(&errs),
            vec![
                "left.inputs.omDurationSec",
                "left.inputs.phaseAMs",
                "left.inputs.phaseCMs",
            ]
        );
    }

    #[test]
    fn test_non_finite_values_rejected() {
        let inputs = UserInputsDraft {
            phase_a_ms: Some(f64::INFINITY),
            ..reference_inputs()
        };
        let errs = validate_user_inputs("left", &inputs, PfOmRule::Enforce);
        assert_eq!(paths(&errs), vec!["left.inputs.phaseAMs"]);
        assert_eq!(errs[0].reason, "must be a finite number");
    }

    #[test]
    fn test_pf_om_rule_modes() {
        let inputs = UserInputsDraft {
            pf_vacuum_kpa: Some(30.0),
            om_vacuum_kpa: Some(38.0),
            ..reference_inputs()
        };

        let enforced = validate_user_inputs("left", &inputs, PfOmRule::Enforce);
        assert_eq!(paths(&enforced), vec!["left.inputs.pfVacuumKpa"]);
        assert!(enforced[0].is_error());

        let warned = validate_user_inputs("left", &inputs, PfOmRule::Warn);
        assert_eq!(warned.len(), 1);
        assert!(!warned[0].is_error());

        assert!(validate_user_inputs("left", &inputs, PfOmRule::Off).is_empty());
    }

    #[test]
    fn test_compare_request_reports_both_sides() {
        let left = UserInputsDraft {
            pf_vacuum_kpa: Some(999.0),
            ..reference_inputs()
        };
        let right = UserInputsDraft {
            phase_a_ms: Some(700.0),
            ..reference_inputs()
        };
        let errs = validate_compare_request(&left, &right, PfOmRule::Enforce);
        assert_eq!(
            paths(&errs),
            vec!["left.inputs.pfVacuumKpa", "right.inputs.phaseAMs"]
        );
    }
}
