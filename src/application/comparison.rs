// Comparison aggregator - Runs the engine per side and computes percentage deltas
use crate::application::pulsation_engine::compute_side;
use crate::domain::comparison::{CompareResult, DiffPair, DiffPct};
use crate::domain::liner::LinerInfo;
use crate::domain::setting::UserInputs;

/// Percentage change from `left` to `right`; zero when `left` is zero.
pub fn pct(left: f64, right: f64) -> f64 {
    if left == 0.0 {
        return 0.0;
    }
    (right - left) / left * 100.0
}

pub fn compare_sides(
    left_liner: &LinerInfo,
    left_inputs: &UserInputs,
    right_liner: &LinerInfo,
    right_inputs: &UserInputs,
) -> CompareResult {
    let left = compute_side(left_liner, left_inputs);
    let right = compute_side(right_liner, right_inputs);

    // pf and om applied vacuum both compare the delta margin; see DESIGN.md
    // open questions before splitting them.
    let vacuum_diff = pct(left.derived.delta_kpa, right.derived.delta_kpa);

    let diff_pct = DiffPct {
        applied_vacuum: DiffPair::new(vacuum_diff, vacuum_diff),
        massage_intensity: DiffPair::new(
            pct(left_liner.intensity_pf_kpa, right_liner.intensity_pf_kpa),
            pct(left_liner.intensity_om_kpa, right_liner.intensity_om_kpa),
        ),
    };

    let warnings = left
        .warnings
        .iter()
        .chain(right.warnings.iter())
        .cloned()
        .collect();

    CompareResult {
        left,
        right,
        diff_pct,
        warnings,
    }
}
