// Pulsation engine - Derives cycle timings, the real milking window and chart series
use crate::domain::charts::{
    Bar, BarKey, Charts, Curve, PhaseKey, Point, PulsationChart, PulsatorPhasesChart,
    RealMilkingMassageChart, Segment,
};
use crate::domain::comparison::SideResult;
use crate::domain::liner::LinerInfo;
use crate::domain::setting::{AppliedDose, Cycle, DerivedTimings, MS_PER_MINUTE, UserInputs};

pub const WARN_FULL_CYCLE: &str = "delta<=0: real window covers full cycle";
pub const WARN_EMPTY_WINDOW: &str = "delta>=max: real window empty";

const THRESHOLD_LABEL: &str = "Real B threshold";

/// Never panics, unlike `f64::clamp`, when `lo > hi`.
fn clamp(x: f64, lo: f64, hi: f64) -> f64 {
    x.min(hi).max(lo)
}

/// Compute one side of a comparison.
///
/// The inputs are expected to have passed validation; the function is total
/// over any finite values regardless.
pub fn compute_side(liner: &LinerInfo, inputs: &UserInputs) -> SideResult {
    let mut warnings = Vec::new();

    let max_kpa = inputs.milking_vacuum_max_kpa;
    let a_ms = inputs.phase_a_ms;
    let c_ms = inputs.phase_c_ms;

    let Cycle { t_ms, on_ms, off_ms } = Cycle::new(inputs.frequency_bpm, inputs.ratio_pct);
    let b_ms = on_ms - a_ms;
    let d_ms = off_ms - c_ms;

    // Vacuum margin above the liner's closure threshold
    let delta_kpa = clamp(max_kpa - liner.tpp_kpa, 0.0, max_kpa);

    let (t_start_ms, t_end_ms, b_real_ms) = if delta_kpa <= 0.0 {
        warnings.push(WARN_FULL_CYCLE.to_string());
        (0.0, t_ms, t_ms)
    } else if delta_kpa >= max_kpa {
        warnings.push(WARN_EMPTY_WINDOW.to_string());
        (0.0, 0.0, 0.0)
    } else {
        // Linear rise through phase A, linear fall through phase C
        let fraction = delta_kpa / max_kpa;
        let t_start = a_ms * fraction;
        let t_end = (a_ms + b_ms) + c_ms * (1.0 - fraction);
        (t_start, t_end, t_end - t_start)
    };

    let b_real_ms = clamp(b_real_ms, 0.0, t_ms);
    let real_milking_ms = b_real_ms;
    let real_off_ms = t_ms - b_real_ms;

    let derived = DerivedTimings {
        t_ms,
        a_ms,
        b_ms,
        c_ms,
        d_ms,
        on_ms,
        off_ms,
        delta_kpa,
        t_start_ms,
        t_end_ms,
        b_real_ms,
        real_milking_ms,
        real_off_ms,
    };

    SideResult {
        liner: liner.clone(),
        inputs_used: *inputs,
        charts: build_charts(&liner.model, max_kpa, &derived),
        applied_dose: applied_dose(liner, inputs, &derived),
        derived,
        warnings,
    }
}

fn build_charts(label: &str, max_kpa: f64, d: &DerivedTimings) -> Charts {
    let curve = Curve::new(
        label.to_string(),
        vec![
            Point::new(0.0, 0.0),
            Point::new(d.a_ms, max_kpa),
            Point::new(d.a_ms + d.b_ms, max_kpa),
            Point::new(d.a_ms + d.b_ms + d.c_ms, 0.0),
            Point::new(d.t_ms, 0.0),
        ],
    );

    let threshold = Curve::new(
        THRESHOLD_LABEL.to_string(),
        vec![Point::new(0.0, d.delta_kpa), Point::new(d.t_ms, d.delta_kpa)],
    );

    Charts {
        pulsation: PulsationChart { curve, threshold },
        pulsator_phases: PulsatorPhasesChart {
            segments: vec![
                Segment::new(PhaseKey::A, d.a_ms),
                Segment::new(PhaseKey::B, d.b_ms),
                Segment::new(PhaseKey::C, d.c_ms),
                Segment::new(PhaseKey::D, d.d_ms),
            ],
        },
        real_milking_massage: RealMilkingMassageChart {
            bars: vec![
                Bar::new(BarKey::RealMilking, d.real_milking_ms),
                Bar::new(BarKey::RealOff, d.real_off_ms),
            ],
        },
    }
}

/// Vacuum applied during the real milking window and massage applied during
/// the real off time, per minute of pulsation.
fn applied_dose(liner: &LinerInfo, inputs: &UserInputs, d: &DerivedTimings) -> AppliedDose {
    let milking_share = inputs.frequency_bpm * (d.b_real_ms / MS_PER_MINUTE);
    let off_share = inputs.frequency_bpm * (d.real_off_ms / MS_PER_MINUTE);

    AppliedDose {
        vacuum_pf: inputs.pf_vacuum_kpa * milking_share,
        vacuum_om: inputs.om_vacuum_kpa * milking_share,
        massage_pf: liner.intensity_pf_kpa * off_share,
        massage_om: liner.intensity_om_kpa * off_share,
    }
}
