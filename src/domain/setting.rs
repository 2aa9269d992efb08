// Setting inputs and derived pulsation timings
use serde::Serialize;

pub const MS_PER_MINUTE: f64 = 60_000.0;

/// Operator-supplied machine setting for one side, all fields present.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInputs {
    pub milking_vacuum_max_kpa: f64,
    pub pf_vacuum_kpa: f64,
    pub om_vacuum_kpa: f64,
    pub om_duration_sec: f64,
    pub frequency_bpm: f64,
    pub ratio_pct: f64,
    pub phase_a_ms: f64,
    pub phase_c_ms: f64,
}

/// The eight input fields, in the order they are reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputField {
    MilkingVacuumMaxKpa,
    PfVacuumKpa,
    OmVacuumKpa,
    FrequencyBpm,
    RatioPct,
    PhaseAMs,
    PhaseCMs,
    OmDurationSec,
}

impl InputField {
    pub fn as_str(&self) -> &'static str {
        match self {
            InputField::MilkingVacuumMaxKpa => "milkingVacuumMaxKpa",
            InputField::PfVacuumKpa => "pfVacuumKpa",
            InputField::OmVacuumKpa => "omVacuumKpa",
            InputField::FrequencyBpm => "frequencyBpm",
            InputField::RatioPct => "ratioPct",
            InputField::PhaseAMs => "phaseAMs",
            InputField::PhaseCMs => "phaseCMs",
            InputField::OmDurationSec => "omDurationSec",
        }
    }
}

/// Inputs as received, before presence has been checked.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct UserInputsDraft {
    pub milking_vacuum_max_kpa: Option<f64>,
    pub pf_vacuum_kpa: Option<f64>,
    pub om_vacuum_kpa: Option<f64>,
    pub om_duration_sec: Option<f64>,
    pub frequency_bpm: Option<f64>,
    pub ratio_pct: Option<f64>,
    pub phase_a_ms: Option<f64>,
    pub phase_c_ms: Option<f64>,
}

impl UserInputsDraft {
    pub fn fields(&self) -> [(InputField, Option<f64>); 8] {
        [
            (InputField::MilkingVacuumMaxKpa, self.milking_vacuum_max_kpa),
            (InputField::PfVacuumKpa, self.pf_vacuum_kpa),
            (InputField::OmVacuumKpa, self.om_vacuum_kpa),
            (InputField::FrequencyBpm, self.frequency_bpm),
            (InputField::RatioPct, self.ratio_pct),
            (InputField::PhaseAMs, self.phase_a_ms),
            (InputField::PhaseCMs, self.phase_c_ms),
            (InputField::OmDurationSec, self.om_duration_sec),
        ]
    }

    /// Returns the complete inputs, or `None` while any field is missing.
    pub fn complete(&self) -> Option<UserInputs> {
        Some(UserInputs {
            milking_vacuum_max_kpa: self.milking_vacuum_max_kpa?,
            pf_vacuum_kpa: self.pf_vacuum_kpa?,
            om_vacuum_kpa: self.om_vacuum_kpa?,
            om_duration_sec: self.om_duration_sec?,
            frequency_bpm: self.frequency_bpm?,
            ratio_pct: self.ratio_pct?,
            phase_a_ms: self.phase_a_ms?,
            phase_c_ms: self.phase_c_ms?,
        })
    }
}

impl From<UserInputs> for UserInputsDraft {
    fn from(inputs: UserInputs) -> Self {
        Self {
            milking_vacuum_max_kpa: Some(inputs.milking_vacuum_max_kpa),
            pf_vacuum_kpa: Some(inputs.pf_vacuum_kpa),
            om_vacuum_kpa: Some(inputs.om_vacuum_kpa),
            om_duration_sec: Some(inputs.om_duration_sec),
            frequency_bpm: Some(inputs.frequency_bpm),
            ratio_pct: Some(inputs.ratio_pct),
            phase_a_ms: Some(inputs.phase_a_ms),
            phase_c_ms: Some(inputs.phase_c_ms),
        }
    }
}

/// Period split of one pulsation cycle into vacuum-on and vacuum-off time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cycle {
    pub t_ms: f64,
    pub on_ms: f64,
    pub off_ms: f64,
}

impl Cycle {
    pub fn new(frequency_bpm: f64, ratio_pct: f64) -> Self {
        let t_ms = MS_PER_MINUTE / frequency_bpm;
        let on_ms = t_ms * (ratio_pct / 100.0);
        let off_ms = t_ms - on_ms;
        Self { t_ms, on_ms, off_ms }
    }
}

/// Timings derived from one side's setting and liner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedTimings {
    pub t_ms: f64,
    pub a_ms: f64,
    pub b_ms: f64,
    pub c_ms: f64,
    pub d_ms: f64,
    pub on_ms: f64,
    pub off_ms: f64,
    pub delta_kpa: f64,
    pub t_start_ms: f64,
    pub t_end_ms: f64,
    pub b_real_ms: f64,
    pub real_milking_ms: f64,
    pub real_off_ms: f64,
}

/// Absolute applied vacuum and massage per minute.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppliedDose {
    pub vacuum_pf: f64,
    pub vacuum_om: f64,
    pub massage_pf: f64,
    pub massage_om: f64,
}
