// Comparison result domain models
use super::charts::Charts;
use super::liner::LinerInfo;
use super::setting::{AppliedDose, DerivedTimings, UserInputs};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SideResult {
    pub liner: LinerInfo,
    pub inputs_used: UserInputs,
    pub derived: DerivedTimings,
    pub charts: Charts,
    pub applied_dose: AppliedDose,
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DiffPair {
    pub pf: f64,
    pub om: f64,
}

impl DiffPair {
    pub fn new(pf: f64, om: f64) -> Self {
        Self { pf, om }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiffPct {
    pub applied_vacuum: DiffPair,
    pub massage_intensity: DiffPair,
}

/// Both sides of a comparison with their percentage differences.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompareResult {
    pub left: SideResult,
    pub right: SideResult,
    pub diff_pct: DiffPct,
    pub warnings: Vec<String>,
}
