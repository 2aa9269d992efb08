// Chart-ready series derived from a side's timings
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Point {
    pub x_ms: f64,
    pub y_kpa: f64,
}

impl Point {
    pub fn new(x_ms: f64, y_kpa: f64) -> Self {
        Self { x_ms, y_kpa }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Curve {
    pub label: String,
    pub points: Vec<Point>,
}

impl Curve {
    pub fn new(label: String, points: Vec<Point>) -> Self {
        Self { label, points }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PulsationChart {
    pub curve: Curve,
    pub threshold: Curve,
}

/// The four pulsator phases: rise, plateau, fall, baseline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PhaseKey {
    A,
    B,
    C,
    D,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Segment {
    pub key: PhaseKey,
    pub value_ms: f64,
}

impl Segment {
    pub fn new(key: PhaseKey, value_ms: f64) -> Self {
        Self { key, value_ms }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PulsatorPhasesChart {
    pub segments: Vec<Segment>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BarKey {
    #[serde(rename = "Real Milking")]
    RealMilking,
    #[serde(rename = "Real OFF")]
    RealOff,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Bar {
    pub key: BarKey,
    pub value_ms: f64,
}

impl Bar {
    pub fn new(key: BarKey, value_ms: f64) -> Self {
        Self { key, value_ms }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RealMilkingMassageChart {
    pub bars: Vec<Bar>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Charts {
    pub pulsation: PulsationChart,
    pub pulsator_phases: PulsatorPhasesChart,
    pub real_milking_massage: RealMilkingMassageChart,
}
