// Pressure unit conversions
use serde::Deserialize;

/// inHg per kPa.
pub const INHG_PER_KPA: f64 = 0.295299830714;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitSystem {
    #[default]
    Metric,
    Imperial,
}

pub fn kpa_to_inhg(kpa: f64) -> f64 {
    round3(kpa * INHG_PER_KPA)
}

pub fn inhg_to_kpa(inhg: f64) -> f64 {
    round3(inhg / INHG_PER_KPA)
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}
