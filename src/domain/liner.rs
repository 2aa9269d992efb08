// Liner domain model
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a product application (a liner fitted to a given shell).
pub type ApplicationId = i64;

/// Snapshot of the lab facts known for one liner application.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinerInfo {
    pub id: i64,
    pub model: String,
    pub brand: String,
    pub tpp_kpa: f64,
    pub intensity_pf_kpa: f64,
    pub intensity_om_kpa: f64,
}

impl LinerInfo {
    pub fn new(
        id: i64,
        model: String,
        brand: String,
        tpp_kpa: f64,
        intensity_pf_kpa: f64,
        intensity_om_kpa: f64,
    ) -> Self {
        Self {
            id,
            model,
            brand,
            tpp_kpa,
            intensity_pf_kpa,
            intensity_om_kpa,
        }
    }

    pub fn display_name(&self) -> String {
        format!("{} {}", self.brand, self.model).trim().to_string()
    }
}

/// Massage-derived metric codes recorded by the massage test subsystem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MetricCode {
    #[serde(rename = "AVG_PF")]
    AvgPf,
    #[serde(rename = "AVG_OVERMILK")]
    AvgOvermilk,
}

impl MetricCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricCode::AvgPf => "AVG_PF",
            MetricCode::AvgOvermilk => "AVG_OVERMILK",
        }
    }
}

/// Upstream facts the engine needs for every liner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DerivedFact {
    Tpp,
    Intensity(MetricCode),
}

impl fmt::Display for DerivedFact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DerivedFact::Tpp => write!(f, "TPP run/real_tpp"),
            DerivedFact::Intensity(code) => write!(f, "metric {}", code.as_str()),
        }
    }
}
