// Catalog-file liner repository implementation
use crate::application::liner_repository::{LinerLookupError, LinerRepository};
use crate::domain::liner::{ApplicationId, DerivedFact, LinerInfo, MetricCode};
use anyhow::Context;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    applications: Vec<ApplicationRecord>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApplicationRecord {
    pub id: ApplicationId,
    pub product: ProductRecord,
    #[serde(default)]
    pub tpp_runs: Vec<TppRunRecord>,
    #[serde(default)]
    pub metrics: Vec<MetricRecord>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProductRecord {
    pub id: i64,
    pub name: String,
    pub model: Option<String>,
    pub brand: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TppRunRecord {
    pub real_tpp: Option<f64>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MetricRecord {
    pub code: MetricCode,
    pub value: f64,
    pub computed_at: DateTime<Utc>,
}

/// Liner facts exported from the lab database into a TOML catalog.
#[derive(Debug, Clone)]
pub struct CatalogLinerRepository {
    applications: HashMap<ApplicationId, ApplicationRecord>,
}

impl CatalogLinerRepository {
    pub fn new(records: Vec<ApplicationRecord>) -> Self {
        Self {
            applications: records.into_iter().map(|r| (r.id, r)).collect(),
        }
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read liner catalog {}", path.display()))?;
        let repository = Self::from_toml_str(&raw)
            .with_context(|| format!("Failed to parse liner catalog {}", path.display()))?;

        tracing::info!(
            "Loaded {} liner applications from {}",
            repository.applications.len(),
            path.display()
        );
        Ok(repository)
    }

    pub fn from_toml_str(raw: &str) -> anyhow::Result<Self> {
        let catalog: CatalogFile = toml::from_str(raw)?;
        Ok(Self::new(catalog.applications))
    }

    fn latest_tpp(record: &ApplicationRecord) -> Option<f64> {
        // Only the most recent run counts, even if it has no value yet
        record
            .tpp_runs
            .iter()
            .max_by_key(|run| run.created_at)
            .and_then(|run| run.real_tpp)
    }

    fn latest_metric(record: &ApplicationRecord, code: MetricCode) -> Option<f64> {
        record
            .metrics
            .iter()
            .filter(|m| m.code == code)
            .max_by_key(|m| m.computed_at)
            .map(|m| m.value)
    }
}

#[async_trait]
impl LinerRepository for CatalogLinerRepository {
    async fn get_liner_info(
        &self,
        application_id: ApplicationId,
    ) -> Result<LinerInfo, LinerLookupError> {
        let record = self
            .applications
            .get(&application_id)
            .ok_or(LinerLookupError::NotFound { application_id })?;

        let missing = |fact| LinerLookupError::MissingData {
            application_id,
            fact,
        };

        let tpp_kpa = Self::latest_tpp(record).ok_or_else(|| missing(DerivedFact::Tpp))?;
        let intensity_pf_kpa = Self::latest_metric(record, MetricCode::AvgPf)
            .ok_or_else(|| missing(DerivedFact::Intensity(MetricCode::AvgPf)))?;
        let intensity_om_kpa = Self::latest_metric(record, MetricCode::AvgOvermilk)
            .ok_or_else(|| missing(DerivedFact::Intensity(MetricCode::AvgOvermilk)))?;

        let product = &record.product;
        let model = product
            .model
            .clone()
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| product.name.clone());

        tracing::debug!("Resolved application {} from catalog", application_id);

        Ok(LinerInfo::new(
            product.id,
            model,
            product.brand.clone().unwrap_or_default(),
            tpp_kpa,
            intensity_pf_kpa,
            intensity_om_kpa,
        ))
    }
}
