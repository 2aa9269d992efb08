// HTTP liner repository implementation backed by the lab CRUD service
use crate::application::liner_repository::{LinerLookupError, LinerRepository};
use crate::domain::liner::{ApplicationId, DerivedFact, LinerInfo, MetricCode};
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use std::collections::HashMap;

const METRIC_CODES: [MetricCode; 2] = [MetricCode::AvgPf, MetricCode::AvgOvermilk];

#[derive(Debug, Clone)]
pub struct HttpLinerRepository {
    base_url: String,
    token: Option<String>,
    client: reqwest::Client,
}

/// Latest facts for one application as returned by the CRUD service.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LinerFactsPayload {
    product_id: i64,
    name: String,
    #[serde(default)]
    model: Option<String>,
    #[serde(default)]
    brand: Option<String>,
    #[serde(default)]
    real_tpp: Option<f64>,
    /// Keyed by metric code; codes this service does not use are ignored.
    #[serde(default)]
    metrics: HashMap<String, Option<f64>>,
}

impl HttpLinerRepository {
    pub fn new(base_url: String, token: Option<String>) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
            client: reqwest::Client::new(),
        }
    }

    fn build_facts_url(&self, application_id: ApplicationId) -> String {
        let codes: Vec<&str> = METRIC_CODES.iter().map(MetricCode::as_str).collect();
        format!(
            "{}/product-applications/{}/latest-facts?metrics={}",
            self.base_url,
            application_id,
            urlencoding::encode(&codes.join(","))
        )
    }

    async fn fetch_facts(
        &self,
        application_id: ApplicationId,
    ) -> Result<Option<LinerFactsPayload>> {
        let url = self.build_facts_url(application_id);
        tracing::debug!("Fetching liner facts: {}", url);

        let mut request = self.client.get(&url).header("Accept", "application/json");
        if let Some(token) = &self.token {
            request = request.header("Authorization", format!("Bearer {}", token));
        }

        let response = request
            .send()
            .await
            .context("Failed to send request to liner data service")?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Liner data request failed with status {}: {}", status, body);
        }

        let payload = response
            .json::<LinerFactsPayload>()
            .await
            .context("Failed to parse liner data response")?;

        Ok(Some(payload))
    }
}

fn into_liner_info(
    application_id: ApplicationId,
    payload: LinerFactsPayload,
) -> Result<LinerInfo, LinerLookupError> {
    let missing = |fact| LinerLookupError::MissingData {
        application_id,
        fact,
    };
    let metric = |code: MetricCode| payload.metrics.get(code.as_str()).copied().flatten();

    let tpp_kpa = payload.real_tpp.ok_or_else(|| missing(DerivedFact::Tpp))?;
    let intensity_pf_kpa = metric(MetricCode::AvgPf)
        .ok_or_else(|| missing(DerivedFact::Intensity(MetricCode::AvgPf)))?;
    let intensity_om_kpa = metric(MetricCode::AvgOvermilk)
        .ok_or_else(|| missing(DerivedFact::Intensity(MetricCode::AvgOvermilk)))?;

    let model = payload
        .model
        .filter(|m| !m.is_empty())
        .unwrap_or(payload.name);

    Ok(LinerInfo::new(
        payload.product_id,
        model,
        payload.brand.unwrap_or_default(),
        tpp_kpa,
        intensity_pf_kpa,
        intensity_om_kpa,
    ))
}

#[async_trait]
impl LinerRepository for HttpLinerRepository {
    async fn get_liner_info(
        &self,
        application_id: ApplicationId,
    ) -> Result<LinerInfo, LinerLookupError> {
        match self.fetch_facts(application_id).await {
            Ok(Some(payload)) => into_liner_info(application_id, payload),
            Ok(None) => Err(LinerLookupError::NotFound { application_id }),
            Err(e) => {
                tracing::error!("Liner lookup for application {} failed: {:#}", application_id, e);
                Err(LinerLookupError::Upstream(e))
            }
        }
    }
}
