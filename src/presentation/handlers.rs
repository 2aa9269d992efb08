// HTTP request handlers
use crate::infrastructure::http_response::{accepts_brotli, json_response};
use crate::infrastructure::unit_transform::apply_unit_system;
use crate::presentation::api_types::{
    CompareRequestPayload, CompareResponse, ErrorResponse, UnitsQuery,
};
use crate::presentation::app_state::AppState;
use axum::{
    extract::{rejection::JsonRejection, Json, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use std::sync::Arc;

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Compare two liner settings and return derived timings, charts and diffs
pub async fn compare_settings(
    Query(query): Query<UnitsQuery>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CompareRequestPayload>, JsonRejection>,
) -> Response {
    let compress = accepts_brotli(&headers);
    let request = match payload {
        Ok(Json(payload)) => payload.into_request(),
        Err(rejection) => {
            tracing::warn!("Rejected compare request body: {}", rejection.body_text());
            let (status, body) = ErrorResponse::from_rejection(&rejection);
            return respond(status, &body, compress).await;
        }
    };

    let result = match state.comparison_service.compare(&request).await {
        Ok(result) => result,
        Err(err) => {
            if err.is_server_fault() {
                tracing::error!(request_id = %request.request_id, "Comparison failed: {:#}", err);
            }
            let (status, body) = ErrorResponse::from_compare_error(Some(request.request_id), err);
            return respond(status, &body, compress).await;
        }
    };

    let mut body = match serde_json::to_value(CompareResponse::new(request.request_id, result)) {
        Ok(value) => value,
        Err(e) => {
            tracing::error!("Failed to serialize comparison: {}", e);
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };
    apply_unit_system(&mut body, query.units);

    respond(StatusCode::OK, &body, compress).await
}

async fn respond<T: serde::Serialize>(status: StatusCode, body: &T, compress: bool) -> Response {
    match json_response(status, body, compress).await {
        Ok(response) => response,
        Err(status) => status.into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::comparison_service::ComparisonService;
    use crate::domain::units::UnitSystem;
    use crate::domain::validation::PfOmRule;
    use crate::infrastructure::catalog_repository::CatalogLinerRepository;
    use axum::body::Body;
    use axum::extract::FromRequest;
    use axum::http::{header, HeaderValue, Request};
    use serde_json::{json, Value};

    const CATALOG: &str = r#"
[[applications]]
id = 1

[applications.product]
id = 10
name = "Flex liner"
model = "Flex 20"
brand = "Milkrite"

[[applications.tpp_runs]]
real_tpp = 10.0
created_at = "2025-03-02T08:00:00Z"

[[applications.metrics]]
code = "AVG_PF"
value = 12.0
computed_at = "2025-03-02T09:00:00Z"

[[applications.metrics]]
code = "AVG_OVERMILK"
value = 9.0
computed_at = "2025-03-02T09:00:00Z"

[[applications]]
id = 2

[applications.product]
id = 20
name = "Square"

[[applications.tpp_runs]]
real_tpp = 12.0
created_at = "2025-03-02T08:00:00Z"
"#;

    fn state() -> State<Arc<AppState>> {
        let repository = Arc::new(CatalogLinerRepository::from_toml_str(CATALOG).unwrap());
        State(Arc::new(AppState {
            comparison_service: ComparisonService::new(repository, PfOmRule::Enforce),
        }))
    }

    fn inputs() -> Value {
        json!({
            "milkingVacuumMaxKpa": 42.0,
            "pfVacuumKpa": 38.0,
            "omVacuumKpa": 30.0,
            "omDurationSec": 10.0,
            "frequencyBpm": 60.0,
            "ratioPct": 60.0,
            "phaseAMs": 150.0,
            "phaseCMs": 150.0
        })
    }

    fn payload(left_id: i64, left_inputs: Value, right_id: i64) -> Json<CompareRequestPayload> {
        Json(
            serde_json::from_value(json!({
                "schemaVersion": "1.0",
                "requestId": "req-42",
                "left": { "productApplicationId": left_id, "inputs": left_inputs },
                "right": { "productApplicationId": right_id, "inputs": inputs() }
            }))
            .unwrap(),
        )
    }

    async fn call(
        units: UnitSystem,
        headers: HeaderMap,
        body: Json<CompareRequestPayload>,
    ) -> (StatusCode, Response) {
        let response =
            compare_settings(Query(UnitsQuery { units }), headers, state(), Ok(body)).await;
        (response.status(), response)
    }

    async fn call_raw(body: &'static str) -> (StatusCode, Response) {
        let request = Request::builder()
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .unwrap();
        let extracted = Json::<CompareRequestPayload>::from_request(request, &()).await;
        let response = compare_settings(
            Query(UnitsQuery::default()),
            HeaderMap::new(),
            state(),
            extracted,
        )
        .await;
        (response.status(), response)
    }

    async fn json_body(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health_check() {
        assert_eq!(health_check().await, "ok");
    }

    #[tokio::test]
    async fn test_compare_success() {
        let (status, response) =
            call(UnitSystem::Metric, HeaderMap::new(), payload(1, inputs(), 1)).await;
        assert_eq!(status, StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["schemaVersion"], "1.0");
        assert_eq!(body["engineVersion"], "setting-calculator-engine@1.0.0");
        assert_eq!(body["requestId"], "req-42");
        assert_eq!(body["left"]["derived"]["tMs"], 1000.0);
        assert_eq!(body["left"]["derived"]["onMs"], 600.0);
        assert_eq!(body["left"]["derived"]["offMs"], 400.0);
        assert_eq!(body["left"]["derived"]["deltaKpa"], 32.0);
        assert_eq!(body["left"]["liner"]["model"], "Flex 20");
        assert_eq!(body["left"]["charts"]["pulsatorPhases"]["segments"][1]["key"], "B");
        assert_eq!(body["left"]["charts"]["realMilkingMassage"]["bars"][0]["key"], "Real Milking");
        assert_eq!(body["diffPct"]["appliedVacuum"]["pf"], 0.0);
        assert_eq!(body["diffPct"]["massageIntensity"]["om"], 0.0);
        assert_eq!(body["warnings"], json!([]));
        assert!(body.get("unitSystem").is_none());
    }

    #[tokio::test]
    async fn test_compare_imperial_output() {
        let (status, response) =
            call(UnitSystem::Imperial, HeaderMap::new(), payload(1, inputs(), 1)).await;
        assert_eq!(status, StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["unitSystem"], "imperial");
        assert_eq!(body["left"]["inputsUsed"]["milkingVacuumMaxKpa"], 42.0);
        assert_eq!(body["left"]["inputsUsed"]["milkingVacuumMaxInHg"], 12.403);
    }

    #[tokio::test]
    async fn test_compare_accepts_inhg_inputs() {
        let mut left = inputs();
        left["milkingVacuumMaxInHg"] = json!(12.402);

        let (status, response) = call(UnitSystem::Metric, HeaderMap::new(), payload(1, left, 1)).await;
        assert_eq!(status, StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["left"]["inputsUsed"]["milkingVacuumMaxKpa"], 41.998);
    }

    #[tokio::test]
    async fn test_validation_error_envelope() {
        let mut left = inputs();
        left["pfVacuumKpa"] = json!(999.0);

        let (status, response) = call(UnitSystem::Metric, HeaderMap::new(), payload(1, left, 1)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

        let body = json_body(response).await;
        assert_eq!(body["requestId"], "req-42");
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(body["error"]["fields"][0]["path"], "left.inputs.pfVacuumKpa");
    }

    #[tokio::test]
    async fn test_unreadable_body_uses_error_envelope() {
        let (status, response) = call_raw(
            r#"{"left": {"productApplicationId": 1, "inputs": {}},
                "right": {"productApplicationId": 2, "inputs": {}}}"#,
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

        let body = json_body(response).await;
        assert_eq!(body["schemaVersion"], "1.0");
        assert_eq!(body["requestId"], Value::Null);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert!(body["error"]["message"].as_str().unwrap().contains("requestId"));

        let (status, response) = call_raw("{not json").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_unknown_application_is_404() {
        let (status, response) =
            call(UnitSystem::Metric, HeaderMap::new(), payload(77, inputs(), 1)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let body = json_body(response).await;
        assert_eq!(body["error"]["code"], "NOT_FOUND");
        assert_eq!(body["error"]["message"], "ProductApplication 77 not found");
    }

    #[tokio::test]
    async fn test_missing_derived_data_is_422() {
        let (status, response) =
            call(UnitSystem::Metric, HeaderMap::new(), payload(1, inputs(), 2)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

        let body = json_body(response).await;
        assert_eq!(body["error"]["code"], "MISSING_DERIVED_DATA");
        assert_eq!(
            body["error"]["message"],
            "Missing metric AVG_PF for productApplicationId=2"
        );
    }

    #[tokio::test]
    async fn test_brotli_when_accepted() {
        let mut headers = HeaderMap::new();
        headers.insert(header::ACCEPT_ENCODING, HeaderValue::from_static("br"));

        let (status, response) = call(UnitSystem::Metric, headers, payload(1, inputs(), 1)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_ENCODING], "br");
    }
}
