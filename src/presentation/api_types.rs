// Wire types for the setting calculator API
use crate::application::comparison_service::{
    CompareRequest, SideRequest, ENGINE_VERSION, SCHEMA_VERSION,
};
use crate::application::errors::CompareError;
use crate::domain::comparison::CompareResult;
use crate::domain::liner::ApplicationId;
use crate::domain::setting::UserInputsDraft;
use crate::domain::units::{inhg_to_kpa, UnitSystem};
use crate::domain::validation::FieldError;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Deserialize)]
pub struct UnitsQuery {
    #[serde(default)]
    pub units: UnitSystem,
}

/// Inputs for one side. Vacuum levels may be sent in kPa or inHg; inHg wins.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputsPayload {
    pub milking_vacuum_max_kpa: Option<f64>,
    pub pf_vacuum_kpa: Option<f64>,
    pub om_vacuum_kpa: Option<f64>,
    pub milking_vacuum_max_in_hg: Option<f64>,
    pub pf_vacuum_in_hg: Option<f64>,
    pub om_vacuum_in_hg: Option<f64>,
    pub om_duration_sec: Option<f64>,
    pub frequency_bpm: Option<f64>,
    pub ratio_pct: Option<f64>,
    pub phase_a_ms: Option<f64>,
    pub phase_c_ms: Option<f64>,
}

impl InputsPayload {
    pub fn into_draft(self) -> UserInputsDraft {
        let vacuum = |kpa: Option<f64>, in_hg: Option<f64>| in_hg.map(inhg_to_kpa).or(kpa);

        UserInputsDraft {
            milking_vacuum_max_kpa: vacuum(self.milking_vacuum_max_kpa, self.milking_vacuum_max_in_hg),
            pf_vacuum_kpa: vacuum(self.pf_vacuum_kpa, self.pf_vacuum_in_hg),
            om_vacuum_kpa: vacuum(self.om_vacuum_kpa, self.om_vacuum_in_hg),
            om_duration_sec: self.om_duration_sec,
            frequency_bpm: self.frequency_bpm,
            ratio_pct: self.ratio_pct,
            phase_a_ms: self.phase_a_ms,
            phase_c_ms: self.phase_c_ms,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SideRequestPayload {
    pub product_application_id: ApplicationId,
    pub inputs: InputsPayload,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompareRequestPayload {
    #[serde(default = "default_schema_version")]
    pub schema_version: String,
    pub request_id: String,
    pub left: SideRequestPayload,
    pub right: SideRequestPayload,
}

fn default_schema_version() -> String {
    SCHEMA_VERSION.to_string()
}

impl CompareRequestPayload {
    pub fn into_request(self) -> CompareRequest {
        let side = |payload: SideRequestPayload| SideRequest {
            application_id: payload.product_application_id,
            inputs: payload.inputs.into_draft(),
        };

        CompareRequest {
            schema_version: self.schema_version,
            request_id: self.request_id,
            left: side(self.left),
            right: side(self.right),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompareResponse {
    pub schema_version: &'static str,
    pub engine_version: &'static str,
    pub request_id: String,
    #[serde(flatten)]
    pub result: CompareResult,
}

impl CompareResponse {
    pub fn new(request_id: String, result: CompareResult) -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            engine_version: ENGINE_VERSION,
            request_id,
            result,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ErrorCode {
    #[serde(rename = "VALIDATION_ERROR")]
    Validation,
    #[serde(rename = "NOT_FOUND")]
    NotFound,
    #[serde(rename = "MISSING_DERIVED_DATA")]
    MissingDerivedData,
    #[serde(rename = "UPSTREAM_ERROR")]
    Upstream,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: ErrorCode,
    pub message: String,
    pub fields: Vec<FieldError>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub schema_version: &'static str,
    /// `None` when the body could not be read far enough to find one.
    pub request_id: Option<String>,
    pub error: ErrorBody,
}

impl ErrorResponse {
    /// Map a failed comparison to its HTTP status and error envelope
    pub fn from_compare_error(request_id: Option<String>, err: CompareError) -> (StatusCode, Self) {
        let (status, code, message, fields) = match err {
            CompareError::Validation { fields } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorCode::Validation,
                "Invalid inputs".to_string(),
                fields,
            ),
            err @ CompareError::NotFound { .. } => (
                StatusCode::NOT_FOUND,
                ErrorCode::NotFound,
                err.to_string(),
                Vec::new(),
            ),
            err @ CompareError::MissingDerivedData { .. } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorCode::MissingDerivedData,
                err.to_string(),
                Vec::new(),
            ),
            CompareError::Upstream(_) => (
                StatusCode::BAD_GATEWAY,
                ErrorCode::Upstream,
                "Liner data source unavailable".to_string(),
                Vec::new(),
            ),
        };

        (status, Self::envelope(request_id, code, message, fields))
    }

    /// Map an unreadable request body to a validation envelope, keeping the
    /// extractor's status (400 syntax, 415 content type, 422 shape).
    pub fn from_rejection(rejection: &JsonRejection) -> (StatusCode, Self) {
        (
            rejection.status(),
            Self::envelope(None, ErrorCode::Validation, rejection.body_text(), Vec::new()),
        )
    }

    fn envelope(
        request_id: Option<String>,
        code: ErrorCode,
        message: String,
        fields: Vec<FieldError>,
    ) -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            request_id,
            error: ErrorBody {
                code,
                message,
                fields,
            },
        }
    }
}
