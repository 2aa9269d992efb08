// Comparison service - Use case for comparing two machine settings
use crate::application::comparison::compare_sides;
use crate::application::errors::CompareError;
use crate::application::liner_repository::LinerRepository;
use crate::application::validation::validate_compare_request;
use crate::domain::comparison::CompareResult;
use crate::domain::liner::ApplicationId;
use crate::domain::setting::{UserInputs, UserInputsDraft};
use crate::domain::validation::{FieldError, PfOmRule};
use std::sync::Arc;

pub const SCHEMA_VERSION: &str = "1.0";
pub const ENGINE_VERSION: &str = "setting-calculator-engine@1.0.0";

#[derive(Debug, Clone)]
pub struct SideRequest {
    pub application_id: ApplicationId,
    pub inputs: UserInputsDraft,
}

#[derive(Debug, Clone)]
pub struct CompareRequest {
    pub schema_version: String,
    pub request_id: String,
    pub left: SideRequest,
    pub right: SideRequest,
}

#[derive(Clone)]
pub struct ComparisonService {
    repository: Arc<dyn LinerRepository>,
    pf_om_rule: PfOmRule,
}

impl ComparisonService {
    pub fn new(repository: Arc<dyn LinerRepository>, pf_om_rule: PfOmRule) -> Self {
        Self {
            repository,
            pf_om_rule,
        }
    }

    pub async fn compare(&self, request: &CompareRequest) -> Result<CompareResult, CompareError> {
        // 1. Validate both sides before touching the data source
        let (errors, advisories): (Vec<FieldError>, Vec<FieldError>) = self
            .validate(request)
            .into_iter()
            .partition(FieldError::is_error);

        if !errors.is_empty() {
            tracing::warn!(
                request_id = %request.request_id,
                "Rejecting comparison with {} field errors",
                errors.len()
            );
            return Err(CompareError::Validation { fields: errors });
        }

        let left_inputs = require_complete("left", &request.left.inputs)?;
        let right_inputs = require_complete("right", &request.right.inputs)?;

        // 2. Resolve both liners; either failure aborts the comparison
        let (left_liner, right_liner) = tokio::try_join!(
            self.repository.get_liner_info(request.left.application_id),
            self.repository.get_liner_info(request.right.application_id),
        )?;

        tracing::debug!(
            "Comparing {} (tpp {}) against {} (tpp {})",
            left_liner.display_name(),
            left_liner.tpp_kpa,
            right_liner.display_name(),
            right_liner.tpp_kpa
        );

        // 3. Engine + aggregation
        let mut result = compare_sides(&left_liner, &left_inputs, &right_liner, &right_inputs);
        result
            .warnings
            .extend(advisories.iter().map(FieldError::to_warning));

        tracing::info!(
            request_id = %request.request_id,
            warnings = result.warnings.len(),
            "Comparison computed"
        );

        Ok(result)
    }

    fn validate(&self, request: &CompareRequest) -> Vec<FieldError> {
        let mut issues = Vec::new();

        if request.schema_version != SCHEMA_VERSION {
            issues.push(FieldError::new(
                "schemaVersion",
                format!("unsupported schema version, expected {}", SCHEMA_VERSION),
            ));
        }

        for (side, side_request) in [("left", &request.left), ("right", &request.right)] {
            if side_request.application_id <= 0 {
                issues.push(FieldError::new(
                    format!("{}.productApplicationId", side),
                    "must be > 0",
                ));
            }
        }

        issues.extend(validate_compare_request(
            &request.left.inputs,
            &request.right.inputs,
            self.pf_om_rule,
        ));
        issues
    }
}

fn require_complete(side: &str, draft: &UserInputsDraft) -> Result<UserInputs, CompareError> {
    draft.complete().ok_or_else(|| CompareError::Validation {
        fields: vec![FieldError::new(format!("{}.inputs", side), "is incomplete")],
    })
}
