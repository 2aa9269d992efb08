// Errors surfaced by a comparison request
use crate::application::liner_repository::LinerLookupError;
use crate::domain::liner::{ApplicationId, DerivedFact};
use crate::domain::validation::FieldError;

#[derive(Debug, thiserror::Error)]
pub enum CompareError {
    #[error("Invalid inputs ({} field errors)", .fields.len())]
    Validation { fields: Vec<FieldError> },

    #[error("ProductApplication {application_id} not found")]
    NotFound { application_id: ApplicationId },

    #[error("Missing {fact} for productApplicationId={application_id}")]
    MissingDerivedData {
        application_id: ApplicationId,
        fact: DerivedFact,
    },

    #[error(transparent)]
    Upstream(#[from] anyhow::Error),
}

impl CompareError {
    /// Only upstream failures are the service's fault; the rest are client-visible outcomes.
    pub fn is_server_fault(&self) -> bool {
        matches!(self, CompareError::Upstream(_))
    }
}

impl From<LinerLookupError> for CompareError {
    fn from(err: LinerLookupError) -> Self {
        match err {
            LinerLookupError::NotFound { application_id } => {
                CompareError::NotFound { application_id }
            }
            LinerLookupError::MissingData {
                application_id,
                fact,
            } => CompareError::MissingDerivedData {
                application_id,
                fact,
            },
            LinerLookupError::Upstream(e) => CompareError::Upstream(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::liner::MetricCode;

    #[test]
    fn test_lookup_errors_keep_their_kind() {
        let err: CompareError = LinerLookupError::NotFound { application_id: 9 }.into();
        assert!(matches!(err, CompareError::NotFound { application_id: 9 }));
        assert_eq!(err.to_string(), "ProductApplication 9 not found");

        let err: CompareError = LinerLookupError::MissingData {
            application_id: 4,
            fact: DerivedFact::Intensity(MetricCode::AvgOvermilk),
        }
        .into();
        assert_eq!(
            err.to_string(),
            "Missing metric AVG_OVERMILK for productApplicationId=4"
        );

        let err: CompareError =
            LinerLookupError::Upstream(anyhow::anyhow!("connection refused")).into();
        assert!(matches!(err, CompareError::Upstream(_)));
        assert!(err.is_server_fault());
    }

    #[test]
    fn test_validation_message_counts_fields() {
        let err = CompareError::Validation {
            fields: vec![FieldError::new("a", "b"), FieldError::new("c", "d")],
        };
        assert_eq!(err.to_string(), "Invalid inputs (2 field errors)");
    }
}
