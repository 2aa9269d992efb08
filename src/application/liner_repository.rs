// Repository trait for liner lab facts
use crate::domain::liner::{ApplicationId, DerivedFact, LinerInfo};
use async_trait::async_trait;

#[derive(Debug, thiserror::Error)]
pub enum LinerLookupError {
    #[error("ProductApplication {application_id} not found")]
    NotFound { application_id: ApplicationId },

    /// The application exists but the lab subsystem has not produced the fact yet.
    #[error("Missing {fact} for productApplicationId={application_id}")]
    MissingData {
        application_id: ApplicationId,
        fact: DerivedFact,
    },

    #[error(transparent)]
    Upstream(#[from] anyhow::Error),
}

#[async_trait]
pub trait LinerRepository: Send + Sync {
    /// Latest TPP value and massage intensities for a product application
    async fn get_liner_info(
        &self,
        application_id: ApplicationId,
    ) -> Result<LinerInfo, LinerLookupError>;
}
