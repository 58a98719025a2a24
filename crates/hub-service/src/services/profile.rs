//! Profile service
//!
//! Reads the caller's own profile and records onboarding answers.

use tracing::{info, instrument};
use uuid::Uuid;

use hub_core::entities::Profile;
use hub_core::error::DomainError;

use crate::dto::{OnboardingRequest, ProfileResponse};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Profile service
pub struct ProfileService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ProfileService<'a> {
    /// Create a new ProfileService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Get the caller's profile
    #[instrument(skip(self))]
    pub async fn get_me(&self, user_id: Uuid) -> ServiceResult<ProfileResponse> {
        let profile = self.load(user_id).await?;
        Ok(ProfileResponse::from(&profile))
    }

    /// Store onboarding answers and mark onboarding complete.
    ///
    /// Resubmitting overwrites the previous answers; approval status is
    /// left alone.
    #[instrument(skip(self, request))]
    pub async fn complete_onboarding(
        &self,
        user_id: Uuid,
        request: OnboardingRequest,
    ) -> ServiceResult<ProfileResponse> {
        let answers = request.into_answers()?;

        let rows = self
            .ctx
            .profile_repo()
            .complete_onboarding(user_id, &answers)
            .await?;
        if rows == 0 {
            return Err(DomainError::ProfileNotFound(user_id).into());
        }

        info!(%user_id, region = %answers.region, "Onboarding completed");

        let profile = self.load(user_id).await?;
        Ok(ProfileResponse::from(&profile))
    }

    async fn load(&self, user_id: Uuid) -> ServiceResult<Profile> {
        self.ctx
            .profile_repo()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| DomainError::ProfileNotFound(user_id).into())
    }
}
