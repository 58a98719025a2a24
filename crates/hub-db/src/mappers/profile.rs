//! Profile entity <-> model mapper

use hub_core::entities::Profile;
use hub_core::error::DomainError;

use super::corrupt_column;
use crate::models::ProfileModel;

impl TryFrom<ProfileModel> for Profile {
    type Error = DomainError;

    fn try_from(model: ProfileModel) -> Result<Self, Self::Error> {
        Ok(Profile {
            id: model.id,
            email: model.email,
            full_name: model.full_name,
            avatar_url: model.avatar_url,
            company_name: model.company_name,
            role: model.role.parse().map_err(corrupt_column)?,
            approval_status: model.approval_status.parse().map_err(corrupt_column)?,
            onboarding_completed: model.onboarding_completed,
            rejection_reason: model.rejection_reason,
            region: model.region,
            industry: model.industry,
            level: model.level,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}
