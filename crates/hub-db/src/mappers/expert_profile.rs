//! Expert profile entity <-> model mapper

use hub_core::entities::ExpertProfile;
use hub_core::error::DomainError;

use super::corrupt_column;
use crate::models::ExpertProfileModel;

impl TryFrom<ExpertProfileModel> for ExpertProfile {
    type Error = DomainError;

    fn try_from(model: ExpertProfileModel) -> Result<Self, Self::Error> {
        Ok(ExpertProfile {
            id: model.id,
            user_id: model.user_id,
            status: model.status.parse().map_err(corrupt_column)?,
            verified_at: model.verified_at,
            verified_by: model.verified_by,
            rejection_reason: model.rejection_reason,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}
