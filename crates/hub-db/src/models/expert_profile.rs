//! Expert profile database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for expert_profiles table
#[derive(Debug, Clone, FromRow)]
pub struct ExpertProfileModel {
    pub id: Uuid,
    pub user_id: Uuid,
    pub status: String,
    pub verified_at: Option<DateTime<Utc>>,
    pub verified_by: Option<Uuid>,
    pub rejection_reason: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ExpertProfileModel {
    #[inline]
    pub fn is_verified(&self) -> bool {
        self.verified_at.is_some()
    }
}
