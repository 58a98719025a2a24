//! Expert application entity

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::value_objects::ExpertStatus;

/// Expert application attached to a profile
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpertProfile {
    pub id: Uuid,
    pub user_id: Uuid,
    pub status: ExpertStatus,
    /// Set together with `verified_by`, only on approval
    pub verified_at: Option<DateTime<Utc>>,
    pub verified_by: Option<Uuid>,
    pub rejection_reason: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ExpertProfile {
    /// Create a new application awaiting review
    pub fn new(id: Uuid, user_id: Uuid) -> Self {
        let now = Utc::now();
        Self {
            id,
            user_id,
            status: ExpertStatus::PendingReview,
            verified_at: None,
            verified_by: None,
            rejection_reason: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[inline]
    pub fn belongs_to(&self, user_id: Uuid) -> bool {
        self.user_id == user_id
    }
}
