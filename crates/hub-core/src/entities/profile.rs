//! Profile entity - the application record extending an identity

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::value_objects::{ApprovalStatus, Role};

/// Profile entity, one per authenticated identity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    /// Equal to the identity subject id
    pub id: Uuid,
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub avatar_url: Option<String>,
    pub company_name: Option<String>,
    pub role: Role,
    pub approval_status: ApprovalStatus,
    pub onboarding_completed: bool,
    pub rejection_reason: Option<String>,
    pub region: Option<String>,
    pub industry: Option<String>,
    pub level: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Descriptive fields known about an identity before its profile exists
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileSeed {
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub avatar_url: Option<String>,
    pub company_name: Option<String>,
}

/// Answers submitted on the onboarding form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OnboardingAnswers {
    pub region: String,
    pub industry: String,
    pub level: String,
    pub company_name: Option<String>,
}

impl Profile {
    /// Create a fresh profile: member, pending, onboarding not done
    pub fn new(id: Uuid, seed: ProfileSeed) -> Self {
        let now = Utc::now();
        Self {
            id,
            email: seed.email,
            full_name: seed.full_name,
            avatar_url: seed.avatar_url,
            company_name: seed.company_name,
            role: Role::Member,
            approval_status: ApprovalStatus::Pending,
            onboarding_completed: false,
            rejection_reason: None,
            region: None,
            industry: None,
            level: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[inline]
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    #[inline]
    pub fn is_approved(&self) -> bool {
        self.approval_status.is_approved()
    }

    /// Admin role that is also admitted; required for privileged operations
    pub fn is_active_admin(&self) -> bool {
        self.is_admin() && self.is_approved()
    }

    #[inline]
    pub fn needs_onboarding(&self) -> bool {
        !self.onboarding_completed
    }
}
