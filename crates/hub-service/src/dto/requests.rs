//! Request DTOs for API endpoints
//!
//! Function payloads keep every field optional so the service can name the
//! one that is missing; `OnboardingRequest` uses `Validate` like the rest of
//! the REST surface.

use serde::Deserialize;
use serde_json::Value as JsonValue;
use validator::Validate;

use hub_core::entities::OnboardingAnswers;
use hub_core::error::DomainError;

// ============================================================================
// Auth
// ============================================================================

/// Query string of the provider redirect
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CallbackQuery {
    pub code: Option<String>,
    pub error: Option<String>,
    pub error_description: Option<String>,
    pub next: Option<String>,
}

// ============================================================================
// Functions
// ============================================================================

/// Raw approval payload, converted into an `ApprovalCommand` before dispatch
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApproveMemberRequest {
    pub user_id: Option<String>,
    pub action: Option<String>,
    pub target: Option<String>,
    pub rejection_reason: Option<String>,
    pub expert_profile_id: Option<String>,
}

/// Notification payload
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendNotificationRequest {
    pub user_id: Option<String>,
    #[serde(rename = "type")]
    pub notification_type: Option<String>,
    pub title: Option<String>,
    pub body: Option<String>,
    pub reference_type: Option<String>,
    pub reference_id: Option<String>,
    pub metadata: Option<JsonValue>,
}

// ============================================================================
// Profile
// ============================================================================

/// Onboarding answers submitted from the signup flow
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingRequest {
    #[validate(length(min = 1, max = 100, message = "Region must be 1-100 characters"))]
    pub region: String,

    #[validate(length(min = 1, max = 100, message = "Industry must be 1-100 characters"))]
    pub industry: String,

    #[validate(length(min = 1, max = 100, message = "Level must be 1-100 characters"))]
    pub level: String,

    #[validate(length(max = 100, message = "Company name must be at most 100 characters"))]
    pub company_name: Option<String>,
}

impl OnboardingRequest {
    /// Trim the answers; blank required answers are rejected
    pub fn into_answers(self) -> Result<OnboardingAnswers, DomainError> {
        fn required(field: &'static str, value: String) -> Result<String, DomainError> {
            let trimmed = value.trim();
            if trimmed.is_empty() {
                Err(DomainError::MissingField(field))
            } else {
                Ok(trimmed.to_string())
            }
        }

        Ok(OnboardingAnswers {
            region: required("region", self.region)?,
            industry: required("industry", self.industry)?,
            level: required("level", self.level)?,
            company_name: self
                .company_name
                .map(|c| c.trim().to_string())
                .filter(|c| !c.is_empty()),
        })
    }
}

/// Take a required text field, treating blank as missing
pub(crate) fn required_text(
    field: &'static str,
    value: Option<String>,
) -> Result<String, DomainError> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or(DomainError::MissingField(field))
}
