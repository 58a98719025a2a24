//! Response DTOs for API endpoints
//!
//! Function endpoints answer with the `{ success, message, data }` envelope;
//! records are serialized with their stored field names.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value as JsonValue;
use uuid::Uuid;

use hub_core::entities::{Notification, Profile};
use hub_core::value_objects::{
    ApprovalAction, ApprovalStatus, ApprovalTarget, NotificationType, Role,
};

// ============================================================================
// Envelope
// ============================================================================

/// Success envelope of the function endpoints
#[derive(Debug, Serialize)]
pub struct FunctionResponse<T> {
    pub success: bool,
    pub message: String,
    pub data: T,
}

impl<T> FunctionResponse<T> {
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data,
        }
    }
}

// ============================================================================
// Approval
// ============================================================================

/// Echo of an approval decision
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApprovalData {
    pub target_user_id: Uuid,
    pub target: ApprovalTarget,
    pub action: ApprovalAction,
    pub admin_id: Uuid,
    /// False when the row had already been resolved
    pub applied: bool,
}

/// Echo of a member deletion
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletedMemberData {
    pub user_id: Uuid,
    pub admin_id: Uuid,
}

// ============================================================================
// Notification
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct NotificationResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    #[serde(rename = "type")]
    pub notification_type: NotificationType,
    pub title: String,
    pub body: Option<String>,
    pub reference_type: Option<String>,
    pub reference_id: Option<String>,
    pub metadata: JsonValue,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

impl From<&Notification> for NotificationResponse {
    fn from(n: &Notification) -> Self {
        Self {
            id: n.id,
            user_id: n.user_id,
            notification_type: n.notification_type,
            title: n.title.clone(),
            body: n.body.clone(),
            reference_type: n.reference_type.clone(),
            reference_id: n.reference_id.clone(),
            metadata: n.metadata.clone(),
            is_read: n.is_read,
            created_at: n.created_at,
        }
    }
}

// ============================================================================
// Profile
// ============================================================================

/// The caller's own profile
#[derive(Debug, Clone, Serialize)]
pub struct ProfileResponse {
    pub id: Uuid,
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub avatar_url: Option<String>,
    pub company_name: Option<String>,
    pub role: Role,
    pub approval_status: ApprovalStatus,
    pub onboarding_completed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejection_reason: Option<String>,
    pub region: Option<String>,
    pub industry: Option<String>,
    pub level: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Profile> for ProfileResponse {
    fn from(p: &Profile) -> Self {
        Self {
            id: p.id,
            email: p.email.clone(),
            full_name: p.full_name.clone(),
            avatar_url: p.avatar_url.clone(),
            company_name: p.company_name.clone(),
            role: p.role,
            approval_status: p.approval_status,
            onboarding_completed: p.onboarding_completed,
            rejection_reason: p.rejection_reason.clone(),
            region: p.region.clone(),
            industry: p.industry.clone(),
            level: p.level.clone(),
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

// ============================================================================
// Health Responses
// ============================================================================

/// Basic health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Readiness check response
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub checks: HealthChecks,
}

/// Health check status for each dependency
#[derive(Debug, Clone, Serialize)]
pub struct HealthChecks {
    pub database: String,
}

impl ReadinessResponse {
    pub fn ready(database_healthy: bool) -> Self {
        Self {
            status: if database_healthy { "ready" } else { "not_ready" }.to_string(),
            timestamp: Utc::now(),
            checks: HealthChecks {
                database: if database_healthy { "healthy" } else { "unhealthy" }.to_string(),
            },
        }
    }

    pub fn is_ready(&self) -> bool {
        self.status == "ready"
    }
}
