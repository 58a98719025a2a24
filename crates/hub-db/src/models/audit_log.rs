//! Audit log database model

use chrono::{DateTime, Utc};
use serde_json::Value as JsonValue;
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for audit_logs table
#[derive(Debug, Clone, FromRow)]
pub struct AuditLogModel {
    pub id: Uuid,
    pub action: String,
    pub admin_id: Uuid,
    pub target_user_id: Uuid,
    pub target_type: String,
    pub approval_action: Option<String>,
    pub details: JsonValue,
    pub created_at: DateTime<Utc>,
}
