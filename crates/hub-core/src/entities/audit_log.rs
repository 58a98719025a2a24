//! Audit trail entry for privileged admin actions

use chrono::{DateTime, Utc};
use serde_json::Value as JsonValue;
use uuid::Uuid;

/// Append-only record of an admin action
#[derive(Debug, Clone, PartialEq)]
pub struct AuditLogEntry {
    pub id: Uuid,
    /// Action name, e.g. `member_approval` or `member_deletion`
    pub action: String,
    pub admin_id: Uuid,
    pub target_user_id: Uuid,
    pub target_type: String,
    pub approval_action: Option<String>,
    pub details: JsonValue,
    pub created_at: DateTime<Utc>,
}

impl AuditLogEntry {
    pub fn new(
        action: impl Into<String>,
        admin_id: Uuid,
        target_user_id: Uuid,
        target_type: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            action: action.into(),
            admin_id,
            target_user_id,
            target_type: target_type.into(),
            approval_action: None,
            details: JsonValue::Object(serde_json::Map::new()),
            created_at: Utc::now(),
        }
    }

    pub fn with_approval_action(mut self, action: impl Into<String>) -> Self {
        self.approval_action = Some(action.into());
        self
    }

    pub fn with_details(mut self, details: JsonValue) -> Self {
        self.details = details;
        self
    }
}
