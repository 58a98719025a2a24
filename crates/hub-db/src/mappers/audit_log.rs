//! Audit log entity <-> model mapper

use hub_core::entities::AuditLogEntry;

use crate::models::AuditLogModel;

impl From<AuditLogModel> for AuditLogEntry {
    fn from(model: AuditLogModel) -> Self {
        AuditLogEntry {
            id: model.id,
            action: model.action,
            admin_id: model.admin_id,
            target_user_id: model.target_user_id,
            target_type: model.target_type,
            approval_action: model.approval_action,
            details: model.details,
            created_at: model.created_at,
        }
    }
}
