//! Best-effort audit trail

use hub_core::entities::AuditLogEntry;
use tracing::{debug, warn};

use super::context::ServiceContext;
use super::outcome::SideEffect;

/// Append an audit entry; failures are logged and reported, never raised
pub(crate) async fn record(ctx: &ServiceContext, entry: AuditLogEntry) -> SideEffect {
    let result = ctx.audit_log_repo().append(&entry).await;
    if let Err(e) = &result {
        warn!(
            action = %entry.action,
            admin_id = %entry.admin_id,
            target_user_id = %entry.target_user_id,
            error = %e,
            "Failed to write audit entry"
        );
    } else {
        debug!(action = %entry.action, target_user_id = %entry.target_user_id, "Audit entry written");
    }
    SideEffect::from_result(result)
}
