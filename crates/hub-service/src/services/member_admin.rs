//! Admin member management

use serde_json::json;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use hub_core::entities::AuditLogEntry;
use hub_core::error::DomainError;

use crate::dto::DeletedMemberData;

use super::audit;
use super::context::ServiceContext;
use super::error::ServiceResult;

const DELETION_ACTION: &str = "member_deletion";

/// Member management for approved admins
pub struct MemberAdminService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> MemberAdminService<'a> {
    /// Create a new MemberAdminService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Delete a member's identity and profile.
    ///
    /// The identity goes first; the provider may cascade the profile row
    /// away, so a missing row afterwards is not an error.
    #[instrument(skip(self))]
    pub async fn delete_member(
        &self,
        caller_id: Uuid,
        target_id: Uuid,
    ) -> ServiceResult<DeletedMemberData> {
        let profiles = self.ctx.profile_repo();

        let caller = profiles.find_by_id(caller_id).await?;
        if !caller.as_ref().is_some_and(|p| p.is_active_admin()) {
            warn!(%caller_id, "Member deletion attempted by non-admin");
            return Err(DomainError::NotAdmin.into());
        }
        if caller_id == target_id {
            return Err(DomainError::CannotDeleteSelf.into());
        }

        let target = profiles
            .find_by_id(target_id)
            .await?
            .ok_or(DomainError::ProfileNotFound(target_id))?;

        self.ctx.identity_admin().delete_identity(target_id).await?;

        let removed = profiles.delete(target_id).await?;
        info!(%caller_id, %target_id, profile_rows = removed, "Member deleted");

        let entry = AuditLogEntry::new(DELETION_ACTION, caller_id, target_id, "member").with_details(
            json!({
                "email": target.email,
                "role": target.role,
                "approval_status": target.approval_status,
            }),
        );
        audit::record(self.ctx, entry).await;

        Ok(DeletedMemberData {
            user_id: target_id,
            admin_id: caller_id,
        })
    }
}
