//! Approval function
//!
//! Admin decisions on member admission and expert verification. The status
//! change is a single conditioned update; notification, role promotion and
//! audit follow it as best-effort side effects whose outcomes are reported,
//! never raised.

use chrono::Utc;
use serde_json::{json, Map as JsonMap};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use hub_core::entities::{AuditLogEntry, Profile};
use hub_core::error::DomainError;
use hub_core::value_objects::{ApprovalAction, ApprovalStatus, ApprovalTarget, NotificationType};

use crate::dto::requests::required_text;
use crate::dto::{ApprovalData, ApproveMemberRequest};

use super::audit;
use super::context::ServiceContext;
use super::error::ServiceResult;
use super::notification::{NotificationDraft, NotificationService};
use super::outcome::{SideEffect, Transition};

/// What the admin decided
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Approve,
    Reject { reason: String },
}

impl Decision {
    pub fn action(&self) -> ApprovalAction {
        match self {
            Self::Approve => ApprovalAction::Approve,
            Self::Reject { .. } => ApprovalAction::Reject,
        }
    }

    pub fn rejection_reason(&self) -> Option<&str> {
        match self {
            Self::Approve => None,
            Self::Reject { reason } => Some(reason),
        }
    }
}

/// A validated approval request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApprovalCommand {
    Member {
        user_id: Uuid,
        decision: Decision,
    },
    Expert {
        user_id: Uuid,
        expert_profile_id: Uuid,
        decision: Decision,
    },
}

impl ApprovalCommand {
    pub fn user_id(&self) -> Uuid {
        match self {
            Self::Member { user_id, .. } | Self::Expert { user_id, .. } => *user_id,
        }
    }

    pub fn decision(&self) -> &Decision {
        match self {
            Self::Member { decision, .. } | Self::Expert { decision, .. } => decision,
        }
    }

    pub fn target(&self) -> ApprovalTarget {
        match self {
            Self::Member { .. } => ApprovalTarget::Member,
            Self::Expert { .. } => ApprovalTarget::Expert,
        }
    }

    pub fn action(&self) -> ApprovalAction {
        self.decision().action()
    }
}

fn parse_id(field: &'static str, value: Option<String>) -> Result<Uuid, DomainError> {
    let raw = required_text(field, value)?;
    Uuid::parse_str(&raw).map_err(|_| DomainError::InvalidValue { field, value: raw })
}

impl TryFrom<ApproveMemberRequest> for ApprovalCommand {
    type Error = DomainError;

    fn try_from(req: ApproveMemberRequest) -> Result<Self, Self::Error> {
        let user_id = parse_id("userId", req.user_id)?;

        let action = required_text("action", req.action)?;
        let action: ApprovalAction = action
            .parse()
            .map_err(|_| DomainError::InvalidValue { field: "action", value: action })?;

        let target = required_text("target", req.target)?;
        let target: ApprovalTarget = target
            .parse()
            .map_err(|_| DomainError::InvalidValue { field: "target", value: target })?;

        let expert_profile_id = match target {
            ApprovalTarget::Expert => Some(parse_id("expertProfileId", req.expert_profile_id)?),
            ApprovalTarget::Member => None,
        };

        let decision = match action {
            ApprovalAction::Approve => Decision::Approve,
            ApprovalAction::Reject => Decision::Reject {
                reason: required_text("rejectionReason", req.rejection_reason)?,
            },
        };

        Ok(match expert_profile_id {
            Some(expert_profile_id) => Self::Expert {
                user_id,
                expert_profile_id,
                decision,
            },
            None => Self::Member { user_id, decision },
        })
    }
}

/// Everything that happened during one approval call
#[derive(Debug, Clone)]
pub struct ApprovalOutcome {
    pub admin_id: Uuid,
    pub target_user_id: Uuid,
    pub target: ApprovalTarget,
    pub action: ApprovalAction,
    pub transition: Transition,
    /// Expert approvals only
    pub promotion: SideEffect,
    pub notification: SideEffect,
    pub audit: SideEffect,
}

impl ApprovalOutcome {
    pub fn message(&self) -> String {
        if !self.transition.is_applied() {
            return format!("{} already resolved; no changes applied", subject(self.target));
        }
        let verb = match self.action {
            ApprovalAction::Approve => "approved",
            ApprovalAction::Reject => "rejected",
        };
        format!("{} {verb}", subject(self.target))
    }

    pub fn data(&self) -> ApprovalData {
        ApprovalData {
            target_user_id: self.target_user_id,
            target: self.target,
            action: self.action,
            admin_id: self.admin_id,
            applied: self.transition.is_applied(),
        }
    }
}

fn subject(target: ApprovalTarget) -> &'static str {
    match target {
        ApprovalTarget::Member => "Member",
        ApprovalTarget::Expert => "Expert profile",
    }
}

/// Approval service
pub struct ApprovalService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ApprovalService<'a> {
    /// Create a new ApprovalService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Validate a raw payload and apply it
    #[instrument(skip(self, request))]
    pub async fn approve_request(
        &self,
        admin_id: Uuid,
        request: ApproveMemberRequest,
    ) -> ServiceResult<ApprovalOutcome> {
        let admin = self.authorize(admin_id).await?;
        self.approve_request_as(&admin, request).await
    }

    /// Validate a raw payload on behalf of an already authorized admin
    #[instrument(skip(self, admin, request), fields(admin_id = %admin.id))]
    pub async fn approve_request_as(
        &self,
        admin: &Profile,
        request: ApproveMemberRequest,
    ) -> ServiceResult<ApprovalOutcome> {
        let command = ApprovalCommand::try_from(request)?;
        self.apply(admin.id, command).await
    }

    /// Apply a validated decision
    #[instrument(skip(self))]
    pub async fn approve(
        &self,
        admin_id: Uuid,
        command: ApprovalCommand,
    ) -> ServiceResult<ApprovalOutcome> {
        self.authorize(admin_id).await?;
        self.apply(admin_id, command).await
    }

    /// Resolve the caller as an approved admin
    pub async fn authorize(&self, admin_id: Uuid) -> ServiceResult<Profile> {
        match self.ctx.profile_repo().find_by_id(admin_id).await? {
            Some(profile) if profile.is_active_admin() => Ok(profile),
            _ => {
                warn!(%admin_id, "Approval attempted by non-admin");
                Err(DomainError::NotAdmin.into())
            }
        }
    }

    async fn apply(&self, admin_id: Uuid, command: ApprovalCommand) -> ServiceResult<ApprovalOutcome> {
        let target_user_id = command.user_id();

        let (transition, promotion) = match &command {
            ApprovalCommand::Member { user_id, decision } => {
                (self.decide_member(*user_id, decision).await?, SideEffect::Skipped)
            }
            ApprovalCommand::Expert {
                user_id,
                expert_profile_id,
                decision,
            } => {
                let transition = self
                    .decide_expert(admin_id, *user_id, *expert_profile_id, decision)
                    .await?;
                let promotion = if transition.is_applied() && *decision == Decision::Approve {
                    self.promote(*user_id).await
                } else {
                    SideEffect::Skipped
                };
                (transition, promotion)
            }
        };

        info!(
            %admin_id,
            %target_user_id,
            target = %command.target(),
            action = %command.action(),
            ?transition,
            "Approval decision processed"
        );

        let notification = if transition.is_applied() {
            self.notify(&command).await
        } else {
            SideEffect::Skipped
        };

        let audit = audit::record(self.ctx, audit_entry(admin_id, &command, transition)).await;

        Ok(ApprovalOutcome {
            admin_id,
            target_user_id,
            target: command.target(),
            action: command.action(),
            transition,
            promotion,
            notification,
            audit,
        })
    }

    async fn decide_member(&self, user_id: Uuid, decision: &Decision) -> ServiceResult<Transition> {
        let repo = self.ctx.profile_repo();
        if repo.find_by_id(user_id).await?.is_none() {
            return Err(DomainError::ProfileNotFound(user_id).into());
        }

        let to = match decision {
            Decision::Approve => ApprovalStatus::Approved,
            Decision::Reject { .. } => ApprovalStatus::Rejected,
        };
        let rows = repo
            .transition_status(user_id, ApprovalStatus::Pending, to, decision.rejection_reason())
            .await?;

        Ok(Transition::from_rows_affected(rows))
    }

    async fn decide_expert(
        &self,
        admin_id: Uuid,
        user_id: Uuid,
        expert_profile_id: Uuid,
        decision: &Decision,
    ) -> ServiceResult<Transition> {
        let repo = self.ctx.expert_profile_repo();
        let expert = repo
            .find_by_id(expert_profile_id)
            .await?
            .ok_or(DomainError::ExpertProfileNotFound(expert_profile_id))?;
        if !expert.belongs_to(user_id) {
            return Err(DomainError::ExpertProfileMismatch {
                expert_profile_id,
                user_id,
            }
            .into());
        }

        let rows = match decision {
            Decision::Approve => repo.approve(expert_profile_id, admin_id, Utc::now()).await?,
            Decision::Reject { reason } => repo.reject(expert_profile_id, reason).await?,
        };

        Ok(Transition::from_rows_affected(rows))
    }

    async fn promote(&self, user_id: Uuid) -> SideEffect {
        match self.ctx.profile_repo().promote_to_expert(user_id).await {
            Ok(0) => {
                info!(%user_id, "Role left unchanged; profile is not a plain member");
                SideEffect::Skipped
            }
            Ok(_) => SideEffect::Completed,
            Err(e) => {
                warn!(%user_id, error = %e, "Expert role promotion failed");
                SideEffect::Failed(e.to_string())
            }
        }
    }

    async fn notify(&self, command: &ApprovalCommand) -> SideEffect {
        let draft = notification_for(command);
        let result = NotificationService::new(self.ctx).send(draft).await;
        if let Err(e) = &result {
            warn!(user_id = %command.user_id(), error = %e, "Decision notification failed");
        }
        SideEffect::from_result(result)
    }
}

fn notification_for(command: &ApprovalCommand) -> NotificationDraft {
    let kind = NotificationType::for_decision(command.target(), command.action());
    let title = match kind {
        NotificationType::MemberApproved => "Your membership has been approved",
        NotificationType::MemberRejected => "Your membership application was declined",
        NotificationType::ExpertApproved => "Your expert profile has been verified",
        NotificationType::ExpertRejected | NotificationType::System => {
            "Your expert application was declined"
        }
    };
    let body = match command.decision() {
        Decision::Approve => match command.target() {
            ApprovalTarget::Member => "You now have full access to the hub.".to_string(),
            ApprovalTarget::Expert => "Your expert profile is now visible to members.".to_string(),
        },
        Decision::Reject { reason } => format!("Reason: {reason}"),
    };

    let draft = NotificationDraft::new(command.user_id(), kind, title)
        .body(body)
        .metadata(JsonMap::from_iter([
            ("action".to_string(), json!(command.action())),
            ("target".to_string(), json!(command.target())),
        ]));

    match command {
        ApprovalCommand::Member { user_id, .. } => draft.reference("profile", user_id.to_string()),
        ApprovalCommand::Expert {
            expert_profile_id, ..
        } => draft.reference("expert_profile", expert_profile_id.to_string()),
    }
}

fn audit_entry(admin_id: Uuid, command: &ApprovalCommand, transition: Transition) -> AuditLogEntry {
    let target = command.target();
    let mut details = json!({
        "applied": transition.is_applied(),
        "rejection_reason": command.decision().rejection_reason(),
    });
    if let ApprovalCommand::Expert {
        expert_profile_id, ..
    } = command
    {
        details["expert_profile_id"] = json!(expert_profile_id);
    }

    AuditLogEntry::new(
        format!("{target}_approval"),
        admin_id,
        command.user_id(),
        target.as_str(),
    )
    .with_approval_action(command.action().as_str())
    .with_details(details)
}
