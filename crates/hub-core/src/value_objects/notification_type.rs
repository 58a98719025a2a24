//! Notification kinds

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{ApprovalAction, ApprovalTarget, ParseEnumError};

/// Closed set of events a user can be notified about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationType {
    MemberApproved,
    MemberRejected,
    ExpertApproved,
    ExpertRejected,
    System,
}

impl NotificationType {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::MemberApproved => "member_approved",
            Self::MemberRejected => "member_rejected",
            Self::ExpertApproved => "expert_approved",
            Self::ExpertRejected => "expert_rejected",
            Self::System => "system",
        }
    }

    /// Notification sent to the affected user for an admin decision
    pub const fn for_decision(target: ApprovalTarget, action: ApprovalAction) -> Self {
        match (target, action) {
            (ApprovalTarget::Member, ApprovalAction::Approve) => Self::MemberApproved,
            (ApprovalTarget::Member, ApprovalAction::Reject) => Self::MemberRejected,
            (ApprovalTarget::Expert, ApprovalAction::Approve) => Self::ExpertApproved,
            (ApprovalTarget::Expert, ApprovalAction::Reject) => Self::ExpertRejected,
        }
    }
}

impl fmt::Display for NotificationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NotificationType {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "member_approved" => Ok(Self::MemberApproved),
            "member_rejected" => Ok(Self::MemberRejected),
            "expert_approved" => Ok(Self::ExpertApproved),
            "expert_rejected" => Ok(Self::ExpertRejected),
            "system" => Ok(Self::System),
            other => Err(ParseEnumError::new("notification type", other)),
        }
    }
}
