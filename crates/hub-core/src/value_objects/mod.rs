//! Value objects - immutable types that represent domain concepts

mod approval;
mod notification_type;
mod role;
mod status;

pub use approval::{ApprovalAction, ApprovalTarget};
pub use notification_type::NotificationType;
pub use role::Role;
pub use status::{ApprovalStatus, ExpertStatus};

/// Error returned when a stored or submitted string is not a known enum value
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid {kind}: {value}")]
pub struct ParseEnumError {
    pub kind: &'static str,
    pub value: String,
}

impl ParseEnumError {
    pub(crate) fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}
