//! Ports - traits the infrastructure layer implements

mod identity;
mod repositories;

pub use identity::{AuthSession, Identity, IdentityAdmin, IdentityMetadata, IdentityProvider};
pub use repositories::{
    AuditLogRepository, ExpertProfileRepository, NotificationRepository, ProfileRepository,
    RepoResult,
};
