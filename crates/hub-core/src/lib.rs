//! # hub-core
//!
//! Domain layer containing entities, value objects, repository traits, and identity ports.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    AuditLogEntry, ExpertProfile, Notification, OnboardingAnswers, Profile, ProfileSeed,
};
pub use error::DomainError;
pub use traits::{
    AuditLogRepository, AuthSession, ExpertProfileRepository, Identity, IdentityAdmin,
    IdentityMetadata, IdentityProvider, NotificationRepository, ProfileRepository, RepoResult,
};
pub use value_objects::{
    ApprovalAction, ApprovalStatus, ApprovalTarget, ExpertStatus, NotificationType,
    ParseEnumError, Role,
};
