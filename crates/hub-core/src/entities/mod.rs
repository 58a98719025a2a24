//! Domain entities - core business objects

mod audit_log;
mod expert_profile;
mod notification;
mod profile;

pub use audit_log::AuditLogEntry;
pub use expert_profile::ExpertProfile;
pub use notification::Notification;
pub use profile::{OnboardingAnswers, Profile, ProfileSeed};
