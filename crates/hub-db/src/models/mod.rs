//! Database models - SQLx-compatible structs for PostgreSQL tables

mod audit_log;
mod expert_profile;
mod notification;
mod profile;

pub use audit_log::AuditLogModel;
pub use expert_profile::ExpertProfileModel;
pub use notification::NotificationModel;
pub use profile::ProfileModel;
