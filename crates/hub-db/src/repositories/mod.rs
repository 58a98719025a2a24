//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in hub-core.
//! Status changes are single conditioned UPDATE statements; callers read the
//! affected row count to learn whether their transition won.

mod audit_log;
mod error;
mod expert_profile;
mod notification;
mod profile;

pub use audit_log::PgAuditLogRepository;
pub use expert_profile::PgExpertProfileRepository;
pub use notification::PgNotificationRepository;
pub use profile::PgProfileRepository;
