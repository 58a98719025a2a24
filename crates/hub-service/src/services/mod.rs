//! Business logic services
//!
//! Each service borrows the shared [`ServiceContext`] for the duration of one
//! request and orchestrates repositories and identity ports.

pub mod approval;
mod audit;
pub mod callback;
pub mod context;
pub mod error;
pub mod member_admin;
pub mod notification;
pub mod outcome;
pub mod profile;
pub mod redirect;

#[cfg(test)]
pub(crate) mod testing;

// Re-export all services for convenience
pub use approval::{ApprovalCommand, ApprovalOutcome, ApprovalService, Decision};
pub use callback::{CallbackOutcome, CallbackRequest, CallbackService};
pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use member_admin::MemberAdminService;
pub use notification::{NotificationDraft, NotificationService};
pub use outcome::{SideEffect, Transition};
pub use profile::ProfileService;
pub use redirect::{Destination, Locale, SiteRoutes, FALLBACK_NEXT_PATH};
