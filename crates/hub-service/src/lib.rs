//! # hub-service
//!
//! Application layer containing the sign-in callback router, the approval and
//! notification functions, onboarding, and member administration.

pub mod dto;
pub mod services;

pub use services::{
    ApprovalService, CallbackRequest, CallbackService, MemberAdminService, NotificationService,
    ProfileService, ServiceContext, ServiceContextBuilder, ServiceError, ServiceResult, SiteRoutes,
};
