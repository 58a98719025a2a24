//! Data transfer objects for API requests and responses
//!
//! This module provides:
//! - Request DTOs, either validated with `validator` or parsed field by field
//!   where a missing field must be named in the error
//! - Response DTOs for serializing API outputs

pub mod requests;
pub mod responses;

// Re-export commonly used request types
pub use requests::{
    ApproveMemberRequest, CallbackQuery, OnboardingRequest, SendNotificationRequest,
};

// Re-export commonly used response types
pub use responses::{
    ApprovalData, DeletedMemberData, FunctionResponse, HealthChecks, HealthResponse,
    NotificationResponse, ProfileResponse, ReadinessResponse,
};
