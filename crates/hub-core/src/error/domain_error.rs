//! Domain errors - error types for the domain layer

use thiserror::Error;
use uuid::Uuid;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("Profile not found: {0}")]
    ProfileNotFound(Uuid),

    #[error("Expert profile not found: {0}")]
    ExpertProfileNotFound(Uuid),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: &'static str, value: String },

    #[error("Expert profile {expert_profile_id} does not belong to user {user_id}")]
    ExpertProfileMismatch { expert_profile_id: Uuid, user_id: Uuid },

    // =========================================================================
    // Authentication Errors
    // =========================================================================
    #[error("Authorization code exchange failed: {0}")]
    CodeExchangeFailed(String),

    // =========================================================================
    // Authorization Errors
    // =========================================================================
    #[error("Admin privileges required")]
    NotAdmin,

    #[error("Cannot delete your own account")]
    CannotDeleteSelf,

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Profile already exists: {0}")]
    ProfileAlreadyExists(Uuid),

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Identity provider error: {0}")]
    IdentityProviderError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::ProfileNotFound(_) => "UNKNOWN_PROFILE",
            Self::ExpertProfileNotFound(_) => "UNKNOWN_EXPERT_PROFILE",

            // Validation
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::MissingField(_) => "MISSING_FIELD",
            Self::InvalidValue { .. } => "INVALID_VALUE",
            Self::ExpertProfileMismatch { .. } => "EXPERT_PROFILE_MISMATCH",

            // Authentication
            Self::CodeExchangeFailed(_) => "CODE_EXCHANGE_FAILED",

            // Authorization
            Self::NotAdmin => "ADMIN_REQUIRED",
            Self::CannotDeleteSelf => "CANNOT_DELETE_SELF",

            // Conflict
            Self::ProfileAlreadyExists(_) => "PROFILE_ALREADY_EXISTS",

            // Infrastructure
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::IdentityProviderError(_) => "IDENTITY_PROVIDER_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::ProfileNotFound(_) | Self::ExpertProfileNotFound(_)
        )
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ValidationError(_)
                | Self::MissingField(_)
                | Self::InvalidValue { .. }
                | Self::ExpertProfileMismatch { .. }
        )
    }

    /// Check if this is an authentication error
    pub fn is_authentication(&self) -> bool {
        matches!(self, Self::CodeExchangeFailed(_))
    }

    /// Check if this is an authorization error
    pub fn is_authorization(&self) -> bool {
        matches!(self, Self::NotAdmin | Self::CannotDeleteSelf)
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::ProfileAlreadyExists(_))
    }
}
