//! Repository traits (ports) - define the interface for data access
//!
//! These traits follow the Repository pattern from Domain-Driven Design.
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation.
//!
//! State transitions are conditioned updates: they only take effect when the
//! row's current status matches the expected one, and report the number of
//! rows affected. Zero means another writer already resolved the row.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::entities::{AuditLogEntry, ExpertProfile, Notification, OnboardingAnswers, Profile};
use crate::error::DomainError;
use crate::value_objects::ApprovalStatus;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// Profile Repository
// ============================================================================

#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Find profile by identity id
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Profile>>;

    /// Insert a new profile
    ///
    /// Fails with `DomainError::ProfileAlreadyExists` when a row for the id
    /// is already present.
    async fn create(&self, profile: &Profile) -> RepoResult<()>;

    /// Move `approval_status` from `from` to `to`, only if it is currently `from`
    ///
    /// `rejection_reason` is written alongside the status.
    async fn transition_status(
        &self,
        id: Uuid,
        from: ApprovalStatus,
        to: ApprovalStatus,
        rejection_reason: Option<&str>,
    ) -> RepoResult<u64>;

    /// Set `approval_status = approved` unless it already is
    async fn auto_approve(&self, id: Uuid) -> RepoResult<u64>;

    /// Promote a `member` to `expert`; other roles are left untouched
    async fn promote_to_expert(&self, id: Uuid) -> RepoResult<u64>;

    /// Store onboarding answers and mark onboarding completed
    async fn complete_onboarding(&self, id: Uuid, answers: &OnboardingAnswers) -> RepoResult<u64>;

    /// Hard delete a profile
    async fn delete(&self, id: Uuid) -> RepoResult<u64>;
}

// ============================================================================
// Expert Profile Repository
// ============================================================================

#[async_trait]
pub trait ExpertProfileRepository: Send + Sync {
    /// Find expert application by ID
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<ExpertProfile>>;

    /// Approve an application still in `pending_review`
    async fn approve(&self, id: Uuid, verified_by: Uuid, verified_at: DateTime<Utc>) -> RepoResult<u64>;

    /// Reject an application still in `pending_review`
    async fn reject(&self, id: Uuid, reason: &str) -> RepoResult<u64>;
}

// ============================================================================
// Notification Repository
// ============================================================================

#[async_trait]
pub trait NotificationRepository: Send + Sync {
    /// Insert a notification
    async fn create(&self, notification: &Notification) -> RepoResult<()>;
}

// ============================================================================
// Audit Log Repository
// ============================================================================

#[async_trait]
pub trait AuditLogRepository: Send + Sync {
    /// Append an entry; entries are never updated
    async fn append(&self, entry: &AuditLogEntry) -> RepoResult<()>;
}
