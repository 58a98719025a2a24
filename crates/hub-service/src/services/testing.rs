//! In-memory ports for service tests

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use hub_common::auth::{JwtService, AUTHENTICATED_AUDIENCE};
use hub_core::entities::{
    AuditLogEntry, ExpertProfile, Notification, OnboardingAnswers, Profile, ProfileSeed,
};
use hub_core::error::DomainError;
use hub_core::traits::{
    AuditLogRepository, AuthSession, ExpertProfileRepository, Identity, IdentityAdmin,
    IdentityMetadata, IdentityProvider, NotificationRepository, ProfileRepository, RepoResult,
};
use hub_core::value_objects::{ApprovalStatus, ExpertStatus, Role};

use super::context::{ServiceContext, ServiceContextBuilder};
use super::redirect::SiteRoutes;

pub const ORIGIN: &str = "https://hub.example.com";

fn db_down() -> DomainError {
    DomainError::DatabaseError("connection refused".to_string())
}

// ============================================================================
// Profiles
// ============================================================================

#[derive(Default)]
pub struct InMemoryProfiles {
    rows: Mutex<HashMap<Uuid, Profile>>,
    finds: AtomicUsize,
    /// Row a database trigger is about to commit: it appears on the given find
    delayed: Mutex<Option<(usize, Profile)>>,
    /// Row the trigger commits just before our fallback insert runs
    racing_trigger: Mutex<Option<Profile>>,
    pub fail_find: AtomicBool,
    pub fail_create: AtomicBool,
    pub fail_auto_approve: AtomicBool,
    pub fail_promote: AtomicBool,
    pub fail_transition: AtomicBool,
}

impl InMemoryProfiles {
    pub fn insert(&self, profile: Profile) {
        self.rows.lock().unwrap().insert(profile.id, profile);
    }

    pub fn get(&self, id: Uuid) -> Option<Profile> {
        self.rows.lock().unwrap().get(&id).cloned()
    }

    pub fn find_count(&self) -> usize {
        self.finds.load(Ordering::SeqCst)
    }

    pub fn appear_on_find(&self, nth: usize, profile: Profile) {
        *self.delayed.lock().unwrap() = Some((nth, profile));
    }

    pub fn race_insert_with(&self, profile: Profile) {
        *self.racing_trigger.lock().unwrap() = Some(profile);
    }
}

#[async_trait]
impl ProfileRepository for InMemoryProfiles {
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Profile>> {
        let n = self.finds.fetch_add(1, Ordering::SeqCst) + 1;
        if self.fail_find.load(Ordering::SeqCst) {
            return Err(db_down());
        }
        let mut delayed = self.delayed.lock().unwrap();
        if delayed.as_ref().is_some_and(|(nth, _)| n >= *nth) {
            if let Some((_, profile)) = delayed.take() {
                self.insert(profile);
            }
        }
        Ok(self.get(id))
    }

    async fn create(&self, profile: &Profile) -> RepoResult<()> {
        if let Some(row) = self.racing_trigger.lock().unwrap().take() {
            self.insert(row);
        }
        if self.fail_create.load(Ordering::SeqCst) {
            return Err(db_down());
        }
        let mut rows = self.rows.lock().unwrap();
        if rows.contains_key(&profile.id) {
            return Err(DomainError::ProfileAlreadyExists(profile.id));
        }
        rows.insert(profile.id, profile.clone());
        Ok(())
    }

    async fn transition_status(
        &self,
        id: Uuid,
        from: ApprovalStatus,
        to: ApprovalStatus,
        rejection_reason: Option<&str>,
    ) -> RepoResult<u64> {
        if self.fail_transition.load(Ordering::SeqCst) {
            return Err(db_down());
        }
        let mut rows = self.rows.lock().unwrap();
        match rows.get_mut(&id) {
            Some(p) if p.approval_status == from => {
                p.approval_status = to;
                p.rejection_reason = rejection_reason.map(str::to_string);
                p.updated_at = Utc::now();
                Ok(1)
            }
            _ => Ok(0),
        }
    }

    async fn auto_approve(&self, id: Uuid) -> RepoResult<u64> {
        if self.fail_auto_approve.load(Ordering::SeqCst) {
            return Err(db_down());
        }
        let mut rows = self.rows.lock().unwrap();
        match rows.get_mut(&id) {
            Some(p) if p.approval_status != ApprovalStatus::Approved => {
                p.approval_status = ApprovalStatus::Approved;
                p.rejection_reason = None;
                Ok(1)
            }
            _ => Ok(0),
        }
    }

    async fn promote_to_expert(&self, id: Uuid) -> RepoResult<u64> {
        if self.fail_promote.load(Ordering::SeqCst) {
            return Err(db_down());
        }
        let mut rows = self.rows.lock().unwrap();
        match rows.get_mut(&id) {
            Some(p) if p.role == Role::Member => {
                p.role = Role::Expert;
                Ok(1)
            }
            _ => Ok(0),
        }
    }

    async fn complete_onboarding(&self, id: Uuid, answers: &OnboardingAnswers) -> RepoResult<u64> {
        let mut rows = self.rows.lock().unwrap();
        match rows.get_mut(&id) {
            Some(p) => {
                p.region = Some(answers.region.clone());
                p.industry = Some(answers.industry.clone());
                p.level = Some(answers.level.clone());
                if answers.company_name.is_some() {
                    p.company_name.clone_from(&answers.company_name);
                }
                p.onboarding_completed = true;
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete(&self, id: Uuid) -> RepoResult<u64> {
        Ok(u64::from(self.rows.lock().unwrap().remove(&id).is_some()))
    }
}

// ============================================================================
// Expert profiles
// ============================================================================

#[derive(Default)]
pub struct InMemoryExperts {
    rows: Mutex<HashMap<Uuid, ExpertProfile>>,
}

impl InMemoryExperts {
    pub fn insert(&self, expert: ExpertProfile) {
        self.rows.lock().unwrap().insert(expert.id, expert);
    }

    pub fn get(&self, id: Uuid) -> Option<ExpertProfile> {
        self.rows.lock().unwrap().get(&id).cloned()
    }
}

#[async_trait]
impl ExpertProfileRepository for InMemoryExperts {
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<ExpertProfile>> {
        Ok(self.get(id))
    }

    async fn approve(
        &self,
        id: Uuid,
        verified_by: Uuid,
        verified_at: DateTime<Utc>,
    ) -> RepoResult<u64> {
        let mut rows = self.rows.lock().unwrap();
        match rows.get_mut(&id) {
            Some(e) if e.status == ExpertStatus::PendingReview => {
                e.status = ExpertStatus::Approved;
                e.verified_by = Some(verified_by);
                e.verified_at = Some(verified_at);
                Ok(1)
            }
            _ => Ok(0),
        }
    }

    async fn reject(&self, id: Uuid, reason: &str) -> RepoResult<u64> {
        let mut rows = self.rows.lock().unwrap();
        match rows.get_mut(&id) {
            Some(e) if e.status == ExpertStatus::PendingReview => {
                e.status = ExpertStatus::Rejected;
                e.rejection_reason = Some(reason.to_string());
                Ok(1)
            }
            _ => Ok(0),
        }
    }
}

// ============================================================================
// Notifications and audit
// ============================================================================

#[derive(Default)]
pub struct InMemoryNotifications {
    rows: Mutex<Vec<Notification>>,
    pub fail: AtomicBool,
}

impl InMemoryNotifications {
    pub fn for_user(&self, user_id: Uuid) -> Vec<Notification> {
        self.rows
            .lock()
            .unwrap()
            .iter()
            .filter(|n| n.user_id == user_id)
            .cloned()
            .collect()
    }

    pub fn count(&self) -> usize {
        self.rows.lock().unwrap().len()
    }
}

#[async_trait]
impl NotificationRepository for InMemoryNotifications {
    async fn create(&self, notification: &Notification) -> RepoResult<()> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(db_down());
        }
        self.rows.lock().unwrap().push(notification.clone());
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryAuditLog {
    rows: Mutex<Vec<AuditLogEntry>>,
    pub fail: AtomicBool,
}

impl InMemoryAuditLog {
    pub fn entries(&self) -> Vec<AuditLogEntry> {
        self.rows.lock().unwrap().clone()
    }
}

#[async_trait]
impl AuditLogRepository for InMemoryAuditLog {
    async fn append(&self, entry: &AuditLogEntry) -> RepoResult<()> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(db_down());
        }
        self.rows.lock().unwrap().push(entry.clone());
        Ok(())
    }
}

// ============================================================================
// Identity
// ============================================================================

/// One-time codes: a code is consumed by its first exchange
#[derive(Default)]
pub struct FakeIdentityProvider {
    sessions: Mutex<HashMap<String, AuthSession>>,
    exchanges: AtomicUsize,
    last_verifier: Mutex<Option<String>>,
}

impl FakeIdentityProvider {
    pub fn issue(&self, code: &str, identity: Option<Identity>) {
        let session = AuthSession {
            access_token: format!("access-{code}"),
            refresh_token: Some(format!("refresh-{code}")),
            expires_in: Some(3600),
            identity,
        };
        self.sessions.lock().unwrap().insert(code.to_string(), session);
    }

    pub fn exchange_count(&self) -> usize {
        self.exchanges.load(Ordering::SeqCst)
    }

    pub fn last_verifier(&self) -> Option<String> {
        self.last_verifier.lock().unwrap().clone()
    }
}

#[async_trait]
impl IdentityProvider for FakeIdentityProvider {
    async fn exchange_code(
        &self,
        code: &str,
        code_verifier: Option<&str>,
    ) -> Result<AuthSession, DomainError> {
        self.exchanges.fetch_add(1, Ordering::SeqCst);
        *self.last_verifier.lock().unwrap() = code_verifier.map(str::to_string);
        self.sessions
            .lock()
            .unwrap()
            .remove(code)
            .ok_or_else(|| DomainError::CodeExchangeFailed("invalid or used code".to_string()))
    }
}

#[derive(Default)]
pub struct FakeIdentityAdmin {
    deleted: Mutex<Vec<Uuid>>,
    pub fail: AtomicBool,
}

impl FakeIdentityAdmin {
    pub fn deleted(&self) -> Vec<Uuid> {
        self.deleted.lock().unwrap().clone()
    }
}

#[async_trait]
impl IdentityAdmin for FakeIdentityAdmin {
    async fn delete_identity(&self, id: Uuid) -> Result<(), DomainError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(DomainError::IdentityProviderError("503".to_string()));
        }
        self.deleted.lock().unwrap().push(id);
        Ok(())
    }
}

// ============================================================================
// Harness
// ============================================================================

#[derive(Default)]
pub struct TestHarness {
    pub profiles: Arc<InMemoryProfiles>,
    pub experts: Arc<InMemoryExperts>,
    pub notifications: Arc<InMemoryNotifications>,
    pub audit: Arc<InMemoryAuditLog>,
    pub provider: Arc<FakeIdentityProvider>,
    pub admin_client: Arc<FakeIdentityAdmin>,
}

impl TestHarness {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder(&self) -> ServiceContextBuilder {
        ServiceContext::builder()
            .profile_repo(self.profiles.clone())
            .expert_profile_repo(self.experts.clone())
            .notification_repo(self.notifications.clone())
            .audit_log_repo(self.audit.clone())
            .identity_provider(self.provider.clone())
            .identity_admin(self.admin_client.clone())
            .jwt_service(Arc::new(JwtService::new("test-secret", AUTHENTICATED_AUDIENCE)))
            .site_routes(SiteRoutes::new(ORIGIN, "ko", "/support-programs"))
    }

    pub fn context(&self) -> ServiceContext {
        self.builder()
            .profile_retry_delay(Duration::from_millis(1))
            .build()
            .unwrap()
    }

    pub fn seed_profile(&self, role: Role, status: ApprovalStatus, onboarded: bool) -> Profile {
        let id = Uuid::new_v4();
        let mut profile = Profile::new(
            id,
            ProfileSeed {
                email: Some(format!("{id}@example.com")),
                ..Default::default()
            },
        );
        profile.role = role;
        profile.approval_status = status;
        profile.onboarding_completed = onboarded;
        self.profiles.insert(profile.clone());
        profile
    }

    pub fn seed_admin(&self) -> Profile {
        self.seed_profile(Role::Admin, ApprovalStatus::Approved, true)
    }

    pub fn seed_expert_application(&self, user_id: Uuid) -> ExpertProfile {
        let expert = ExpertProfile::new(Uuid::new_v4(), user_id);
        self.experts.insert(expert.clone());
        expert
    }
}

pub fn identity(id: Uuid) -> Identity {
    Identity {
        id,
        email: Some(format!("{id}@example.com")),
        metadata: IdentityMetadata {
            full_name: Some("Yoon Seo".to_string()),
            avatar_url: None,
            company_name: Some("Seoul Robotics".to_string()),
        },
    }
}
