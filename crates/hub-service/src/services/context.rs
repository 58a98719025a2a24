//! Service context - dependency container for services
//!
//! Holds the repositories, identity ports, and site settings needed by services.

use std::sync::Arc;
use std::time::Duration;

use hub_common::auth::JwtService;
use hub_core::traits::{
    AuditLogRepository, ExpertProfileRepository, IdentityAdmin, IdentityProvider,
    NotificationRepository, ProfileRepository,
};

use super::error::{ServiceError, ServiceResult};
use super::redirect::SiteRoutes;

const DEFAULT_PROFILE_RETRY_DELAY: Duration = Duration::from_millis(500);

/// Service context containing all dependencies
///
/// Built once at startup and shared behind an `Arc`. It provides access to:
/// - Profile, expert profile, notification and audit repositories
/// - The user-context identity provider (anonymous key)
/// - The admin identity client (service key)
/// - JWT verification for provider-issued access tokens
/// - Redirect routes for the public site
#[derive(Clone)]
pub struct ServiceContext {
    // Repositories
    profile_repo: Arc<dyn ProfileRepository>,
    expert_profile_repo: Arc<dyn ExpertProfileRepository>,
    notification_repo: Arc<dyn NotificationRepository>,
    audit_log_repo: Arc<dyn AuditLogRepository>,

    // Identity
    identity_provider: Arc<dyn IdentityProvider>,
    identity_admin: Arc<dyn IdentityAdmin>,
    jwt_service: Arc<JwtService>,

    // Callback
    site_routes: Arc<SiteRoutes>,
    profile_retry_delay: Duration,
}

impl ServiceContext {
    /// Start a builder
    pub fn builder() -> ServiceContextBuilder {
        ServiceContextBuilder::new()
    }

    // === Repositories ===

    /// Get the profile repository
    pub fn profile_repo(&self) -> &dyn ProfileRepository {
        self.profile_repo.as_ref()
    }

    /// Get the expert profile repository
    pub fn expert_profile_repo(&self) -> &dyn ExpertProfileRepository {
        self.expert_profile_repo.as_ref()
    }

    /// Get the notification repository
    pub fn notification_repo(&self) -> &dyn NotificationRepository {
        self.notification_repo.as_ref()
    }

    /// Get the audit log repository
    pub fn audit_log_repo(&self) -> &dyn AuditLogRepository {
        self.audit_log_repo.as_ref()
    }

    // === Identity ===

    pub fn identity_provider(&self) -> &dyn IdentityProvider {
        self.identity_provider.as_ref()
    }

    pub fn identity_admin(&self) -> &dyn IdentityAdmin {
        self.identity_admin.as_ref()
    }

    /// Get the JWT service
    pub fn jwt_service(&self) -> &JwtService {
        self.jwt_service.as_ref()
    }

    // === Callback ===

    pub fn site_routes(&self) -> &SiteRoutes {
        self.site_routes.as_ref()
    }

    /// Wait before re-reading a profile the database trigger may not have committed yet
    pub fn profile_retry_delay(&self) -> Duration {
        self.profile_retry_delay
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("repositories", &"...")
            .field("identity", &"...")
            .field("site_routes", &self.site_routes)
            .field("profile_retry_delay", &self.profile_retry_delay)
            .finish()
    }
}

/// Builder for creating ServiceContext with custom configuration
#[derive(Default)]
pub struct ServiceContextBuilder {
    profile_repo: Option<Arc<dyn ProfileRepository>>,
    expert_profile_repo: Option<Arc<dyn ExpertProfileRepository>>,
    notification_repo: Option<Arc<dyn NotificationRepository>>,
    audit_log_repo: Option<Arc<dyn AuditLogRepository>>,
    identity_provider: Option<Arc<dyn IdentityProvider>>,
    identity_admin: Option<Arc<dyn IdentityAdmin>>,
    jwt_service: Option<Arc<JwtService>>,
    site_routes: Option<SiteRoutes>,
    profile_retry_delay: Option<Duration>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn profile_repo(mut self, repo: Arc<dyn ProfileRepository>) -> Self {
        self.profile_repo = Some(repo);
        self
    }

    pub fn expert_profile_repo(mut self, repo: Arc<dyn ExpertProfileRepository>) -> Self {
        self.expert_profile_repo = Some(repo);
        self
    }

    pub fn notification_repo(mut self, repo: Arc<dyn NotificationRepository>) -> Self {
        self.notification_repo = Some(repo);
        self
    }

    pub fn audit_log_repo(mut self, repo: Arc<dyn AuditLogRepository>) -> Self {
        self.audit_log_repo = Some(repo);
        self
    }

    pub fn identity_provider(mut self, provider: Arc<dyn IdentityProvider>) -> Self {
        self.identity_provider = Some(provider);
        self
    }

    pub fn identity_admin(mut self, admin: Arc<dyn IdentityAdmin>) -> Self {
        self.identity_admin = Some(admin);
        self
    }

    pub fn jwt_service(mut self, service: Arc<JwtService>) -> Self {
        self.jwt_service = Some(service);
        self
    }

    pub fn site_routes(mut self, routes: SiteRoutes) -> Self {
        self.site_routes = Some(routes);
        self
    }

    pub fn profile_retry_delay(mut self, delay: Duration) -> Self {
        self.profile_retry_delay = Some(delay);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        Ok(ServiceContext {
            profile_repo: self.profile_repo.ok_or_else(|| missing("profile_repo"))?,
            expert_profile_repo: self
                .expert_profile_repo
                .ok_or_else(|| missing("expert_profile_repo"))?,
            notification_repo: self
                .notification_repo
                .ok_or_else(|| missing("notification_repo"))?,
            audit_log_repo: self.audit_log_repo.ok_or_else(|| missing("audit_log_repo"))?,
            identity_provider: self
                .identity_provider
                .ok_or_else(|| missing("identity_provider"))?,
            identity_admin: self.identity_admin.ok_or_else(|| missing("identity_admin"))?,
            jwt_service: self.jwt_service.ok_or_else(|| missing("jwt_service"))?,
            site_routes: Arc::new(self.site_routes.ok_or_else(|| missing("site_routes"))?),
            profile_retry_delay: self
                .profile_retry_delay
                .unwrap_or(DEFAULT_PROFILE_RETRY_DELAY),
        })
    }
}

fn missing(name: &str) -> ServiceError {
    ServiceError::validation(format!("{name} is required"))
}
