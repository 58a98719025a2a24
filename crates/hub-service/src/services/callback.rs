//! Sign-in callback router
//!
//! Exchanges the provider's one-time code, reconciles the profile row and
//! picks the redirect. Every branch ends in a [`Destination`]; failures are
//! logged and become the `auth_error` redirect.

use hub_core::entities::Profile;
use hub_core::error::DomainError;
use hub_core::traits::{AuthSession, Identity};
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

use super::context::ServiceContext;
use super::redirect::{Destination, Locale};

/// Inputs the browser brings back from the provider
#[derive(Debug, Clone, Default)]
pub struct CallbackRequest {
    pub code: Option<String>,
    pub error: Option<String>,
    pub next: Option<String>,
    /// Value of the locale cookie
    pub locale: Option<String>,
    /// PKCE verifier stored at sign-in
    pub code_verifier: Option<String>,
}

/// Where to send the browser, plus the session to persist on success
#[derive(Debug, Clone)]
pub struct CallbackOutcome {
    pub destination: Destination,
    pub locale: Locale,
    pub redirect_url: String,
    /// Present only when the sign-in completed
    pub session: Option<AuthSession>,
}

/// Callback router service
pub struct CallbackService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> CallbackService<'a> {
    /// Create a new CallbackService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    #[instrument(skip_all, fields(has_code = request.code.is_some(), has_error = request.error.is_some()))]
    pub async fn handle(&self, request: CallbackRequest) -> CallbackOutcome {
        let routes = self.ctx.site_routes();
        let locale = routes.resolve_locale(request.locale.as_deref());

        let (destination, session) = match self.sign_in(&request).await {
            Ok((destination, session)) => (destination, Some(session)),
            Err(reason) => {
                warn!(%reason, "Sign-in callback failed");
                (Destination::AuthError, None)
            }
        };

        CallbackOutcome {
            redirect_url: routes.url_for(locale, &destination),
            destination,
            locale,
            session,
        }
    }

    async fn sign_in(
        &self,
        request: &CallbackRequest,
    ) -> Result<(Destination, AuthSession), CallbackFailure> {
        if let Some(provider_error) = &request.error {
            return Err(CallbackFailure::Provider(provider_error.clone()));
        }
        let code = request
            .code
            .as_deref()
            .filter(|c| !c.is_empty())
            .ok_or(CallbackFailure::MissingCode)?;

        let session = self
            .ctx
            .identity_provider()
            .exchange_code(code, request.code_verifier.as_deref())
            .await
            .map_err(CallbackFailure::Exchange)?;
        let identity = session.identity.clone().ok_or(CallbackFailure::NoIdentity)?;

        let profile = self
            .resolve_profile(&identity)
            .await
            .map_err(CallbackFailure::Profile)?;

        let destination = match profile {
            Some(profile) => self.route(&profile, request.next.as_deref()).await,
            None => Destination::Onboarding,
        };

        info!(user_id = %identity.id, ?destination, "Sign-in completed");
        Ok((destination, session))
    }

    /// Read the profile, tolerating a trigger that has not committed yet.
    ///
    /// `Ok(None)` means no row exists even after the fallback insert.
    async fn resolve_profile(&self, identity: &Identity) -> Result<Option<Profile>, DomainError> {
        let repo = self.ctx.profile_repo();

        if let Some(profile) = repo.find_by_id(identity.id).await? {
            return Ok(Some(profile));
        }

        tokio::time::sleep(self.ctx.profile_retry_delay()).await;
        if let Some(profile) = repo.find_by_id(identity.id).await? {
            return Ok(Some(profile));
        }

        let fallback = Profile::new(identity.id, identity.profile_seed());
        match repo.create(&fallback).await {
            Ok(()) => {
                info!(user_id = %identity.id, "Created fallback profile");
                Ok(Some(fallback))
            }
            Err(e) => {
                warn!(user_id = %identity.id, error = %e, "Fallback profile insert failed; re-reading");
                repo.find_by_id(identity.id).await
            }
        }
    }

    async fn route(&self, profile: &Profile, next: Option<&str>) -> Destination {
        if profile.needs_onboarding() {
            return Destination::Onboarding;
        }

        if !profile.is_approved() {
            self.auto_approve(profile.id).await;
        }

        if profile.is_admin() {
            Destination::AdminHome
        } else {
            Destination::Next(self.ctx.site_routes().sanitize_next(next))
        }
    }

    async fn auto_approve(&self, user_id: Uuid) {
        match self.ctx.profile_repo().auto_approve(user_id).await {
            Ok(rows) => info!(%user_id, rows, "Auto-approved onboarded profile"),
            Err(e) => error!(%user_id, error = %e, "Auto-approval failed; routing anyway"),
        }
    }
}

/// Why a callback ended at the error page
#[derive(Debug)]
enum CallbackFailure {
    Provider(String),
    MissingCode,
    Exchange(DomainError),
    NoIdentity,
    Profile(DomainError),
}

impl std::fmt::Display for CallbackFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Provider(code) => write!(f, "provider returned error: {code}"),
            Self::MissingCode => write!(f, "missing authorization code"),
            Self::Exchange(e) => write!(f, "{e}"),
            Self::NoIdentity => write!(f, "session carried no identity"),
            Self::Profile(e) => write!(f, "profile lookup failed: {e}"),
        }
    }
}
