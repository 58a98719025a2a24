//! Identity provider ports
//!
//! Sessions and identities are issued by an external provider. The
//! user-context port only exchanges one-time codes; deleting identities needs
//! the privileged port, which holds the service credential.

use async_trait::async_trait;
use uuid::Uuid;

use crate::entities::ProfileSeed;
use crate::error::DomainError;

/// Profile metadata supplied by OAuth or the signup form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdentityMetadata {
    pub full_name: Option<String>,
    pub avatar_url: Option<String>,
    pub company_name: Option<String>,
}

/// Authenticated subject
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub id: Uuid,
    pub email: Option<String>,
    pub metadata: IdentityMetadata,
}

impl Identity {
    /// Descriptive fields for a profile created on behalf of this identity
    pub fn profile_seed(&self) -> ProfileSeed {
        ProfileSeed {
            email: self.email.clone(),
            full_name: self.metadata.full_name.clone(),
            avatar_url: self.metadata.avatar_url.clone(),
            company_name: self.metadata.company_name.clone(),
        }
    }
}

/// Session returned by a successful code exchange
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthSession {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub expires_in: Option<i64>,
    /// `None` when the provider answered without a usable user
    pub identity: Option<Identity>,
}

/// User-context access to the identity provider
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Exchange a one-time authorization code for a session
    ///
    /// Codes are single use; a replayed code fails with
    /// `DomainError::CodeExchangeFailed`.
    async fn exchange_code(
        &self,
        code: &str,
        code_verifier: Option<&str>,
    ) -> Result<AuthSession, DomainError>;
}

/// Privileged access to the identity provider
#[async_trait]
pub trait IdentityAdmin: Send + Sync {
    /// Irreversibly delete an identity
    async fn delete_identity(&self, id: Uuid) -> Result<(), DomainError>;
}
