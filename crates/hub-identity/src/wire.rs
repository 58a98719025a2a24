//! Provider JSON payloads

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use hub_core::traits::{AuthSession, Identity, IdentityMetadata};

#[derive(Debug, Serialize)]
pub(crate) struct PkceGrantRequest<'a> {
    pub auth_code: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code_verifier: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SessionResponse {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub expires_in: Option<i64>,
    #[serde(default)]
    pub user: Option<UserResponse>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct UserResponse {
    /// Kept as text so a malformed id degrades to "no identity"
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub user_metadata: UserMetadata,
}

/// OAuth providers disagree on the display name key
#[derive(Debug, Default, Deserialize)]
pub(crate) struct UserMetadata {
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub picture: Option<String>,
    #[serde(default)]
    pub company_name: Option<String>,
}

/// Provider error body; fields vary by endpoint
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub error_description: Option<String>,
    #[serde(default)]
    pub msg: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ErrorBody {
    pub fn into_message(self) -> Option<String> {
        self.error_description
            .or(self.msg)
            .or(self.message)
            .or(self.error)
    }
}

impl UserResponse {
    fn into_identity(self) -> Option<Identity> {
        let id = Uuid::parse_str(&self.id).ok()?;
        let meta = self.user_metadata;
        Some(Identity {
            id,
            email: self.email,
            metadata: IdentityMetadata {
                full_name: meta.full_name.or(meta.name),
                avatar_url: meta.avatar_url.or(meta.picture),
                company_name: meta.company_name,
            },
        })
    }
}

impl From<SessionResponse> for AuthSession {
    fn from(response: SessionResponse) -> Self {
        AuthSession {
            access_token: response.access_token,
            refresh_token: response.refresh_token,
            expires_in: response.expires_in,
            identity: response.user.and_then(UserResponse::into_identity),
        }
    }
}
