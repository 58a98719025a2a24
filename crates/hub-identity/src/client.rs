//! User-context provider client (anonymous key)

use async_trait::async_trait;
use reqwest::{Client, Response};
use tracing::{debug, instrument, warn};

use hub_core::error::DomainError;
use hub_core::traits::{AuthSession, IdentityProvider};

use crate::config::IdentityClientConfig;
use crate::error::{IdentityError, IdentityResult};
use crate::wire::{ErrorBody, PkceGrantRequest, SessionResponse};

/// Exchanges OAuth codes for sessions
#[derive(Debug, Clone)]
pub struct IdentityClient {
    http: Client,
    config: IdentityClientConfig,
}

impl IdentityClient {
    pub fn new(config: IdentityClientConfig) -> IdentityResult<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(IdentityError::Build)?;
        Ok(Self { http, config })
    }

    /// Call the PKCE token grant and decode the session
    #[instrument(skip_all)]
    pub async fn exchange(
        &self,
        code: &str,
        code_verifier: Option<&str>,
    ) -> IdentityResult<AuthSession> {
        let response = self
            .http
            .post(self.config.endpoint("/token"))
            .query(&[("grant_type", "pkce")])
            .header("apikey", &self.config.anon_key)
            .json(&PkceGrantRequest {
                auth_code: code,
                code_verifier,
            })
            .send()
            .await?;

        let status = response.status();
        debug!(status = status.as_u16(), "Received token grant response");
        if !status.is_success() {
            return Err(rejection(response).await);
        }

        let session: SessionResponse = response
            .json()
            .await
            .map_err(|e| IdentityError::MalformedResponse(e.to_string()))?;

        Ok(session.into())
    }
}

#[async_trait]
impl IdentityProvider for IdentityClient {
    async fn exchange_code(
        &self,
        code: &str,
        code_verifier: Option<&str>,
    ) -> Result<AuthSession, DomainError> {
        self.exchange(code, code_verifier).await.map_err(|e| {
            warn!(error = %e, "Code exchange failed");
            if e.is_client_error() {
                DomainError::CodeExchangeFailed(e.to_string())
            } else {
                e.into()
            }
        })
    }
}

/// Turn a non-success response into `IdentityError::Rejected`
pub(crate) async fn rejection(response: Response) -> IdentityError {
    let status = response.status().as_u16();
    let text = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&text)
        .ok()
        .and_then(ErrorBody::into_message)
        .unwrap_or(text);
    IdentityError::Rejected { status, message }
}
