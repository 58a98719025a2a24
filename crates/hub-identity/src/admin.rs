//! Service-role provider client

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use hub_core::error::DomainError;
use hub_core::traits::IdentityAdmin;

use crate::client::rejection;
use crate::config::IdentityClientConfig;
use crate::error::{IdentityError, IdentityResult};

/// Admin operations authenticated with the service key
#[derive(Clone)]
pub struct IdentityAdminClient {
    http: Client,
    config: IdentityClientConfig,
    service_key: String,
}

impl std::fmt::Debug for IdentityAdminClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdentityAdminClient")
            .field("config", &self.config)
            .field("service_key", &"[REDACTED]")
            .finish()
    }
}

impl IdentityAdminClient {
    pub fn new(config: IdentityClientConfig, service_key: impl Into<String>) -> IdentityResult<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(IdentityError::Build)?;
        Ok(Self {
            http,
            config,
            service_key: service_key.into(),
        })
    }

    /// Delete a user at the provider.
    ///
    /// Returns `false` when the provider no longer knows the user.
    #[instrument(skip(self))]
    pub async fn delete_user(&self, id: Uuid) -> IdentityResult<bool> {
        let response = self
            .http
            .delete(self.config.endpoint(&format!("/admin/users/{id}")))
            .header("apikey", &self.service_key)
            .bearer_auth(&self.service_key)
            .send()
            .await?;

        match response.status() {
            s if s.is_success() => Ok(true),
            StatusCode::NOT_FOUND => Ok(false),
            _ => Err(rejection(response).await),
        }
    }
}

#[async_trait]
impl IdentityAdmin for IdentityAdminClient {
    async fn delete_identity(&self, id: Uuid) -> Result<(), DomainError> {
        if self.delete_user(id).await? {
            info!(user_id = %id, "Identity deleted");
        } else {
            warn!(user_id = %id, "Identity already absent at provider");
        }
        Ok(())
    }
}
