//! Identity Provider client configuration

use std::time::Duration;

/// Connection settings shared by both provider clients
#[derive(Clone)]
pub struct IdentityClientConfig {
    /// Provider base URL (e.g., `https://auth.example.com`)
    pub base_url: String,
    /// Public key sent as `apikey` on user-context calls
    pub anon_key: String,
    /// Per-request timeout
    pub timeout: Duration,
}

impl IdentityClientConfig {
    pub fn new(base_url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            anon_key: anon_key.into(),
            timeout: Duration::from_secs(10),
        }
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub(crate) fn endpoint(&self, path: &str) -> String {
        format!("{}/auth/v1{path}", self.base_url)
    }
}

impl std::fmt::Debug for IdentityClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdentityClientConfig")
            .field("base_url", &self.base_url)
            .field("anon_key", &"[REDACTED]")
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl From<&hub_common::AuthConfig> for IdentityClientConfig {
    fn from(config: &hub_common::AuthConfig) -> Self {
        Self::new(config.url.clone(), config.anon_key.clone())
    }
}
