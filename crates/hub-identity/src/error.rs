//! Identity Provider client errors

use hub_core::error::DomainError;

/// Error type for Identity Provider calls
#[derive(Debug, thiserror::Error)]
pub enum IdentityError {
    #[error("Failed to build HTTP client: {0}")]
    Build(reqwest::Error),

    #[error("Identity provider request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The provider answered with a non-success status
    #[error("Identity provider returned {status}: {message}")]
    Rejected { status: u16, message: String },

    #[error("Malformed identity provider response: {0}")]
    MalformedResponse(String),
}

/// Result type for Identity Provider calls
pub type IdentityResult<T> = Result<T, IdentityError>;

impl IdentityError {
    /// Whether the provider refused the request itself (4xx)
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Rejected { status, .. } if (400..500).contains(status))
    }
}

impl From<IdentityError> for DomainError {
    fn from(err: IdentityError) -> Self {
        DomainError::IdentityProviderError(err.to_string())
    }
}
