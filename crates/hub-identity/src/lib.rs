//! # hub-identity
//!
//! HTTP adapters for the external Identity Provider.
//!
//! ## Features
//!
//! - **Code exchange**: trades a one-time OAuth code (plus PKCE verifier) for a
//!   session, authenticated with the anonymous key only
//! - **Admin deletion**: removes an identity, authenticated with the service key
//!
//! The two clients are separate types so the service key never reaches the
//! user-context path.
//!
//! ## Example
//!
//! ```ignore
//! use hub_identity::{IdentityAdminClient, IdentityClient, IdentityClientConfig};
//!
//! let config = IdentityClientConfig::from(&app_config.auth);
//! let provider = IdentityClient::new(config.clone())?;
//! let admin = IdentityAdminClient::new(config, app_config.auth.service_key.clone())?;
//!
//! let session = provider.exchange_code(code, Some(verifier)).await?;
//! ```

mod admin;
mod client;
mod config;
mod error;
mod wire;

pub use admin::IdentityAdminClient;
pub use client::IdentityClient;
pub use config::IdentityClientConfig;
pub use error::{IdentityError, IdentityResult};
