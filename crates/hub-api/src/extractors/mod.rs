//! Axum extractors for request handling
//!
//! Custom extractors for authentication, validation, and path parameters.

mod auth;
mod path;
mod validated;

pub use auth::{AuthUser, ServiceCredential};
pub use path::UserIdPath;
pub use validated::{JsonPayload, ValidatedJson};
