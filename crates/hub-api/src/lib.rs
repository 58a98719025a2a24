//! # hub-api
//!
//! HTTP surface built with Axum: the sign-in callback, the approval and
//! notification functions, profile endpoints, member administration and
//! health probes.

pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod routes;
pub mod server;
pub mod state;

pub use server::{create_app, create_app_state, run};
pub use state::AppState;
