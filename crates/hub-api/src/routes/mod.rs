//! Route definitions
//!
//! The callback sits at the site root, the admin functions under
//! `/functions/v1`, everything else under `/api/v1`.

use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::handlers::{admin, callback, functions, health, profiles};
use crate::state::AppState;

/// Callback and REST routes (excluding functions and health, which get their own layers)
pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/auth/callback", get(callback::auth_callback))
        .nest("/api/v1", api_v1_routes())
}

/// Function routes, served with permissive CORS
pub fn function_routes() -> Router<AppState> {
    Router::new()
        .route("/functions/v1/approve-member", post(functions::approve_member))
        .route("/functions/v1/send-notification", post(functions::send_notification))
}

/// Health check routes (exported separately to bypass rate limiting)
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

/// API v1 routes
fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .merge(profile_routes())
        .merge(admin_routes())
}

fn profile_routes() -> Router<AppState> {
    Router::new()
        .route("/profiles/@me", get(profiles::get_current_profile))
        .route("/profiles/@me/onboarding", post(profiles::complete_onboarding))
}

fn admin_routes() -> Router<AppState> {
    Router::new().route("/admin/members/:user_id", delete(admin::delete_member))
}
