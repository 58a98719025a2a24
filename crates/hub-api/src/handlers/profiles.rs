//! Profile handlers

use axum::{extract::State, Json};
use hub_service::dto::{OnboardingRequest, ProfileResponse};
use hub_service::ProfileService;

use crate::extractors::{AuthUser, ValidatedJson};
use crate::response::ApiResult;
use crate::state::AppState;

/// Get the caller's profile
///
/// GET /profiles/@me
pub async fn get_current_profile(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<ProfileResponse>> {
    let service = ProfileService::new(state.service_context());
    let profile = service.get_me(auth.user_id).await?;
    Ok(Json(profile))
}

/// Submit onboarding answers
///
/// POST /profiles/@me/onboarding
pub async fn complete_onboarding(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<OnboardingRequest>,
) -> ApiResult<Json<ProfileResponse>> {
    let service = ProfileService::new(state.service_context());
    let profile = service.complete_onboarding(auth.user_id, request).await?;
    Ok(Json(profile))
}
