//! Admin function endpoints
//!
//! Reached by the admin console and by trusted server-side callers; both
//! live under `/functions/v1` with permissive CORS.

use axum::{extract::State, Json};
use hub_service::dto::{
    ApprovalData, ApproveMemberRequest, FunctionResponse, NotificationResponse,
    SendNotificationRequest,
};
use hub_service::{ApprovalService, NotificationService};
use tracing::info;

use crate::extractors::{AuthUser, JsonPayload, ServiceCredential};
use crate::response::{ApiError, ApiResult};
use crate::state::AppState;

/// Decide a pending member or expert application
///
/// POST /functions/v1/approve-member
///
/// The caller is authorized before the body is parsed.
pub async fn approve_member(
    State(state): State<AppState>,
    auth: AuthUser,
    payload: Result<JsonPayload<ApproveMemberRequest>, ApiError>,
) -> ApiResult<Json<FunctionResponse<ApprovalData>>> {
    let service = ApprovalService::new(state.service_context());
    let admin = service.authorize(auth.user_id).await?;
    let JsonPayload(request) = payload?;
    let outcome = service.approve_request_as(&admin, request).await?;

    info!(
        admin_id = %outcome.admin_id,
        applied = outcome.transition.is_applied(),
        promotion = ?outcome.promotion,
        notification = ?outcome.notification,
        audit = ?outcome.audit,
        "Approval request completed"
    );

    Ok(Json(FunctionResponse::ok(outcome.message(), outcome.data())))
}

/// Create an in-app notification
///
/// POST /functions/v1/send-notification
pub async fn send_notification(
    State(state): State<AppState>,
    _credential: ServiceCredential,
    JsonPayload(request): JsonPayload<SendNotificationRequest>,
) -> ApiResult<Json<FunctionResponse<NotificationResponse>>> {
    let notification = NotificationService::new(state.service_context())
        .notify(request)
        .await?;
    Ok(Json(FunctionResponse::ok("Notification created", notification)))
}
