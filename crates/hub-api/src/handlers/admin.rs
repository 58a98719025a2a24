//! Admin member management handlers

use axum::{extract::State, Json};
use hub_service::dto::{DeletedMemberData, FunctionResponse};
use hub_service::MemberAdminService;

use crate::extractors::{AuthUser, UserIdPath};
use crate::response::ApiResult;
use crate::state::AppState;

/// Delete a member's identity and profile
///
/// DELETE /admin/members/:user_id
pub async fn delete_member(
    State(state): State<AppState>,
    auth: AuthUser,
    UserIdPath(user_id): UserIdPath,
) -> ApiResult<Json<FunctionResponse<DeletedMemberData>>> {
    let service = MemberAdminService::new(state.service_context());
    let deleted = service.delete_member(auth.user_id, user_id).await?;
    Ok(Json(FunctionResponse::ok("Member deleted", deleted)))
}
