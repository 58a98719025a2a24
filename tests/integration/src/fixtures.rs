//! Test fixtures and provider stubs

use serde_json::{json, Value};
use uuid::Uuid;
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::helpers::{TEST_ANON_KEY, TEST_SERVICE_KEY};

/// Token grant body the provider returns for a signed-in user
pub fn session_body(user_id: Uuid, full_name: &str) -> Value {
    json!({
        "access_token": format!("access-{user_id}"),
        "refresh_token": format!("refresh-{user_id}"),
        "expires_in": 3600,
        "token_type": "bearer",
        "user": {
            "id": user_id.to_string(),
            "email": format!("{user_id}@example.com"),
            "user_metadata": { "full_name": full_name }
        }
    })
}

/// Accept `code` exactly once, answering with a session for `user_id`
pub async fn stub_code_exchange(provider: &MockServer, code: &str, user_id: Uuid) {
    Mock::given(method("POST"))
        .and(path("/auth/v1/token"))
        .and(query_param("grant_type", "pkce"))
        .and(header("apikey", TEST_ANON_KEY))
        .and(body_partial_json(json!({ "auth_code": code })))
        .respond_with(ResponseTemplate::new(200).set_body_json(session_body(user_id, "Kim Minji")))
        .up_to_n_times(1)
        .with_priority(1)
        .mount(provider)
        .await;
}

/// Everything not explicitly accepted is an invalid grant
pub async fn stub_invalid_grant(provider: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/auth/v1/token"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": "invalid_grant",
            "error_description": "Invalid auth code"
        })))
        .with_priority(10)
        .mount(provider)
        .await;
}

/// Admin deletion with the service key
pub async fn stub_identity_delete(provider: &MockServer, user_id: Uuid, status: u16) {
    Mock::given(method("DELETE"))
        .and(path(format!("/auth/v1/admin/users/{user_id}")))
        .and(header("authorization", format!("Bearer {TEST_SERVICE_KEY}").as_str()))
        .respond_with(ResponseTemplate::new(status))
        .expect(1)
        .mount(provider)
        .await;
}

/// Approval payload for a member decision
pub fn member_decision(user_id: Uuid, action: &str, reason: Option<&str>) -> Value {
    json!({
        "userId": user_id.to_string(),
        "action": action,
        "target": "member",
        "rejectionReason": reason,
    })
}

/// Approval payload for an expert decision
pub fn expert_decision(user_id: Uuid, expert_profile_id: Uuid, action: &str) -> Value {
    json!({
        "userId": user_id.to_string(),
        "action": action,
        "target": "expert",
        "expertProfileId": expert_profile_id.to_string(),
        "rejectionReason": "Insufficient portfolio",
    })
}

/// Onboarding answers
pub fn onboarding_answers() -> Value {
    json!({
        "region": "Seoul",
        "industry": "Manufacturing",
        "level": "Growth",
        "companyName": "Hanbit Robotics",
    })
}
