//! API Integration Tests
//!
//! These tests require:
//! - Running PostgreSQL instance
//! - Environment variable: DATABASE_URL
//!
//! The identity provider is replaced by a wiremock server per test.
//!
//! Run with: cargo test -p integration-tests --test api_tests

use hub_core::traits::ExpertProfileRepository;
use hub_core::value_objects::{ApprovalStatus, ExpertStatus, Role};
use hub_db::PgNotificationRepository;
use integration_tests::{
    assert_json, assert_status, check_test_env, fixtures::*, location, set_cookies, TestServer,
    TEST_SERVICE_KEY,
};
use reqwest::StatusCode;
use serde_json::{json, Value};
use uuid::Uuid;

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.expect("Request failed");
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_health_ready() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health/ready").await.expect("Request failed");
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["checks"]["database"], "healthy");
}

// ============================================================================
// Callback Router Tests
// ============================================================================

#[tokio::test]
async fn test_callback_provider_error_redirects_to_auth_error() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server
        .get("/auth/callback?error=access_denied&error_description=denied")
        .await
        .unwrap();

    assert_eq!(location(&response).unwrap(), "https://hub.test/ko?auth_error=true");
    assert!(set_cookies(&response).is_empty());
    assert!(server.provider.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_callback_without_code_redirects_to_auth_error() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server
        .get_with_cookies("/auth/callback", "NEXT_LOCALE=en")
        .await
        .unwrap();

    assert_eq!(location(&response).unwrap(), "https://hub.test/en?auth_error=true");
}

#[tokio::test]
async fn test_callback_new_user_goes_to_onboarding() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let user_id = Uuid::new_v4();
    stub_code_exchange(&server.provider, "code-new-user", user_id).await;

    let response = server
        .get("/auth/callback?code=code-new-user&next=%2Fprograms")
        .await
        .unwrap();

    assert_eq!(
        location(&response).unwrap(),
        "https://hub.test/ko/signup/onboarding"
    );
    let cookies = set_cookies(&response);
    assert!(cookies.iter().any(|c| c.starts_with("hub-access-token=")
        && c.contains("HttpOnly")
        && c.contains("SameSite=Lax")));

    let profile = server.profile(user_id).await.unwrap().expect("fallback profile");
    assert_eq!(profile.role, Role::Member);
    assert_eq!(profile.approval_status, ApprovalStatus::Pending);
    assert!(!profile.onboarding_completed);
    assert_eq!(profile.full_name.as_deref(), Some("Kim Minji"));
}

#[tokio::test]
async fn test_callback_onboarded_member_is_auto_approved() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let member = server
        .seed_profile(Role::Member, ApprovalStatus::Pending, true)
        .await
        .unwrap();
    stub_code_exchange(&server.provider, "code-member", member.id).await;

    let response = server
        .get_with_cookies(
            "/auth/callback?code=code-member&next=%2Fprograms%2F42",
            "NEXT_LOCALE=en",
        )
        .await
        .unwrap();

    assert_eq!(location(&response).unwrap(), "https://hub.test/en/programs/42");
    let profile = server.profile(member.id).await.unwrap().unwrap();
    assert_eq!(profile.approval_status, ApprovalStatus::Approved);
}

#[tokio::test]
async fn test_callback_rejects_offsite_next() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let member = server
        .seed_profile(Role::Member, ApprovalStatus::Approved, true)
        .await
        .unwrap();
    stub_code_exchange(&server.provider, "code-offsite", member.id).await;

    let response = server
        .get("/auth/callback?code=code-offsite&next=%2F%2Fevil.example")
        .await
        .unwrap();

    assert_eq!(
        location(&response).unwrap(),
        "https://hub.test/ko/support-programs"
    );
}

#[tokio::test]
async fn test_callback_admin_goes_to_admin_home() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let admin = server.seed_admin().await.unwrap();
    stub_code_exchange(&server.provider, "code-admin", admin.id).await;

    let response = server
        .get("/auth/callback?code=code-admin&next=%2Fprograms")
        .await
        .unwrap();

    assert_eq!(location(&response).unwrap(), "https://hub.test/ko/admin");
}

#[tokio::test]
async fn test_callback_code_replay_fails() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let member = server
        .seed_profile(Role::Member, ApprovalStatus::Approved, true)
        .await
        .unwrap();
    stub_code_exchange(&server.provider, "code-once", member.id).await;
    stub_invalid_grant(&server.provider).await;

    let first = server.get("/auth/callback?code=code-once").await.unwrap();
    assert_eq!(
        location(&first).unwrap(),
        "https://hub.test/ko/support-programs"
    );

    let replay = server.get("/auth/callback?code=code-once").await.unwrap();
    assert_eq!(location(&replay).unwrap(), "https://hub.test/ko?auth_error=true");
    assert!(set_cookies(&replay).is_empty());
}

// ============================================================================
// Approval Function Tests
// ============================================================================

#[tokio::test]
async fn test_approve_requires_token() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server
        .client
        .post(format!("{}/functions/v1/approve-member", server.base_url()))
        .json(&member_decision(Uuid::new_v4(), "approve", None))
        .send()
        .await
        .unwrap();

    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_approve_requires_admin() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let caller = server
        .seed_profile(Role::Member, ApprovalStatus::Approved, true)
        .await
        .unwrap();
    let target = server
        .seed_profile(Role::Member, ApprovalStatus::Pending, true)
        .await
        .unwrap();
    let token = server.token_for(caller.id).unwrap();

    let response = server
        .post_auth(
            "/functions/v1/approve-member",
            &token,
            &member_decision(target.id, "approve", None),
        )
        .await
        .unwrap();

    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();
    let profile = server.profile(target.id).await.unwrap().unwrap();
    assert_eq!(profile.approval_status, ApprovalStatus::Pending);
}

#[tokio::test]
async fn test_approve_authorizes_before_parsing_body() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let member = server
        .seed_profile(Role::Member, ApprovalStatus::Approved, true)
        .await
        .unwrap();
    let admin = server.seed_admin().await.unwrap();

    let send_garbage = |token: String| {
        server
            .client
            .post(format!("{}/functions/v1/approve-member", server.base_url()))
            .bearer_auth(token)
            .header("content-type", "application/json")
            .body("{not json")
            .send()
    };

    let as_member = send_garbage(server.token_for(member.id).unwrap()).await.unwrap();
    assert_status(as_member, StatusCode::FORBIDDEN).await.unwrap();

    let as_admin = send_garbage(server.token_for(admin.id).unwrap()).await.unwrap();
    assert_status(as_admin, StatusCode::BAD_REQUEST).await.unwrap();
}

#[tokio::test]
async fn test_approve_member_once() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let admin = server.seed_admin().await.unwrap();
    let member = server
        .seed_profile(Role::Member, ApprovalStatus::Pending, true)
        .await
        .unwrap();
    let token = server.token_for(admin.id).unwrap();

    let response = server
        .post_auth(
            "/functions/v1/approve-member",
            &token,
            &member_decision(member.id, "approve", None),
        )
        .await
        .unwrap();
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["applied"], true);
    assert_eq!(body["data"]["targetUserId"], member.id.to_string());
    assert_eq!(body["data"]["adminId"], admin.id.to_string());

    let replay = server
        .post_auth(
            "/functions/v1/approve-member",
            &token,
            &member_decision(member.id, "approve", None),
        )
        .await
        .unwrap();
    let body: Value = assert_json(replay, StatusCode::OK).await.unwrap();
    assert_eq!(body["data"]["applied"], false);

    let notifications = PgNotificationRepository::new(server.pool.clone())
        .find_recent(member.id, 10)
        .await
        .unwrap();
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].notification_type.as_str(), "member_approved");
}

#[tokio::test]
async fn test_reject_without_reason_is_bad_request() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let admin = server.seed_admin().await.unwrap();
    let member = server
        .seed_profile(Role::Member, ApprovalStatus::Pending, true)
        .await
        .unwrap();
    let token = server.token_for(admin.id).unwrap();

    let response = server
        .post_auth(
            "/functions/v1/approve-member",
            &token,
            &member_decision(member.id, "reject", Some("  ")),
        )
        .await
        .unwrap();

    let body: Value = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert!(body["error"]["message"]
        .as_str()
        .unwrap()
        .contains("rejectionReason"));
    let profile = server.profile(member.id).await.unwrap().unwrap();
    assert_eq!(profile.approval_status, ApprovalStatus::Pending);
}

#[tokio::test]
async fn test_expert_approval_promotes_role() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let admin = server.seed_admin().await.unwrap();
    let applicant = server
        .seed_profile(Role::Member, ApprovalStatus::Approved, true)
        .await
        .unwrap();
    let expert = server.seed_expert_application(applicant.id).await.unwrap();
    let token = server.token_for(admin.id).unwrap();

    let response = server
        .post_auth(
            "/functions/v1/approve-member",
            &token,
            &expert_decision(applicant.id, expert.id, "approve"),
        )
        .await
        .unwrap();
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["data"]["target"], "expert");

    let profile = server.profile(applicant.id).await.unwrap().unwrap();
    assert_eq!(profile.role, Role::Expert);

    let expert_row = server
        .experts()
        .find_by_id(expert.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(expert_row.status, ExpertStatus::Approved);
    assert_eq!(expert_row.verified_by, Some(admin.id));
}

#[tokio::test]
async fn test_function_preflight_is_permissive() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server
        .preflight("/functions/v1/approve-member")
        .await
        .unwrap();

    assert!(response.status().is_success());
    assert_eq!(
        response.headers()["access-control-allow-origin"],
        "*"
    );
}

// ============================================================================
// Notification Function Tests
// ============================================================================

#[tokio::test]
async fn test_send_notification_requires_service_key() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let member = server
        .seed_profile(Role::Member, ApprovalStatus::Approved, true)
        .await
        .unwrap();
    let user_token = server.token_for(member.id).unwrap();

    let response = server
        .post_auth(
            "/functions/v1/send-notification",
            &user_token,
            &json!({ "userId": member.id, "type": "system", "title": "Hello" }),
        )
        .await
        .unwrap();

    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_send_notification_creates_unread_row() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let member = server
        .seed_profile(Role::Member, ApprovalStatus::Approved, true)
        .await
        .unwrap();

    let response = server
        .post_auth(
            "/functions/v1/send-notification",
            TEST_SERVICE_KEY,
            &json!({
                "userId": member.id,
                "type": "system",
                "title": "Program opened",
                "body": "Applications are open",
                "metadata": { "program": 42 }
            }),
        )
        .await
        .unwrap();

    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["data"]["type"], "system");
    assert_eq!(body["data"]["is_read"], false);
    assert_eq!(body["data"]["metadata"]["program"], 42);
}

#[tokio::test]
async fn test_send_notification_validation_and_missing_user() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let missing_title = server
        .post_auth(
            "/functions/v1/send-notification",
            TEST_SERVICE_KEY,
            &json!({ "userId": Uuid::new_v4(), "type": "system" }),
        )
        .await
        .unwrap();
    assert_status(missing_title, StatusCode::BAD_REQUEST).await.unwrap();

    let unknown_user = server
        .post_auth(
            "/functions/v1/send-notification",
            TEST_SERVICE_KEY,
            &json!({ "userId": Uuid::new_v4(), "type": "system", "title": "Hi" }),
        )
        .await
        .unwrap();
    assert_status(unknown_user, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_send_notification_rejects_non_object_metadata() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let member = server
        .seed_profile(Role::Member, ApprovalStatus::Approved, true)
        .await
        .unwrap();

    for metadata in [json!("x"), json!([1])] {
        let response = server
            .post_auth(
                "/functions/v1/send-notification",
                TEST_SERVICE_KEY,
                &json!({
                    "userId": member.id,
                    "type": "system",
                    "title": "Program opened",
                    "metadata": metadata
                }),
            )
            .await
            .unwrap();
        assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
    }

    let stored = PgNotificationRepository::new(server.pool.clone())
        .find_recent(member.id, 10)
        .await
        .unwrap();
    assert!(stored.is_empty());
}

// ============================================================================
// Profile Tests
// ============================================================================

#[tokio::test]
async fn test_onboarding_then_callback_admits() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let member = server
        .seed_profile(Role::Member, ApprovalStatus::Pending, false)
        .await
        .unwrap();
    let token = server.token_for(member.id).unwrap();

    let me: Value = assert_json(
        server.get_auth("/api/v1/profiles/@me", &token).await.unwrap(),
        StatusCode::OK,
    )
    .await
    .unwrap();
    assert_eq!(me["onboarding_completed"], false);

    let updated: Value = assert_json(
        server
            .post_auth("/api/v1/profiles/@me/onboarding", &token, &onboarding_answers())
            .await
            .unwrap(),
        StatusCode::OK,
    )
    .await
    .unwrap();
    assert_eq!(updated["onboarding_completed"], true);
    assert_eq!(updated["approval_status"], "pending");
    assert_eq!(updated["region"], "Seoul");

    stub_code_exchange(&server.provider, "code-after-onboarding", member.id).await;
    let response = server
        .get("/auth/callback?code=code-after-onboarding")
        .await
        .unwrap();
    assert_eq!(
        location(&response).unwrap(),
        "https://hub.test/ko/support-programs"
    );
    let profile = server.profile(member.id).await.unwrap().unwrap();
    assert_eq!(profile.approval_status, ApprovalStatus::Approved);
}

#[tokio::test]
async fn test_onboarding_rejects_empty_answers() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let member = server
        .seed_profile(Role::Member, ApprovalStatus::Pending, false)
        .await
        .unwrap();
    let token = server.token_for(member.id).unwrap();

    let response = server
        .post_auth(
            "/api/v1/profiles/@me/onboarding",
            &token,
            &json!({ "region": "", "industry": "Retail", "level": "Seed" }),
        )
        .await
        .unwrap();

    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

#[tokio::test]
async fn test_profile_requires_valid_token() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server
        .get_auth("/api/v1/profiles/@me", "not-a-jwt")
        .await
        .unwrap();

    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

// ============================================================================
// Member Deletion Tests
// ============================================================================

#[tokio::test]
async fn test_admin_deletes_member() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let admin = server.seed_admin().await.unwrap();
    let member = server
        .seed_profile(Role::Member, ApprovalStatus::Rejected, true)
        .await
        .unwrap();
    stub_identity_delete(&server.provider, member.id, 200).await;
    let token = server.token_for(admin.id).unwrap();

    let response = server
        .delete_auth(&format!("/api/v1/admin/members/{}", member.id), &token)
        .await
        .unwrap();

    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["data"]["userId"], member.id.to_string());
    assert!(server.profile(member.id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_admin_cannot_delete_self() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let admin = server.seed_admin().await.unwrap();
    let token = server.token_for(admin.id).unwrap();

    let response = server
        .delete_auth(&format!("/api/v1/admin/members/{}", admin.id), &token)
        .await
        .unwrap();

    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();
    assert!(server.profile(admin.id).await.unwrap().is_some());
}

#[tokio::test]
async fn test_delete_with_malformed_id_is_bad_request() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let admin = server.seed_admin().await.unwrap();
    let token = server.token_for(admin.id).unwrap();

    let response = server
        .delete_auth("/api/v1/admin/members/not-a-uuid", &token)
        .await
        .unwrap();

    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}
