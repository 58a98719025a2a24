//! Sign-in callback handler
//!
//! Always answers with a temporary redirect. On success the session tokens
//! ride along as cookies.

use axum::{
    extract::{Query, State},
    response::Redirect,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use hub_core::traits::AuthSession;
use hub_service::dto::CallbackQuery;
use hub_service::{CallbackRequest, CallbackService};
use tracing::debug;

use crate::state::AppState;

/// Cookie the site uses to remember the visitor's locale
pub const LOCALE_COOKIE: &str = "NEXT_LOCALE";
pub const ACCESS_TOKEN_COOKIE: &str = "hub-access-token";
pub const REFRESH_TOKEN_COOKIE: &str = "hub-refresh-token";

/// GET /auth/callback
pub async fn auth_callback(
    State(state): State<AppState>,
    query: Option<Query<CallbackQuery>>,
    jar: CookieJar,
) -> (CookieJar, Redirect) {
    let query = query.map(|Query(q)| q).unwrap_or_default();
    if let Some(description) = &query.error_description {
        debug!(error = ?query.error, %description, "Provider reported a sign-in error");
    }

    let verifier_cookie = state.config().auth.code_verifier_cookie.clone();
    let request = CallbackRequest {
        code: query.code,
        error: query.error,
        next: query.next,
        locale: jar.get(LOCALE_COOKIE).map(|c| c.value().to_string()),
        code_verifier: jar.get(&verifier_cookie).map(|c| c.value().to_string()),
    };

    let outcome = CallbackService::new(state.service_context())
        .handle(request)
        .await;

    let jar = match &outcome.session {
        Some(session) => {
            let secure = state.config().app.env.is_production();
            session_cookies(jar, session, secure)
                .remove(Cookie::build(verifier_cookie).path("/"))
        }
        None => jar,
    };

    (jar, Redirect::temporary(&outcome.redirect_url))
}

fn session_cookies(jar: CookieJar, session: &AuthSession, secure: bool) -> CookieJar {
    let cookie = |name: &'static str, value: String| {
        Cookie::build((name, value))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(secure)
    };

    let jar = jar.add(cookie(ACCESS_TOKEN_COOKIE, session.access_token.clone()));
    match &session.refresh_token {
        Some(refresh) => jar.add(cookie(REFRESH_TOKEN_COOKIE, refresh.clone())),
        None => jar,
    }
}
