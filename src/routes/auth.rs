//! Auth routes — signup, login, logout, and current-user resolution.

use axum::extract::{FromRef, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use serde::Deserialize;
use time::Duration;

use crate::routes::error_response;
use crate::services::profile::Role;
use crate::services::{auth as auth_svc, profile, session};
use crate::state::AppState;

pub(crate) const COOKIE_NAME: &str = "session_token";

pub(crate) fn env_bool(key: &str) -> Option<bool> {
    std::env::var(key)
        .ok()
        .and_then(|raw| match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Some(true),
            "0" | "false" | "no" | "off" => Some(false),
            _ => None,
        })
}

pub(crate) fn cookie_secure() -> bool {
    env_bool("COOKIE_SECURE").unwrap_or(false)
}

fn session_cookie(token: String, secure: bool) -> Cookie<'static> {
    Cookie::build((COOKIE_NAME, token))
        .path("/")
        .http_only(true)
        .same_site(axum_extra::extract::cookie::SameSite::Lax)
        .secure(secure)
        .build()
}

fn clear_session_cookie(secure: bool) -> Cookie<'static> {
    Cookie::build((COOKIE_NAME, ""))
        .path("/")
        .http_only(true)
        .same_site(axum_extra::extract::cookie::SameSite::Lax)
        .secure(secure)
        .max_age(Duration::ZERO)
        .build()
}

// =============================================================================
// AUTH EXTRACTOR
// =============================================================================

/// Authenticated caller extracted from the session cookie. Use as a
/// handler parameter to require authentication on API routes.
///
/// The identity is rebuilt from the session and profile rows on every
/// extraction; a failed role lookup still authenticates with the default
/// role.
pub struct Authenticated {
    pub user: session::AuthUser,
    pub token: String,
}

impl<S> axum::extract::FromRequestParts<S> for Authenticated
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut axum::http::request::Parts, state: &S) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let token = jar.get(COOKIE_NAME).map(Cookie::value).unwrap_or_default();
        if token.is_empty() {
            return Err(StatusCode::UNAUTHORIZED);
        }

        let app_state = AppState::from_ref(state);
        let user = session::resolve_auth_user(&app_state.pool, token)
            .await
            .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?
            .ok_or(StatusCode::UNAUTHORIZED)?;

        Ok(Self { user, token: token.to_owned() })
    }
}

// =============================================================================
// HANDLERS
// =============================================================================

fn auth_error_response(err: &auth_svc::AuthError) -> Response {
    let status = match err {
        auth_svc::AuthError::InvalidEmail => StatusCode::BAD_REQUEST,
        auth_svc::AuthError::EmailTaken => StatusCode::CONFLICT,
        auth_svc::AuthError::InvalidCredentials => StatusCode::UNAUTHORIZED,
        auth_svc::AuthError::Hash(_) | auth_svc::AuthError::ProfileWrite(_) | auth_svc::AuthError::Db(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    error_response(status, err.to_string())
}

#[derive(Deserialize)]
pub struct SignupBody {
    pub email: String,
    pub password: String,
    pub role: Role,
    pub full_name: Option<String>,
}

/// `POST /api/auth/signup` — create credential + profile, start a session.
pub async fn signup(State(state): State<AppState>, Json(body): Json<SignupBody>) -> Response {
    let user_id = match auth_svc::signup(&state.pool, &body.email, &body.password, body.role).await {
        Ok(id) => id,
        Err(e) => {
            tracing::warn!(error = %e, "signup failed");
            return auth_error_response(&e);
        }
    };

    // Display name is written after the fact, exactly like the original
    // signup flow; a failure here does not fail the signup.
    if let Some(full_name) = body.full_name.as_deref() {
        if let Err(e) = profile::update_full_name(&state.pool, user_id, full_name).await {
            tracing::warn!(user_id = %user_id, error = %e, "full name update failed");
        }
    }

    let token = match session::create_session(&state.pool, user_id).await {
        Ok(t) => t,
        Err(e) => {
            tracing::error!(error = %e, "session creation failed");
            return error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to create session");
        }
    };

    let jar = CookieJar::new().add(session_cookie(token, cookie_secure()));
    (StatusCode::CREATED, jar, Json(serde_json::json!({ "id": user_id, "role": body.role }))).into_response()
}

#[derive(Deserialize)]
pub struct LoginBody {
    pub email: String,
    pub password: String,
}

/// `POST /api/auth/login` — verify credentials, start a session.
///
/// The response body does not carry the user; callers fetch the resolved
/// identity from `/api/auth/me` afterwards.
pub async fn login(State(state): State<AppState>, Json(body): Json<LoginBody>) -> Response {
    let user_id = match auth_svc::verify_credentials(&state.pool, &body.email, &body.password).await {
        Ok(id) => id,
        Err(e) => return auth_error_response(&e),
    };

    let token = match session::create_session(&state.pool, user_id).await {
        Ok(t) => t,
        Err(e) => {
            tracing::error!(error = %e, "session creation failed");
            return error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to create session");
        }
    };

    let jar = CookieJar::new().add(session_cookie(token, cookie_secure()));
    (jar, Json(serde_json::json!({ "ok": true }))).into_response()
}

/// `POST /api/auth/logout` — delete the session, clear the cookie.
///
/// The session row is gone before this responds; no notification
/// round-trip is involved.
pub async fn logout(State(state): State<AppState>, auth: Authenticated) -> impl IntoResponse {
    let _ = session::delete_session(&state.pool, &auth.token).await;

    let jar = CookieJar::new().add(clear_session_cookie(cookie_secure()));
    (jar, StatusCode::NO_CONTENT)
}

/// `GET /api/auth/me` — return the freshly resolved caller identity.
pub async fn me(auth: Authenticated) -> Json<session::AuthUser> {
    Json(auth.user)
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
