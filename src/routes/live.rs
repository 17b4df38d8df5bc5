//! Live session routes — video-room provisioning and meeting listings.

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Json, Response};
use serde::Deserialize;

use crate::routes::auth::Authenticated;
use crate::routes::error_response;
use crate::services::{live as live_svc, session};
use crate::state::AppState;

/// Extract the token from an `Authorization: Bearer ...` header.
pub(crate) fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    value
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLiveSessionBody {
    pub room_name: String,
    pub scheduled_for: String,
}

/// `POST /api/live-sessions` — provision an external video room and
/// record it.
///
/// Stateless per invocation: validate the bearer credential is present,
/// create the room upstream, then insert the `live_sessions` row. An
/// upstream failure never reaches the insert; an insert failure does not
/// roll the room back.
pub async fn create_live_session(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<CreateLiveSessionBody>,
) -> Response {
    let Some(token) = bearer_token(&headers) else {
        return error_response(StatusCode::UNAUTHORIZED, "No authorization header");
    };

    let Some(daily) = &state.daily else {
        return error_response(StatusCode::SERVICE_UNAVAILABLE, "Video-room API not configured");
    };

    let room = match live_svc::create_room(daily, &body.room_name).await {
        Ok(room) => room,
        Err(e) => {
            tracing::error!(error = %e, room_name = %body.room_name, "room creation failed");
            return error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string());
        }
    };

    // Resolve the caller from the bearer token. An unresolvable identity
    // records the session without a teacher, as the original did.
    let teacher_id = match session::validate_session(&state.pool, token).await {
        Ok(user) => user.map(|u| u.id),
        Err(e) => {
            tracing::warn!(error = %e, "bearer identity lookup failed");
            None
        }
    };

    if let Err(e) = live_svc::insert_live_session(&state.pool, &room.name, &room.url, teacher_id, &body.scheduled_for).await
    {
        tracing::error!(error = %e, room_url = %room.url, "room record insert failed, room not rolled back");
        return error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string());
    }

    Json(serde_json::json!({ "url": room.url, "name": room.name })).into_response()
}

/// `GET /api/live-sessions` — all scheduled sessions, soonest first.
pub async fn list_live_sessions(
    State(state): State<AppState>,
    _auth: Authenticated,
) -> Result<Json<Vec<live_svc::LiveSessionRow>>, StatusCode> {
    let rows = live_svc::list_live_sessions(&state.pool)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    Ok(Json(rows))
}

/// `GET /api/live-sessions/mine` — the calling teacher's sessions.
pub async fn my_live_sessions(
    State(state): State<AppState>,
    auth: Authenticated,
) -> Result<Json<Vec<live_svc::LiveSessionRow>>, StatusCode> {
    let rows = live_svc::list_live_sessions_for_teacher(&state.pool, auth.user.id)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    Ok(Json(rows))
}

#[cfg(test)]
#[path = "live_test.rs"]
mod tests;
