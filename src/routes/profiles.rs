//! Profile routes — dashboard listings and the caller's own profile.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Json;
use serde::Deserialize;

use crate::routes::auth::Authenticated;
use crate::services::profile::{self, ProfileRow};
use crate::state::AppState;

/// `GET /api/profiles` — every profile, newest first.
pub async fn list_profiles(
    State(state): State<AppState>,
    _auth: Authenticated,
) -> Result<Json<Vec<ProfileRow>>, StatusCode> {
    let rows = profile::list_profiles(&state.pool)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    Ok(Json(rows))
}

/// `GET /api/profiles/students` — student roster ordered by name.
pub async fn list_students(
    State(state): State<AppState>,
    _auth: Authenticated,
) -> Result<Json<Vec<ProfileRow>>, StatusCode> {
    let rows = profile::list_students(&state.pool)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    Ok(Json(rows))
}

#[derive(Deserialize)]
pub struct UpdateProfileBody {
    pub full_name: String,
}

/// `PATCH /api/profiles/me` — update the caller's display name.
pub async fn update_me(
    State(state): State<AppState>,
    auth: Authenticated,
    Json(body): Json<UpdateProfileBody>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    profile::update_full_name(&state.pool, auth.user.id, &body.full_name)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    Ok(Json(serde_json::json!({ "ok": true })))
}
