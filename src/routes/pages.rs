//! Page payload handlers for the guarded portal routes.
//!
//! Each handler returns the JSON its dashboard view renders. The guard
//! middleware has already admitted the caller and injected the resolved
//! identity into request extensions; handlers only compose service calls.

use std::collections::BTreeMap;

use axum::Extension;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Json;

use crate::routes::materials::{MaterialResponse, to_response};
use crate::services::session::AuthUser;
use crate::services::{live, material, profile};
use crate::state::AppState;

/// `GET /student/dashboard`
pub async fn student_dashboard(Extension(user): Extension<AuthUser>) -> Json<serde_json::Value> {
    Json(serde_json::json!({ "user": user }))
}

/// `GET /student/meetings` — every scheduled live session, soonest first.
pub async fn student_meetings(
    State(state): State<AppState>,
    Extension(_user): Extension<AuthUser>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    let sessions = live::list_live_sessions(&state.pool)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    Ok(Json(serde_json::json!({ "live_sessions": sessions })))
}

/// `GET /student/courses` — video lessons, newest first.
pub async fn student_courses(
    State(state): State<AppState>,
    Extension(_user): Extension<AuthUser>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    let videos = material::list_videos(&state.pool)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    Ok(Json(serde_json::json!({ "videos": videos })))
}

/// `GET /student/courses/study-materials` — materials grouped by category.
pub async fn study_materials(
    State(state): State<AppState>,
    Extension(_user): Extension<AuthUser>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    let rows = material::list_materials(&state.pool, None)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    let mut by_category: BTreeMap<String, Vec<MaterialResponse>> = BTreeMap::new();
    for row in rows {
        by_category.entry(row.category.clone()).or_default().push(to_response(row));
    }

    Ok(Json(serde_json::json!({ "materials": by_category })))
}

/// `GET /teacher/dashboard` — student roster plus the teacher's own
/// scheduled sessions.
pub async fn teacher_dashboard(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    let students = profile::list_students(&state.pool)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    let sessions = live::list_live_sessions_for_teacher(&state.pool, user.id)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    Ok(Json(serde_json::json!({
        "user": user,
        "students": students,
        "live_sessions": sessions,
    })))
}

/// `GET /admin/dashboard` — every profile, newest first.
pub async fn admin_dashboard(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    let profiles = profile::list_profiles(&state.pool)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    Ok(Json(serde_json::json!({ "user": user, "profiles": profiles })))
}
