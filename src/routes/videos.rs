//! Video lesson routes.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Json;

use crate::routes::auth::Authenticated;
use crate::services::material::{self, VideoRow};
use crate::state::AppState;

/// `GET /api/videos` — video lessons, newest first.
pub async fn list_videos(
    State(state): State<AppState>,
    _auth: Authenticated,
) -> Result<Json<Vec<VideoRow>>, StatusCode> {
    let rows = material::list_videos(&state.pool)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    Ok(Json(rows))
}
