//! Live session service — external video-room provisioning and the
//! `live_sessions` record it leaves behind.
//!
//! TRADE-OFFS
//! ==========
//! Provisioning is a two-step sequence with no rollback: the room is
//! created at the external API before the row is inserted. An insert
//! failure leaves a provisioned-but-unrecorded room; nothing here retries
//! or reconciles.

use sqlx::{PgPool, Row};
use uuid::Uuid;

const DEFAULT_DAILY_API_URL: &str = "https://api.daily.co/v1";

/// Video-room API configuration loaded from environment.
#[derive(Debug, Clone)]
pub struct DailyConfig {
    pub api_key: String,
    pub api_url: String,
}

impl DailyConfig {
    /// Load from `DAILY_API_KEY` (and optional `DAILY_API_URL`).
    /// Returns `None` if the key is missing (provisioning will be disabled).
    #[must_use]
    pub fn from_env() -> Option<Self> {
        let api_key = std::env::var("DAILY_API_KEY").ok()?;
        let api_url = std::env::var("DAILY_API_URL").unwrap_or_else(|_| DEFAULT_DAILY_API_URL.to_owned());
        Some(Self { api_key, api_url })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LiveError {
    #[error("failed to create video room: {0}")]
    Upstream(String),
    #[error("failed to save room details: {0}")]
    Persistence(#[from] sqlx::Error),
}

/// Room details returned by the external API.
#[derive(Debug, Clone)]
pub struct RoomInfo {
    pub url: String,
    pub name: String,
}

#[derive(Debug, serde::Deserialize)]
struct DailyRoomResponse {
    url: String,
}

/// Extract the upstream error message from a non-success response body.
/// The room API reports `{"error": ...}`; anything else is passed through
/// raw with the status attached.
pub(crate) fn upstream_error_message(status: reqwest::StatusCode, body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(ToOwned::to_owned))
        .unwrap_or_else(|| format!("{status}: {body}"))
}

/// Create a room at the external video-room API.
///
/// # Errors
///
/// Returns [`LiveError::Upstream`] carrying the upstream message on a
/// transport failure or non-success response.
pub async fn create_room(config: &DailyConfig, room_name: &str) -> Result<RoomInfo, LiveError> {
    let client = reqwest::Client::new();
    let resp = client
        .post(format!("{}/rooms", config.api_url))
        .header("Authorization", format!("Bearer {}", config.api_key))
        .json(&serde_json::json!({
            "name": room_name,
            "properties": {
                "enable_screenshare": true,
                "enable_chat": true,
            },
        }))
        .send()
        .await
        .map_err(|e| LiveError::Upstream(e.to_string()))?;

    if !resp.status().is_success() {
        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();
        return Err(LiveError::Upstream(upstream_error_message(status, &body)));
    }

    let room: DailyRoomResponse = resp.json().await.map_err(|e| LiveError::Upstream(e.to_string()))?;

    Ok(RoomInfo { url: room.url, name: room_name.to_owned() })
}

/// Record a provisioned room. `teacher_id` is `None` when the caller's
/// bearer credential did not resolve to a known account.
///
/// # Errors
///
/// Returns [`LiveError::Persistence`] if the insert fails; the external
/// room is not rolled back.
pub async fn insert_live_session(
    pool: &PgPool,
    room_name: &str,
    room_url: &str,
    teacher_id: Option<Uuid>,
    scheduled_for: &str,
) -> Result<Uuid, LiveError> {
    let row = sqlx::query(
        r"INSERT INTO live_sessions (room_name, room_url, teacher_id, scheduled_for)
          VALUES ($1, $2, $3, $4::timestamptz)
          RETURNING id",
    )
    .bind(room_name)
    .bind(room_url)
    .bind(teacher_id)
    .bind(scheduled_for)
    .fetch_one(pool)
    .await?;

    Ok(row.get("id"))
}

/// Live session row as listed on the meetings pages.
#[derive(Debug, Clone, serde::Serialize)]
pub struct LiveSessionRow {
    pub id: Uuid,
    pub room_name: String,
    pub room_url: String,
    pub teacher_id: Option<Uuid>,
    pub scheduled_for: String,
}

fn live_session_from_row(row: &sqlx::postgres::PgRow) -> LiveSessionRow {
    LiveSessionRow {
        id: row.get("id"),
        room_name: row.get("room_name"),
        room_url: row.get("room_url"),
        teacher_id: row.get("teacher_id"),
        scheduled_for: row.get("scheduled_for"),
    }
}

/// List every scheduled session, soonest first.
///
/// # Errors
///
/// Returns a database error if the query fails.
pub async fn list_live_sessions(pool: &PgPool) -> Result<Vec<LiveSessionRow>, sqlx::Error> {
    let rows = sqlx::query(
        r#"SELECT id, room_name, room_url, teacher_id,
                  to_char(scheduled_for AT TIME ZONE 'UTC', 'YYYY-MM-DD"T"HH24:MI:SS"Z"') AS scheduled_for
           FROM live_sessions
           ORDER BY scheduled_for ASC"#,
    )
    .fetch_all(pool)
    .await?;

    Ok(rows.iter().map(live_session_from_row).collect())
}

/// List one teacher's scheduled sessions, soonest first.
///
/// # Errors
///
/// Returns a database error if the query fails.
pub async fn list_live_sessions_for_teacher(pool: &PgPool, teacher_id: Uuid) -> Result<Vec<LiveSessionRow>, sqlx::Error> {
    let rows = sqlx::query(
        r#"SELECT id, room_name, room_url, teacher_id,
                  to_char(scheduled_for AT TIME ZONE 'UTC', 'YYYY-MM-DD"T"HH24:MI:SS"Z"') AS scheduled_for
           FROM live_sessions
           WHERE teacher_id = $1
           ORDER BY scheduled_for ASC"#,
    )
    .bind(teacher_id)
    .fetch_all(pool)
    .await?;

    Ok(rows.iter().map(live_session_from_row).collect())
}

#[cfg(test)]
#[path = "live_test.rs"]
mod tests;
