use super::*;

// =============================================================================
// DailyConfig — uses unique env var names to avoid races with parallel
// tests; from_env reads the shared DAILY_* vars, so only the URL default
// is asserted through it.
// =============================================================================

#[test]
fn default_api_url_points_at_daily() {
    assert_eq!(DEFAULT_DAILY_API_URL, "https://api.daily.co/v1");
}

// =============================================================================
// upstream_error_message
// =============================================================================

#[test]
fn upstream_error_prefers_json_error_field() {
    let msg = upstream_error_message(
        reqwest::StatusCode::BAD_REQUEST,
        r#"{"error":"invalid-room-name","info":"ignored"}"#,
    );
    assert_eq!(msg, "invalid-room-name");
}

#[test]
fn upstream_error_falls_back_to_status_and_body() {
    let msg = upstream_error_message(reqwest::StatusCode::BAD_GATEWAY, "gateway exploded");
    assert_eq!(msg, "502 Bad Gateway: gateway exploded");
}

#[test]
fn upstream_error_handles_non_string_error_field() {
    let msg = upstream_error_message(reqwest::StatusCode::BAD_REQUEST, r#"{"error":{"code":7}}"#);
    assert!(msg.starts_with("400 Bad Request"));
}

#[test]
fn upstream_error_handles_empty_body() {
    let msg = upstream_error_message(reqwest::StatusCode::INTERNAL_SERVER_ERROR, "");
    assert_eq!(msg, "500 Internal Server Error: ");
}

// =============================================================================
// Error surface
// =============================================================================

#[test]
fn upstream_error_message_is_prefixed() {
    let err = LiveError::Upstream("room limit reached".into());
    assert_eq!(err.to_string(), "failed to create video room: room limit reached");
}

#[test]
fn persistence_error_message_is_prefixed() {
    let err = LiveError::Persistence(sqlx::Error::RowNotFound);
    assert!(err.to_string().starts_with("failed to save room details"));
}

// =============================================================================
// LiveSessionRow serde
// =============================================================================

#[test]
fn live_session_row_serializes_nullable_teacher() {
    let row = LiveSessionRow {
        id: Uuid::nil(),
        room_name: "algebra-review".into(),
        room_url: "https://rooms.example/algebra-review".into(),
        teacher_id: None,
        scheduled_for: "2025-03-01T10:00:00Z".into(),
    };
    let json = serde_json::to_value(&row).unwrap();
    assert!(json["teacher_id"].is_null());
    assert_eq!(json["room_name"], "algebra-review");
}
