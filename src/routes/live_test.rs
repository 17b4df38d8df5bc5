use super::*;
use axum::http::HeaderValue;

fn headers_with_auth(value: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
    headers
}

// =============================================================================
// bearer_token
// =============================================================================

#[test]
fn bearer_token_extracts_value() {
    let headers = headers_with_auth("Bearer abc123");
    assert_eq!(bearer_token(&headers), Some("abc123"));
}

#[test]
fn bearer_token_missing_header_is_none() {
    assert_eq!(bearer_token(&HeaderMap::new()), None);
}

#[test]
fn bearer_token_rejects_other_schemes() {
    let headers = headers_with_auth("Basic dXNlcjpwdw==");
    assert_eq!(bearer_token(&headers), None);
}

#[test]
fn bearer_token_rejects_empty_token() {
    let headers = headers_with_auth("Bearer   ");
    assert_eq!(bearer_token(&headers), None);
}

#[test]
fn bearer_token_trims_padding() {
    let headers = headers_with_auth("Bearer  tok-1 ");
    assert_eq!(bearer_token(&headers), Some("tok-1"));
}

// =============================================================================
// Request body
// =============================================================================

#[test]
fn create_body_uses_camel_case_wire_names() {
    let body: CreateLiveSessionBody =
        serde_json::from_str(r#"{"roomName":"algebra-review","scheduledFor":"2025-03-01T10:00"}"#).unwrap();
    assert_eq!(body.room_name, "algebra-review");
    assert_eq!(body.scheduled_for, "2025-03-01T10:00");
}

#[test]
fn create_body_rejects_snake_case() {
    let parsed = serde_json::from_str::<CreateLiveSessionBody>(
        r#"{"room_name":"algebra-review","scheduled_for":"2025-03-01T10:00"}"#,
    );
    assert!(parsed.is_err());
}
