use super::*;

// =============================================================================
// env_bool — uses unique env var names to avoid races with parallel tests.
// =============================================================================

#[test]
fn env_bool_true_variants() {
    for (i, val) in ["1", "true", "YES", "On"].iter().enumerate() {
        let key = format!("__EDPORTAL_EB_TRUE_{i}__");
        unsafe { std::env::set_var(&key, val) };
        assert_eq!(env_bool(&key), Some(true), "expected true for {val:?}");
        unsafe { std::env::remove_var(&key) };
    }
}

#[test]
fn env_bool_false_variants() {
    for (i, val) in ["0", "false", "no", "OFF"].iter().enumerate() {
        let key = format!("__EDPORTAL_EB_FALSE_{i}__");
        unsafe { std::env::set_var(&key, val) };
        assert_eq!(env_bool(&key), Some(false), "expected false for {val:?}");
        unsafe { std::env::remove_var(&key) };
    }
}

#[test]
fn env_bool_invalid_or_unset_returns_none() {
    let key = "__EDPORTAL_EB_INVALID__";
    unsafe { std::env::set_var(key, "maybe") };
    assert_eq!(env_bool(key), None);
    unsafe { std::env::remove_var(key) };
    assert_eq!(env_bool("__EDPORTAL_EB_SURELY_UNSET__"), None);
}

// =============================================================================
// Cookies
// =============================================================================

#[test]
fn session_cookie_is_http_only_lax() {
    let cookie = session_cookie("abc123".into(), false);
    assert_eq!(cookie.name(), "session_token");
    assert_eq!(cookie.value(), "abc123");
    assert_eq!(cookie.http_only(), Some(true));
    assert_eq!(cookie.secure(), Some(false));
}

#[test]
fn clear_cookie_expires_immediately() {
    let cookie = clear_session_cookie(true);
    assert_eq!(cookie.value(), "");
    assert_eq!(cookie.max_age(), Some(Duration::ZERO));
    assert_eq!(cookie.secure(), Some(true));
}

// =============================================================================
// Request bodies
// =============================================================================

#[test]
fn signup_body_parses_role() {
    let body: SignupBody = serde_json::from_str(
        r#"{"email":"t@example.com","password":"pw","role":"teacher","full_name":"T. Example"}"#,
    )
    .unwrap();
    assert_eq!(body.role, Role::Teacher);
    assert_eq!(body.full_name.as_deref(), Some("T. Example"));
}

#[test]
fn signup_body_full_name_optional() {
    let body: SignupBody =
        serde_json::from_str(r#"{"email":"s@example.com","password":"pw","role":"student"}"#).unwrap();
    assert!(body.full_name.is_none());
}

#[test]
fn signup_body_rejects_unknown_role() {
    let parsed = serde_json::from_str::<SignupBody>(
        r#"{"email":"x@example.com","password":"pw","role":"principal"}"#,
    );
    assert!(parsed.is_err());
}

// =============================================================================
// Error mapping
// =============================================================================

#[test]
fn invalid_credentials_map_to_unauthorized() {
    let response = auth_error_response(&auth_svc::AuthError::InvalidCredentials);
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[test]
fn email_taken_maps_to_conflict() {
    let response = auth_error_response(&auth_svc::AuthError::EmailTaken);
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[test]
fn profile_write_failure_maps_to_server_error() {
    let response = auth_error_response(&auth_svc::AuthError::ProfileWrite(sqlx::Error::RowNotFound));
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}
