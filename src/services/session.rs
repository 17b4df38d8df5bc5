//! Session management and authenticated-user resolution.
//!
//! ARCHITECTURE
//! ============
//! Sessions are opaque random tokens stored server-side with an expiry.
//! The authenticated user is never cached between requests: every check
//! rebuilds it wholesale from the session row plus the profile lookup, so
//! a stale role can survive at most one request.
//!
//! Role resolution is fail-open: a missing profile row, an unknown stored
//! value, or a failed profile read all resolve to the default role. The
//! caller is still authenticated; the failure is logged and nothing else.

use std::fmt::Write;

use rand::Rng;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::services::profile::{self, Role};

pub(crate) fn bytes_to_hex(bytes: &[u8]) -> String {
    let mut s = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        let _ = write!(s, "{b:02x}");
    }
    s
}

/// Generate a cryptographically random 32-byte hex session token.
#[must_use]
pub fn generate_token() -> String {
    let bytes: [u8; 32] = rand::rng().random();
    bytes_to_hex(&bytes)
}

/// Account row a live session points at.
#[derive(Debug, Clone)]
pub struct SessionUser {
    pub id: Uuid,
    pub email: String,
}

/// The resolved caller identity: session user plus profile role.
///
/// Derived, not authoritative — rebuilt from scratch on every check and
/// replaced wholesale, never partially mutated.
#[derive(Debug, Clone, serde::Serialize)]
pub struct AuthUser {
    pub id: Uuid,
    pub email: String,
    pub role: Role,
}

/// Create a session for the given user, returning the token.
///
/// # Errors
///
/// Returns a database error if the insert fails.
pub async fn create_session(pool: &PgPool, user_id: Uuid) -> Result<String, sqlx::Error> {
    let token = generate_token();
    sqlx::query("INSERT INTO sessions (token, user_id) VALUES ($1, $2)")
        .bind(&token)
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(token)
}

/// Validate a session token and return the account it belongs to.
///
/// # Errors
///
/// Returns a database error if the query fails.
pub async fn validate_session(pool: &PgPool, token: &str) -> Result<Option<SessionUser>, sqlx::Error> {
    let row = sqlx::query(
        r"SELECT u.id, u.email
          FROM sessions s
          JOIN users u ON u.id = s.user_id
          WHERE s.token = $1 AND s.expires_at > now()",
    )
    .bind(token)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(|r| SessionUser { id: r.get("id"), email: r.get("email") }))
}

/// Delete a session by token.
///
/// # Errors
///
/// Returns a database error if the delete fails.
pub async fn delete_session(pool: &PgPool, token: &str) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM sessions WHERE token = $1")
        .bind(token)
        .execute(pool)
        .await?;
    Ok(())
}

/// Resolve the full authenticated user for a token: session lookup, then
/// profile role.
///
/// Returns `Some` iff a live session exists at call time, independent of
/// the profile-lookup outcome — a failed or empty role read degrades to
/// [`Role::default`] and is only logged.
///
/// # Errors
///
/// Returns a database error only if the session lookup itself fails.
pub async fn resolve_auth_user(pool: &PgPool, token: &str) -> Result<Option<AuthUser>, sqlx::Error> {
    let Some(user) = validate_session(pool, token).await? else {
        return Ok(None);
    };

    let role = match profile::fetch_role(pool, user.id).await {
        Ok(Some(role)) => role,
        Ok(None) => Role::default(),
        Err(e) => {
            tracing::warn!(user_id = %user.id, error = %e, "profile role lookup failed, using default role");
            Role::default()
        }
    };

    Ok(Some(AuthUser { id: user.id, email: user.email, role }))
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
