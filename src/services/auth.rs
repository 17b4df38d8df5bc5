//! Credential service — password signup, login verification, and the
//! signup-time profile write.
//!
//! TRADE-OFFS
//! ==========
//! Signup is a two-step, non-transactional sequence: the credential row is
//! committed before the profile row is written. A profile-write failure
//! therefore leaves an orphaned credential with no profile; such accounts
//! still authenticate and fall back to the default role on resolution.

use argon2::{Argon2, PasswordHasher, PasswordVerifier};
use password_hash::{PasswordHash, SaltString};
use rand::Rng;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::services::profile::{self, Role};

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("invalid email address")]
    InvalidEmail,
    #[error("email already registered")]
    EmailTaken,
    #[error("invalid email or password")]
    InvalidCredentials,
    #[error("password hashing failed: {0}")]
    Hash(String),
    #[error("profile write failed: {0}")]
    ProfileWrite(sqlx::Error),
    #[error("database error: {0}")]
    Db(#[from] sqlx::Error),
}

/// Lowercase and structurally validate an email address.
#[must_use]
pub fn normalize_email(email: &str) -> Option<String> {
    let normalized = email.trim().to_ascii_lowercase();
    if normalized.is_empty() || !normalized.contains('@') {
        return None;
    }
    let parts = normalized.split('@').collect::<Vec<_>>();
    if parts.len() != 2 || parts[0].is_empty() || parts[1].is_empty() {
        return None;
    }
    Some(normalized)
}

/// Hash a password into PHC string format.
///
/// # Errors
///
/// Returns [`AuthError::Hash`] if salting or hashing fails.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt_bytes: [u8; 16] = rand::rng().random();
    let salt = SaltString::encode_b64(&salt_bytes).map_err(|e| AuthError::Hash(e.to_string()))?;
    let phc = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AuthError::Hash(e.to_string()))?
        .to_string();
    Ok(phc)
}

/// Verify a password against a stored PHC hash. Malformed hashes verify
/// as false rather than erroring.
#[must_use]
pub fn verify_password(hash: &str, password: &str) -> bool {
    match PasswordHash::new(hash) {
        Ok(parsed) => Argon2::default().verify_password(password.as_bytes(), &parsed).is_ok(),
        Err(_) => false,
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if matches!(db.kind(), sqlx::error::ErrorKind::UniqueViolation))
}

/// Create a credential row, returning the new user's id.
///
/// # Errors
///
/// Returns [`AuthError::EmailTaken`] on a duplicate email, or a database
/// error if the insert fails.
pub async fn create_credential(pool: &PgPool, email: &str, password: &str) -> Result<Uuid, AuthError> {
    let normalized = normalize_email(email).ok_or(AuthError::InvalidEmail)?;
    let password_hash = hash_password(password)?;

    let row = sqlx::query("INSERT INTO users (email, password_hash) VALUES ($1, $2) RETURNING id")
        .bind(&normalized)
        .bind(&password_hash)
        .fetch_one(pool)
        .await
        .map_err(|e| if is_unique_violation(&e) { AuthError::EmailTaken } else { AuthError::Db(e) })?;

    Ok(row.get("id"))
}

/// Verify a login attempt, returning the user's id on success.
///
/// An unknown email and a wrong password both report
/// [`AuthError::InvalidCredentials`].
///
/// # Errors
///
/// Returns a database error if the lookup fails.
pub async fn verify_credentials(pool: &PgPool, email: &str, password: &str) -> Result<Uuid, AuthError> {
    let normalized = normalize_email(email).ok_or(AuthError::InvalidCredentials)?;

    let row = sqlx::query("SELECT id, password_hash FROM users WHERE email = $1")
        .bind(&normalized)
        .fetch_optional(pool)
        .await?;

    let Some(row) = row else {
        return Err(AuthError::InvalidCredentials);
    };

    let stored: String = row.get("password_hash");
    if !verify_password(&stored, password) {
        return Err(AuthError::InvalidCredentials);
    }

    Ok(row.get("id"))
}

/// Sign up a new account: create the credential, then write the profile
/// row carrying the chosen role.
///
/// # Errors
///
/// Credential failures surface as-is; a failed profile write surfaces as
/// the distinct [`AuthError::ProfileWrite`] and leaves the credential row
/// behind.
pub async fn signup(pool: &PgPool, email: &str, password: &str, role: Role) -> Result<Uuid, AuthError> {
    let user_id = create_credential(pool, email, password).await?;

    profile::upsert_profile(pool, user_id, role)
        .await
        .map_err(AuthError::ProfileWrite)?;

    Ok(user_id)
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
