//! Profile lookup and role resolution.
//!
//! DESIGN
//! ======
//! A profile row associates a user id with a role and display name. Role
//! resolution is deliberately forgiving: a missing row or an unknown stored
//! value resolves to the default role rather than failing the request.

use sqlx::{PgPool, Row};
use uuid::Uuid;

/// Access role stored on a profile. Governs which portal area a user may
/// enter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Teacher,
    Admin,
}

impl Role {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Teacher => "teacher",
            Self::Admin => "admin",
        }
    }

    /// Parse a stored role string. Unknown values yield `None` so callers
    /// can fall back to [`Role::default`].
    #[must_use]
    pub fn from_str(raw: &str) -> Option<Self> {
        match raw {
            "student" => Some(Self::Student),
            "teacher" => Some(Self::Teacher),
            "admin" => Some(Self::Admin),
            _ => None,
        }
    }
}

impl Default for Role {
    /// Accounts with no resolvable profile role are treated as students.
    fn default() -> Self {
        Self::Student
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Profile row as listed on the admin and teacher dashboards.
#[derive(Debug, Clone, serde::Serialize)]
pub struct ProfileRow {
    pub id: Uuid,
    pub full_name: Option<String>,
    pub role: String,
    pub created_at: String,
}

fn profile_from_row(row: &sqlx::postgres::PgRow) -> ProfileRow {
    ProfileRow {
        id: row.get("id"),
        full_name: row.get("full_name"),
        role: row.get("role"),
        created_at: row.get("created_at"),
    }
}

/// Fetch the stored role for a user, if a profile row exists.
///
/// # Errors
///
/// Returns a database error if the query fails.
pub async fn fetch_role(pool: &PgPool, user_id: Uuid) -> Result<Option<Role>, sqlx::Error> {
    let row = sqlx::query("SELECT role FROM profiles WHERE id = $1")
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

    Ok(row.and_then(|r| Role::from_str(r.get("role"))))
}

/// Insert or replace the profile row written during signup.
///
/// # Errors
///
/// Returns a database error if the upsert fails.
pub async fn upsert_profile(pool: &PgPool, user_id: Uuid, role: Role) -> Result<(), sqlx::Error> {
    sqlx::query(
        r"INSERT INTO profiles (id, role)
          VALUES ($1, $2)
          ON CONFLICT (id) DO UPDATE SET role = EXCLUDED.role",
    )
    .bind(user_id)
    .bind(role.as_str())
    .execute(pool)
    .await?;
    Ok(())
}

/// Update the display name on the caller's own profile.
///
/// # Errors
///
/// Returns a database error if the update fails.
pub async fn update_full_name(pool: &PgPool, user_id: Uuid, full_name: &str) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE profiles SET full_name = $2 WHERE id = $1")
        .bind(user_id)
        .bind(full_name)
        .execute(pool)
        .await?;
    Ok(())
}

/// List every profile, newest first. Surfaced on the admin dashboard.
///
/// # Errors
///
/// Returns a database error if the query fails.
pub async fn list_profiles(pool: &PgPool) -> Result<Vec<ProfileRow>, sqlx::Error> {
    let rows = sqlx::query(
        r#"SELECT id, full_name, role,
                  to_char(created_at AT TIME ZONE 'UTC', 'YYYY-MM-DD"T"HH24:MI:SS"Z"') AS created_at
           FROM profiles
           ORDER BY created_at DESC"#,
    )
    .fetch_all(pool)
    .await?;

    Ok(rows.iter().map(profile_from_row).collect())
}

/// List student profiles ordered by display name. Surfaced on the teacher
/// dashboard roster.
///
/// # Errors
///
/// Returns a database error if the query fails.
pub async fn list_students(pool: &PgPool) -> Result<Vec<ProfileRow>, sqlx::Error> {
    let rows = sqlx::query(
        r#"SELECT id, full_name, role,
                  to_char(created_at AT TIME ZONE 'UTC', 'YYYY-MM-DD"T"HH24:MI:SS"Z"') AS created_at
           FROM profiles
           WHERE role = 'student'
           ORDER BY full_name ASC NULLS LAST"#,
    )
    .fetch_all(pool)
    .await?;

    Ok(rows.iter().map(profile_from_row).collect())
}

#[cfg(test)]
#[path = "profile_test.rs"]
mod tests;
