//! Course material records — category normalization, inserts, listing.
//!
//! The file bytes themselves live in the object store; rows here carry the
//! bucket-relative path the public URL is derived from. Upload is a
//! two-step sequence with no rollback: a failed insert leaves the stored
//! object behind.

use sqlx::{PgPool, Row};
use uuid::Uuid;

#[derive(Debug, thiserror::Error)]
pub enum MaterialError {
    #[error("invalid category")]
    InvalidCategory,
    #[error("storage error: {0}")]
    Storage(#[from] crate::services::storage::StorageError),
    #[error("database error: {0}")]
    Db(#[from] sqlx::Error),
}

/// Normalize a display category into its stored form: trimmed, lowercase,
/// whitespace runs and path separators collapsed to dashes
/// (`"Web Development"` → `"web-development"`). The result doubles as a
/// storage path component, so separators may not survive.
#[must_use]
pub fn normalize_category(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    let slug = trimmed
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
        .replace(['/', '\\'], "-");
    Some(slug)
}

/// Material row as listed on the study-materials pages.
#[derive(Debug, Clone, serde::Serialize)]
pub struct MaterialRow {
    pub id: Uuid,
    pub title: String,
    pub category: String,
    pub file_path: String,
    pub teacher_id: Option<Uuid>,
    pub created_at: String,
}

fn material_from_row(row: &sqlx::postgres::PgRow) -> MaterialRow {
    MaterialRow {
        id: row.get("id"),
        title: row.get("title"),
        category: row.get("category"),
        file_path: row.get("file_path"),
        teacher_id: row.get("teacher_id"),
        created_at: row.get("created_at"),
    }
}

/// Record an uploaded material.
///
/// # Errors
///
/// Returns a database error if the insert fails.
pub async fn insert_material(
    pool: &PgPool,
    title: &str,
    category: &str,
    file_path: &str,
    teacher_id: Uuid,
) -> Result<Uuid, MaterialError> {
    let row = sqlx::query(
        r"INSERT INTO course_materials (title, category, file_path, teacher_id)
          VALUES ($1, $2, $3, $4)
          RETURNING id",
    )
    .bind(title)
    .bind(category)
    .bind(file_path)
    .bind(teacher_id)
    .fetch_one(pool)
    .await?;

    Ok(row.get("id"))
}

/// List materials newest first, optionally restricted to one category.
///
/// # Errors
///
/// Returns a database error if the query fails.
pub async fn list_materials(pool: &PgPool, category: Option<&str>) -> Result<Vec<MaterialRow>, MaterialError> {
    let rows = match category {
        Some(category) => {
            sqlx::query(
                r#"SELECT id, title, category, file_path, teacher_id,
                          to_char(created_at AT TIME ZONE 'UTC', 'YYYY-MM-DD"T"HH24:MI:SS"Z"') AS created_at
                   FROM course_materials
                   WHERE category = $1
                   ORDER BY created_at DESC"#,
            )
            .bind(category)
            .fetch_all(pool)
            .await?
        }
        None => {
            sqlx::query(
                r#"SELECT id, title, category, file_path, teacher_id,
                          to_char(created_at AT TIME ZONE 'UTC', 'YYYY-MM-DD"T"HH24:MI:SS"Z"') AS created_at
                   FROM course_materials
                   ORDER BY created_at DESC"#,
            )
            .fetch_all(pool)
            .await?
        }
    };

    Ok(rows.iter().map(material_from_row).collect())
}

/// Video lesson row. Rows are curated out of band; this service only
/// lists them.
#[derive(Debug, Clone, serde::Serialize)]
pub struct VideoRow {
    pub id: Uuid,
    pub title: String,
    pub video_url: String,
    pub created_at: String,
}

/// List video lessons newest first.
///
/// # Errors
///
/// Returns a database error if the query fails.
pub async fn list_videos(pool: &PgPool) -> Result<Vec<VideoRow>, MaterialError> {
    let rows = sqlx::query(
        r#"SELECT id, title, video_url,
                  to_char(created_at AT TIME ZONE 'UTC', 'YYYY-MM-DD"T"HH24:MI:SS"Z"') AS created_at
           FROM course_videos
           ORDER BY created_at DESC"#,
    )
    .fetch_all(pool)
    .await?;

    Ok(rows
        .iter()
        .map(|r| VideoRow {
            id: r.get("id"),
            title: r.get("title"),
            video_url: r.get("video_url"),
            created_at: r.get("created_at"),
        })
        .collect())
}

#[cfg(test)]
#[path = "material_test.rs"]
mod tests;
