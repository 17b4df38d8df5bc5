//! Course material routes — upload and listing.

use axum::extract::{Multipart, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::routes::auth::Authenticated;
use crate::routes::error_response;
use crate::services::material::{self, MaterialError, MaterialRow};
use crate::services::storage::StorageError;
use crate::state::AppState;

/// Public URL prefix the stored objects are served under.
const PUBLIC_PREFIX: &str = "/storage/course-materials";

#[derive(Serialize)]
pub struct MaterialResponse {
    pub id: Uuid,
    pub title: String,
    pub category: String,
    pub url: String,
}

pub(crate) fn to_response(row: MaterialRow) -> MaterialResponse {
    let url = format!("{PUBLIC_PREFIX}/{}", row.file_path);
    MaterialResponse { id: row.id, title: row.title, category: row.category, url }
}

pub(crate) fn material_error_to_status(err: &MaterialError) -> StatusCode {
    match err {
        MaterialError::InvalidCategory | MaterialError::Storage(StorageError::InvalidName(_)) => {
            StatusCode::BAD_REQUEST
        }
        MaterialError::Storage(_) | MaterialError::Db(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

async fn store_material(
    state: &AppState,
    teacher_id: Uuid,
    raw_category: &str,
    file_name: &str,
    bytes: &[u8],
) -> Result<MaterialResponse, MaterialError> {
    let category = material::normalize_category(raw_category).ok_or(MaterialError::InvalidCategory)?;

    // Object first, record second. A failed insert keeps the stored
    // object; there is no rollback.
    let file_path = state.storage.save(&category, file_name, bytes).await?;
    let id = material::insert_material(&state.pool, file_name, &category, &file_path, teacher_id).await?;

    let url = format!("{PUBLIC_PREFIX}/{file_path}");
    Ok(MaterialResponse { id, title: file_name.to_owned(), category, url })
}

/// `POST /api/materials` — multipart upload: a `category` field plus one
/// `file` field.
pub async fn upload_material(
    State(state): State<AppState>,
    auth: Authenticated,
    mut multipart: Multipart,
) -> Response {
    let mut category: Option<String> = None;
    let mut file: Option<(String, Vec<u8>)> = None;

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => return error_response(StatusCode::BAD_REQUEST, e.to_string()),
        };

        match field.name() {
            Some("category") => match field.text().await {
                Ok(text) => category = Some(text),
                Err(e) => return error_response(StatusCode::BAD_REQUEST, e.to_string()),
            },
            Some("file") => {
                let Some(name) = field.file_name().map(ToOwned::to_owned) else {
                    return error_response(StatusCode::BAD_REQUEST, "file field missing a file name");
                };
                match field.bytes().await {
                    Ok(bytes) => file = Some((name, bytes.to_vec())),
                    Err(e) => return error_response(StatusCode::BAD_REQUEST, e.to_string()),
                }
            }
            _ => {}
        }
    }

    let Some(category) = category else {
        return error_response(StatusCode::BAD_REQUEST, "missing category");
    };
    let Some((file_name, bytes)) = file else {
        return error_response(StatusCode::BAD_REQUEST, "missing file");
    };

    match store_material(&state, auth.user.id, &category, &file_name, &bytes).await {
        Ok(material) => (StatusCode::CREATED, Json(material)).into_response(),
        Err(e) => {
            tracing::error!(error = %e, file_name = %file_name, "material upload failed");
            error_response(material_error_to_status(&e), e.to_string())
        }
    }
}

#[derive(Deserialize)]
pub struct ListMaterialsQuery {
    pub category: Option<String>,
}

/// `GET /api/materials` — list materials newest first, optionally
/// filtered by category.
pub async fn list_materials(
    State(state): State<AppState>,
    _auth: Authenticated,
    Query(query): Query<ListMaterialsQuery>,
) -> Result<Json<Vec<MaterialResponse>>, StatusCode> {
    let rows = material::list_materials(&state.pool, query.category.as_deref())
        .await
        .map_err(|e| material_error_to_status(&e))?;

    Ok(Json(rows.into_iter().map(to_response).collect()))
}

#[cfg(test)]
#[path = "materials_test.rs"]
mod tests;
