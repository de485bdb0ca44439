use axum::{
    body::Bytes,
    extract::{Path, State},
    Extension, Json,
};

use super::forbidden;
use crate::database::models::{Note, NotePatch};
use crate::database::DatabaseError;
use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::state::AppState;

/// GET /notes/:id
pub async fn get(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<Json<Note>, ApiError> {
    let note = state
        .notes
        .find_by_id(&id, &user.id)
        .await
        .map_err(|e| match e {
            DatabaseError::NotFound(_) => ApiError::not_found(format!("Note with id {} not found!", id)),
            DatabaseError::Forbidden(_) => forbidden(&id),
            e => {
                tracing::error!("Reading note {} failed: {}", id, e);
                ApiError::internal_server_error(format!("Error retrieving note with id {}: {}", id, e))
            }
        })?;

    Ok(Json(note))
}

/// PUT|PATCH /notes/:id - apply `{"title"?, "content"?}`; absent fields are kept
///
/// An empty body is an empty patch. Anything else must be a JSON object.
pub async fn update(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<String, ApiError> {
    let patch = parse_patch(&body)?;

    state
        .notes
        .patch(&id, &user.id, patch)
        .await
        .map_err(|e| match e {
            DatabaseError::NotFound(_) => ApiError::not_found(format!("Note with id {} not found", id)),
            DatabaseError::Forbidden(_) => forbidden(&id),
            e => {
                tracing::error!("Updating note {} failed: {}", id, e);
                ApiError::internal_server_error(format!("Unable to update note with id {}, error: {}", id, e))
            }
        })?;

    Ok(format!("Note with id {} updated", id))
}

fn parse_patch(body: &[u8]) -> Result<NotePatch, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(NotePatch::default());
    }

    Json::<NotePatch>::from_bytes(body)
        .map(|Json(patch)| patch)
        .map_err(|_| ApiError::bad_request("Note update is missing or invalid"))
}

/// DELETE /notes/:id
pub async fn delete(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<String, ApiError> {
    state
        .notes
        .delete_by_id(&id, &user.id)
        .await
        .map_err(|e| match e {
            DatabaseError::NotFound(_) => ApiError::not_found(format!("Note with id {} not found.", id)),
            DatabaseError::Forbidden(_) => forbidden(&id),
            e => {
                tracing::error!("Deleting note {} failed: {}", id, e);
                ApiError::internal_server_error(format!("Unable to delete note with id {}, error: {}", id, e))
            }
        })?;

    Ok(format!("Note with the id {} deleted from the database successfully.", id))
}
