use axum::{extract::State, Extension, Json};

use crate::database::models::UserProfile;
use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::state::AppState;

/// GET /me - the caller's stored profile, read fresh rather than from the token
pub async fn me(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<UserProfile>, ApiError> {
    let stored = state
        .users
        .find_by_id(&user.id)
        .await
        .map_err(|e| {
            tracing::error!("Loading user {} failed: {}", user.id, e);
            ApiError::internal_server_error(format!("Unable to load user {}, error: {}", user.id, e))
        })?
        .ok_or_else(|| ApiError::not_found(format!("User with id {} not found", user.id)))?;

    Ok(Json(stored.profile()))
}
