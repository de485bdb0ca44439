use axum::{
    extract::{rejection::JsonRejection, State},
    http::header,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::json;

use super::utils;
use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SigninRequest {
    pub email: String,
    pub password: String,
}

/// POST /signin - exchange credentials for a token
///
/// Input: `{"email": "...", "password": "..."}`
///
/// 200 `{"accessToken": "...", "message": "signed in successfully"}` with a
/// `token` cookie. Unknown email is 404 and a wrong password is 401, both with
/// the same generic message.
pub async fn signin(
    State(state): State<AppState>,
    payload: Result<Json<SigninRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(payload) = payload?;

    let user = state
        .users
        .find_by_email(&payload.email)
        .await
        .map_err(server_error)?
        .ok_or_else(|| {
            tracing::warn!("Sign-in for unknown email {}", payload.email);
            ApiError::not_found("Invalid email or password.")
        })?;

    let matches = utils::verify_password(payload.password, user.password.clone())
        .await
        .map_err(server_error)?;
    if !matches {
        tracing::warn!("Sign-in with wrong password for user {}", user.id);
        return Err(ApiError::unauthorized("Invalid email or password"));
    }

    let token = state.jwt.issue(&user).map_err(server_error)?;
    let cookie = utils::token_cookie(token.clone(), state.jwt.expiry_hours());

    tracing::info!("User {} signed in", user.id);

    Ok((
        [(header::SET_COOKIE, cookie.to_string())],
        Json(json!({
            "accessToken": token,
            "message": "signed in successfully",
        })),
    ))
}

fn server_error(e: impl std::fmt::Display) -> ApiError {
    tracing::error!("Sign-in failed: {}", e);
    ApiError::internal_server_error("server error")
}
