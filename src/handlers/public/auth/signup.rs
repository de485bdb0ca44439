use axum::{
    extract::{rejection::JsonRejection, State},
    http::header,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::json;

use super::utils;
use crate::database::models::User;
use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// POST /signup - create an account and start a session
///
/// Input: `{"name": "...", "email": "...", "password": "..."}`
///
/// 200 `{"message": "Signed up successfully"}` with a `token` cookie,
/// 400 when the email is already registered, 500 on store or crypto failure.
pub async fn signup(
    State(state): State<AppState>,
    payload: Result<Json<SignupRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(payload) = payload?;

    if state
        .users
        .find_by_email(&payload.email)
        .await
        .map_err(server_error)?
        .is_some()
    {
        return Err(ApiError::bad_request("User already exists"));
    }

    let password_hash = utils::hash_password(payload.password)
        .await
        .map_err(server_error)?;
    let user = User::new(payload.name, payload.email, password_hash);

    // Lost a race with a concurrent sign-up for the same email
    if !state.users.append(user.clone()).await.map_err(server_error)? {
        return Err(ApiError::bad_request("User already exists"));
    }

    let token = state.jwt.issue(&user).map_err(server_error)?;
    let cookie = utils::token_cookie(token, state.jwt.expiry_hours());

    tracing::info!("User {} signed up", user.id);

    Ok((
        [(header::SET_COOKIE, cookie.to_string())],
        Json(json!({ "message": "Signed up successfully" })),
    ))
}

fn server_error(e: impl std::fmt::Display) -> ApiError {
    tracing::error!("Sign-up failed: {}", e);
    ApiError::internal_server_error("Server Error")
}
