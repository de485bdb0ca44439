use axum::{http::header, response::IntoResponse, Json};
use serde_json::json;

use super::utils;

/// POST /signout - drop the token cookie. Always succeeds.
pub async fn signout() -> impl IntoResponse {
    (
        [(header::SET_COOKIE, utils::cleared_token_cookie().to_string())],
        Json(json!({ "message": "Signed out successfully" })),
    )
}
