use cookie::Cookie;

use crate::auth::password;

/// Name of the cookie carrying the session token
pub const TOKEN_COOKIE: &str = "token";

/// HTTP-only cookie holding `token`, living as long as the token does
pub fn token_cookie(token: String, expiry_hours: u64) -> Cookie<'static> {
    Cookie::build((TOKEN_COOKIE, token))
        .path("/")
        .http_only(true)
        .max_age(time::Duration::hours(expiry_hours as i64))
        .build()
}

/// Expired, empty token cookie that makes the browser drop it
pub fn cleared_token_cookie() -> Cookie<'static> {
    Cookie::build((TOKEN_COOKIE, ""))
        .path("/")
        .http_only(true)
        .max_age(time::Duration::ZERO)
        .build()
}

/// Hash on the blocking pool; argon2 is deliberately expensive
pub async fn hash_password(password: String) -> Result<String, String> {
    tokio::task::spawn_blocking(move || password::hash_password(&password))
        .await
        .map_err(|e| format!("Password hashing task failed: {}", e))?
}

pub async fn verify_password(password: String, hash: String) -> Result<bool, String> {
    tokio::task::spawn_blocking(move || password::verify_password(&password, &hash))
        .await
        .map_err(|e| format!("Password verification task failed: {}", e))?
}
