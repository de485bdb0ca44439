use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, StatusCode},
    middleware::Next,
    response::Response,
};

use crate::auth::Claims;
use crate::state::AppState;

/// Authenticated user context extracted from the bearer token
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub id: String,
    pub name: String,
    pub email: String,
}

impl From<Claims> for AuthUser {
    fn from(claims: Claims) -> Self {
        Self {
            id: claims.sub,
            name: claims.name,
            email: claims.email,
        }
    }
}

/// Bearer token gate for protected routes.
///
/// No token: 401. Token that fails signature or expiry checks: 403. Both
/// rejections carry no body.
pub async fn jwt_auth_middleware(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let token = extract_bearer_token(&headers).ok_or_else(|| {
        tracing::debug!("Rejecting request to {}: no bearer token", request.uri());
        StatusCode::UNAUTHORIZED
    })?;

    let claims = state.jwt.verify(token).map_err(|e| {
        tracing::warn!("Rejecting request to {}: {}", request.uri(), e);
        StatusCode::FORBIDDEN
    })?;

    let auth_user = AuthUser::from(claims);
    tracing::debug!("Authenticated user {} for {}", auth_user.id, request.uri());
    request.extensions_mut().insert(auth_user);

    Ok(next.run(request).await)
}

/// Token from `Authorization: Bearer <token>`, if well formed
fn extract_bearer_token(headers: &HeaderMap) -> Option<&str> {
    let auth_str = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let token = auth_str.strip_prefix("Bearer ")?.trim();

    if token.is_empty() {
        None
    } else {
        Some(token)
    }
}
