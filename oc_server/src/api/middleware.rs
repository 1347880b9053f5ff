//! Authentication middleware.
//!
//! Extracts and verifies JWT access tokens from the Authorization header
//! and injects the resolved [`Caller`] into request extensions for
//! downstream handlers.
//!
//! Handlers behind [`require_auth`] extract the identity with
//! `Extension(caller): Extension<Caller>`; handlers behind
//! [`optional_auth`] use `Option<Extension<Caller>>` instead.

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use open_classical::auth::Caller;

use super::AppState;
use super::error::ApiError;

/// Bearer token from the Authorization header, if present
fn bearer_token(request: &Request) -> Option<String> {
    request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(|token| token.to_string())
}

/// Reject any request without a valid access token
///
/// - Token valid: injects [`Caller`] into request extensions
/// - Missing header or invalid/expired token: `401 Unauthorized`
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token =
        bearer_token(&request).ok_or_else(|| ApiError::unauthorized("Missing bearer token"))?;

    match state.auth_manager.verify_access_token(&token) {
        Ok(claims) => {
            request
                .extensions_mut()
                .insert(Caller::from_claims(&claims));
            Ok(next.run(request).await)
        }
        Err(_) => Err(ApiError::unauthorized("Invalid or expired token")),
    }
}

/// Resolve the caller identity when a token is present
///
/// Used on routes that accept anonymous submissions: a request without
/// an Authorization header passes through unauthenticated, but a token
/// that fails verification is still rejected.
pub async fn optional_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    if let Some(token) = bearer_token(&request) {
        match state.auth_manager.verify_access_token(&token) {
            Ok(claims) => {
                request
                    .extensions_mut()
                    .insert(Caller::from_claims(&claims));
            }
            Err(_) => return Err(ApiError::unauthorized("Invalid or expired token")),
        }
    }
    Ok(next.run(request).await)
}
