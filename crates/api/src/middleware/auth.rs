//! # Authentication Module
//!
//! Verifies the HS256 access token carried in the `Authorization: Bearer` header and gates
//! routes by role. Tokens are issued elsewhere; this service only checks them.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{HeaderMap, header::AUTHORIZATION},
    middleware::Next,
    response::Response,
};
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use schooltime_core::{
    errors::{SchoolError, SchoolResult},
    models::auth::{ACADEMIC_ROLES, AuthUser, TokenClaims},
};
use tracing::debug;

use crate::{ApiState, middleware::error_handling::AppError};

/// Extracts the raw token from an `Authorization: Bearer <token>` header.
pub fn bearer_token(headers: &HeaderMap) -> SchoolResult<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| SchoolError::Authentication("Unauthorized".to_string()))
}

/// Checks signature and expiry of an access token.
pub fn verify_access_token(token: &str, secret: &str) -> SchoolResult<TokenClaims> {
    let validation = Validation::new(Algorithm::HS256);

    decode::<TokenClaims>(token, &DecodingKey::from_secret(secret.as_bytes()), &validation)
        .map(|data| data.claims)
        .map_err(|err| {
            debug!("Rejected access token: {}", err);
            SchoolError::Authentication("Invalid or expired token".to_string())
        })
}

/// Resolves the caller from the request headers.
pub fn authenticate(headers: &HeaderMap, secret: &str) -> SchoolResult<AuthUser> {
    let token = bearer_token(headers)?;
    verify_access_token(token, secret).map(AuthUser::from)
}

/// Fails unless `user` holds at least one of `allowed`.
pub fn authorize(user: &AuthUser, allowed: &[&str]) -> SchoolResult<()> {
    if user.has_any_role(allowed) {
        Ok(())
    } else {
        Err(SchoolError::Authorization("Forbidden".to_string()))
    }
}

/// Route layer admitting only academic staff.
///
/// The authenticated [`AuthUser`] is stored in the request extensions for handlers.
pub async fn require_academic_staff(
    State(state): State<Arc<ApiState>>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let user = authenticate(request.headers(), &state.jwt_secret)?;
    authorize(&user, ACADEMIC_ROLES)?;

    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}
