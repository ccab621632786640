//! Authentication middleware for Axum
//!
//! `auth_middleware` turns a bearer token into an [`AuthenticatedUser`]
//! request extension; `require_agent` / `require_admin` then gate on role.

use std::sync::Arc;

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::application::AuthService;
use crate::domain::UserRole;
use crate::infrastructure::crypto::jwt::TokenClaims;
use crate::interfaces::http::common::ApiError;

/// Identity attached to a request by [`auth_middleware`]
#[derive(Clone, Debug)]
pub struct AuthenticatedUser(pub TokenClaims);

impl AuthenticatedUser {
    pub fn role(&self) -> UserRole {
        self.0.role
    }

    pub fn is_admin(&self) -> bool {
        self.0.is_admin()
    }
}

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or_else(|| ApiError::access_denied("No token provided"))
    }
}

/// Second whitespace-separated part of the header, e.g. `Bearer <token>`.
fn extract_token(auth_header: &str) -> Option<&str> {
    auth_header
        .split(' ')
        .nth(1)
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// JWT authentication middleware
///
/// 401 when no token is supplied, 403 when the token does not verify.
pub async fn auth_middleware(
    State(auth): State<Arc<AuthService>>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(extract_token)
        .map(String::from);

    let Some(token) = token else {
        return ApiError::access_denied("No token provided").into_response();
    };

    match auth.verify(&token) {
        Ok(claims) => {
            tracing::debug!(user_id = %claims.user_id, role = %claims.role, "Authenticated request");
            request.extensions_mut().insert(AuthenticatedUser(claims));
            next.run(request).await
        }
        Err(_) => ApiError::invalid_token("Token is invalid or expired").into_response(),
    }
}

/// Allow admins only.
pub async fn require_admin(request: Request, next: Next) -> Response {
    match request.extensions().get::<AuthenticatedUser>() {
        Some(user) if user.is_admin() => next.run(request).await,
        _ => ApiError::forbidden("Admin access required").into_response(),
    }
}

/// Allow agents and admins.
pub async fn require_agent(request: Request, next: Next) -> Response {
    match request.extensions().get::<AuthenticatedUser>() {
        Some(user) if matches!(user.role(), UserRole::Agent | UserRole::Admin) => {
            next.run(request).await
        }
        _ => ApiError::forbidden("Agent access required").into_response(),
    }
}
