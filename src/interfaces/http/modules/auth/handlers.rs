//! Authentication API handlers

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use chrono::Utc;
use serde_json::json;

use super::dto::{
    AuthResponse, AuthTestResponse, EndpointUsage, LoginRequest, RegisterRequest, VerifyResponse,
};
use crate::application::AuthService;
use crate::interfaces::http::common::{ApiResult, ErrorBody, ValidatedJson};
use crate::interfaces::http::middleware::AuthenticatedUser;

#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "Authentication",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Successful login", body = AuthResponse),
        (status = 400, description = "Missing credentials", body = ErrorBody),
        (status = 401, description = "Invalid username or password", body = ErrorBody)
    )
)]
pub async fn login(
    State(auth): State<Arc<AuthService>>,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> ApiResult<Json<AuthResponse>> {
    let result = auth.login(&req.username, &req.password).await?;
    Ok(Json(AuthResponse {
        message: "Login successful".into(),
        token: result.token,
        user: result.user.into(),
    }))
}

#[utoipa::path(
    post,
    path = "/api/auth/register",
    tag = "Authentication",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User created", body = AuthResponse),
        (status = 400, description = "Missing required fields", body = ErrorBody),
        (status = 409, description = "Username or email already taken", body = ErrorBody)
    )
)]
pub async fn register(
    State(auth): State<Arc<AuthService>>,
    ValidatedJson(req): ValidatedJson<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<AuthResponse>)> {
    let result = auth
        .register(&req.username, &req.email, &req.password)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            message: "Registration successful".into(),
            token: result.token,
            user: result.user.into(),
        }),
    ))
}

#[utoipa::path(
    get,
    path = "/api/auth/verify",
    tag = "Authentication",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Token is valid", body = VerifyResponse),
        (status = 401, description = "No token provided", body = ErrorBody),
        (status = 403, description = "Token is invalid or expired", body = ErrorBody)
    )
)]
pub async fn verify(user: AuthenticatedUser) -> Json<VerifyResponse> {
    Json(VerifyResponse {
        message: "Token is valid".into(),
        user: user.0,
    })
}

#[utoipa::path(
    get,
    path = "/api/auth/test",
    tag = "Authentication",
    responses((status = 200, description = "Auth routes are reachable", body = AuthTestResponse))
)]
pub async fn auth_test() -> Json<AuthTestResponse> {
    Json(AuthTestResponse {
        message: "Auth routes are working!".into(),
        timestamp: Utc::now(),
    })
}

#[utoipa::path(
    get,
    path = "/api/auth/login",
    tag = "Authentication",
    responses((status = 200, description = "How to log in", body = EndpointUsage))
)]
pub async fn login_usage() -> Json<EndpointUsage> {
    Json(EndpointUsage {
        message: "Login endpoint - use POST with username/password".into(),
        method: "POST".into(),
        expected_body: json!({
            "username": "agent007 or james.bond@imf.gov",
            "password": "password"
        }),
    })
}

#[utoipa::path(
    get,
    path = "/api/auth/register",
    tag = "Authentication",
    responses((status = 200, description = "How to register", body = EndpointUsage))
)]
pub async fn register_usage() -> Json<EndpointUsage> {
    Json(EndpointUsage {
        message: "Registration endpoint - use POST with username/email/password".into(),
        method: "POST".into(),
        expected_body: json!({
            "username": "your_username",
            "email": "your_email@example.com",
            "password": "your_password"
        }),
    })
}
