//! Authentication DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::{User, UserRole};
use crate::infrastructure::crypto::jwt::TokenClaims;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    /// Username or email
    #[serde(default)]
    #[validate(length(min = 1, message = "Username is required"))]
    #[schema(example = "agent007")]
    pub username: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Password is required"))]
    #[schema(example = "password")]
    pub password: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    #[serde(default)]
    #[validate(length(min = 1, max = 50, message = "Username is required (at most 50 characters)"))]
    pub username: String,
    #[serde(default)]
    #[validate(length(min = 1, max = 255, message = "Email is required (at most 255 characters)"))]
    pub email: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UserInfo {
    pub id: String,
    pub username: String,
    pub email: String,
    pub role: UserRole,
}

impl From<User> for UserInfo {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            role: user.role,
        }
    }
}

/// Login and registration response
#[derive(Debug, Serialize, ToSchema)]
pub struct AuthResponse {
    pub message: String,
    pub token: String,
    pub user: UserInfo,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct VerifyResponse {
    pub message: String,
    pub user: TokenClaims,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AuthTestResponse {
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

/// Usage hint for a POST-only endpoint
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EndpointUsage {
    pub message: String,
    pub method: String,
    #[schema(value_type = Object)]
    pub expected_body: Value,
}
