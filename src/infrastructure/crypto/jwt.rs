//! JWT Token handling

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::UserRole;

/// JWT configuration
#[derive(Clone)]
pub struct JwtConfig {
    /// Secret key for signing tokens
    pub secret: String,
    /// Token expiration time in hours
    pub expiration_hours: i64,
    /// Issuer claim
    pub issuer: String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: "imf-super-secret-key-change-in-production".to_string(),
            expiration_hours: 24,
            issuer: "imf-gadgets".to_string(),
        }
    }
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"***")
            .field("expiration_hours", &self.expiration_hours)
            .field("issuer", &self.issuer)
            .finish()
    }
}

/// JWT claims carried by every issued token
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, ToSchema)]
pub struct TokenClaims {
    #[serde(rename = "userId")]
    pub user_id: String,
    pub username: String,
    pub role: UserRole,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    pub iss: String,
}

impl TokenClaims {
    pub fn new(user_id: &str, username: &str, role: UserRole, config: &JwtConfig) -> Self {
        let now = Utc::now();
        let exp = now + Duration::hours(config.expiration_hours);

        Self {
            user_id: user_id.to_string(),
            username: username.to_string(),
            role,
            exp: exp.timestamp(),
            iat: now.timestamp(),
            iss: config.issuer.clone(),
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

/// Create a JWT token for a user
pub fn create_token(
    user_id: &str,
    username: &str,
    role: UserRole,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let claims = TokenClaims::new(user_id, username, role, config);

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Verify and decode a JWT token
pub fn verify_token(
    token: &str,
    config: &JwtConfig,
) -> Result<TokenClaims, jsonwebtoken::errors::Error> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[&config.issuer]);

    let token_data = decode::<TokenClaims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &validation,
    )?;

    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> JwtConfig {
        JwtConfig {
            secret: "test-secret".into(),
            expiration_hours: 1,
            issuer: "imf-test".into(),
        }
    }

    #[test]
    fn token_round_trips_identity() {
        let cfg = config();
        let token = create_token("u-1", "agent007", UserRole::Agent, &cfg).unwrap();
        let claims = verify_token(&token, &cfg).unwrap();

        assert_eq!(claims.user_id, "u-1");
        assert_eq!(claims.username, "agent007");
        assert_eq!(claims.role, UserRole::Agent);
        assert_eq!(claims.exp - claims.iat, 3600);
        assert!(!claims.is_admin());
    }

    #[test]
    fn claims_serialize_user_id_in_camel_case() {
        let claims = TokenClaims::new("u-1", "control", UserRole::Admin, &config());
        let json = serde_json::to_value(&claims).unwrap();
        assert_eq!(json["userId"], "u-1");
        assert_eq!(json["role"], "admin");
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let token = create_token("u-1", "agent007", UserRole::Agent, &config()).unwrap();
        let other = JwtConfig {
            secret: "other".into(),
            ..config()
        };
        assert!(verify_token(&token, &other).is_err());
    }

    #[test]
    fn expired_token_is_rejected() {
        let cfg = JwtConfig {
            expiration_hours: -2,
            ..config()
        };
        let token = create_token("u-1", "agent007", UserRole::Agent, &cfg).unwrap();
        assert!(verify_token(&token, &cfg).is_err());
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(verify_token("not.a.token", &config()).is_err());
    }
}
